//! Package.json parsing functionality
//!
//! [`PackageJsonParser`] turns manifest text into a [`PackageManifest`];
//! [`ManifestReader`] loads manifests through a [`FileSystem`] and exposes the
//! declared dependency names of a project.

use crate::error::{CheckerError, Result};
use crate::models::package::{DeclaredDependency, DependencyEntry, DependencyKind, PackageManifest};
use crate::output::diagnostics::{Diagnostic, DiagnosticSink};
use crate::utils::fs::FileSystem;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Name of the manifest file in every package
pub const MANIFEST_FILE: &str = "package.json";

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse package.json content into a PackageManifest
    pub fn parse(content: &str) -> Result<PackageManifest> {
        let json_value: Value = serde_json::from_str(content)
            .map_err(|e| CheckerError::json_parse_error(MANIFEST_FILE, e))?;

        let obj = match json_value {
            Value::Object(obj) => obj,
            _ => {
                return Err(CheckerError::invalid_package_json(
                    MANIFEST_FILE,
                    "Root value is not an object",
                ));
            }
        };

        Ok(PackageManifest {
            name: Self::extract_optional_string(&obj, "name"),
            version: Self::extract_optional_string(&obj, "version"),
            main: Self::extract_optional_string(&obj, "main"),
            package_type: Self::extract_optional_string(&obj, "type"),
            dependencies: Self::extract_dependencies(&obj, DependencyKind::Production),
            dev_dependencies: Self::extract_dependencies(&obj, DependencyKind::Development),
            optional_dependencies: Self::extract_dependencies(&obj, DependencyKind::Optional),
        })
    }

    /// Parse a package.json file through the given filesystem
    pub fn parse_file(fs: &dyn FileSystem, path: &Path) -> Result<PackageManifest> {
        if !fs.exists(path) {
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| path.to_path_buf());
            return Err(CheckerError::package_json_not_found(dir));
        }

        let content = fs.read_text(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => CheckerError::permission_denied(path),
            _ => CheckerError::file_access_error(path, e.to_string()),
        })?;

        Self::parse(&content).map_err(|e| match e {
            CheckerError::JsonParse { source, .. } => CheckerError::json_parse_error(path, source),
            CheckerError::InvalidPackageJson { message, .. } => CheckerError::invalid_package_json(path, message),
            _ => e,
        })
    }

    /// Extract a dependency mapping, keeping declaration order
    ///
    /// Returns `None` when the key is absent or is not an object.
    fn extract_dependencies(obj: &Map<String, Value>, kind: DependencyKind) -> Option<Vec<DependencyEntry>> {
        match obj.get(kind.manifest_key()) {
            Some(Value::Object(map)) => Some(
                map.iter()
                    .map(|(name, version)| DependencyEntry {
                        name: name.clone(),
                        version_spec: match version {
                            Value::String(spec) => spec.clone(),
                            other => other.to_string(),
                        },
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Extract an optional string field from a JSON object
    fn extract_optional_string(obj: &Map<String, Value>, field: &str) -> Option<String> {
        match obj.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Which dependency mappings of the root manifest are enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencySelection {
    pub development: bool,
    pub optional: bool,
}

impl DependencySelection {
    /// Only `dependencies`
    pub fn production_only() -> Self {
        Self { development: false, optional: false }
    }

    fn kinds(self) -> impl Iterator<Item = DependencyKind> {
        [
            Some(DependencyKind::Production),
            self.development.then_some(DependencyKind::Development),
            self.optional.then_some(DependencyKind::Optional),
        ]
        .into_iter()
        .flatten()
    }
}

impl Default for DependencySelection {
    fn default() -> Self {
        Self::production_only()
    }
}

/// Loads manifests and lists a project's declared dependencies
pub struct ManifestReader<'a> {
    fs: &'a dyn FileSystem,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> ManifestReader<'a> {
    pub fn new(fs: &'a dyn FileSystem, sink: &'a dyn DiagnosticSink) -> Self {
        Self { fs, sink }
    }

    /// Path of the manifest inside a package directory
    pub fn manifest_path(package_dir: &Path) -> PathBuf {
        package_dir.join(MANIFEST_FILE)
    }

    /// Load and parse the manifest of a package directory
    pub fn read_manifest(&self, package_dir: &Path) -> Result<PackageManifest> {
        PackageJsonParser::parse_file(self.fs, &Self::manifest_path(package_dir))
    }

    /// Names under `dependencies`, in declaration order
    ///
    /// Returns `None` (after emitting a diagnostic) when the project manifest
    /// cannot be loaded, and an empty list when it declares nothing.
    pub fn load_dependency_names(&self, project_dir: &Path) -> Option<Vec<String>> {
        self.load_dependencies(project_dir, DependencySelection::production_only())
            .ok()
            .map(|declared| declared.into_iter().map(|dep| dep.name).collect())
    }

    /// Declared dependencies of the selected kinds, each name at its first position
    ///
    /// A failure to load the manifest is reported to the sink before it is
    /// returned. A missing mapping counts as declaring none. The warning is
    /// only emitted when none of the selected mappings exist.
    pub fn load_dependencies(
        &self,
        project_dir: &Path,
        selection: DependencySelection,
    ) -> Result<Vec<DeclaredDependency>> {
        let manifest = match self.read_manifest(project_dir) {
            Ok(manifest) => manifest,
            Err(err) => {
                tracing::warn!(project = %project_dir.display(), "root manifest unreadable: {}", err);
                self.sink.emit(Diagnostic::error(format!(
                    "Failed to load package.json in {}: {}",
                    project_dir.display(),
                    err.user_message()
                )));
                return Err(err);
            }
        };

        if selection.kinds().all(|kind| manifest.entries(kind).is_none()) {
            self.sink.emit(Diagnostic::warning(format!(
                "package.json in {} declares no selected dependencies, nothing to check",
                project_dir.display()
            )));
        }

        let mut declared: Vec<DeclaredDependency> = Vec::new();
        for kind in selection.kinds() {
            for entry in manifest.entries(kind).unwrap_or_default() {
                if declared.iter().any(|dep| dep.name == entry.name) {
                    continue;
                }
                declared.push(DeclaredDependency {
                    name: entry.name.clone(),
                    kind,
                });
            }
        }

        tracing::debug!(count = declared.len(), "declared dependencies loaded");
        Ok(declared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::diagnostics::{CollectingSink, DiagnosticLevel};
    use crate::utils::fs::MemoryFileSystem;

    #[test]
    fn test_parse_keeps_declaration_order() {
        let manifest = PackageJsonParser::parse(
            r#"{
                "name": "app",
                "dependencies": { "zeta": "^1.0.0", "alpha": "~2.0.0", "mid": "*" }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = manifest
            .dependencies
            .as_ref()
            .unwrap()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_fields() {
        let manifest = PackageJsonParser::parse(
            r#"{ "name": "dep", "version": "1.2.3", "main": "lib/dep.js", "type": "module" }"#,
        )
        .unwrap();

        assert_eq!(manifest.name.as_deref(), Some("dep"));
        assert_eq!(manifest.main_field(), Some("lib/dep.js"));
        assert!(manifest.is_module());
        assert!(manifest.dependencies.is_none());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = PackageJsonParser::parse("[1, 2]").unwrap_err();
        assert!(matches!(err, CheckerError::InvalidPackageJson { .. }));

        let err = PackageJsonParser::parse("{ nope").unwrap_err();
        assert!(matches!(err, CheckerError::JsonParse { .. }));
    }

    #[test]
    fn test_empty_main_counts_as_unset() {
        let manifest = PackageJsonParser::parse(r#"{ "main": "" }"#).unwrap();
        assert_eq!(manifest.main_field(), None);
    }

    #[test]
    fn test_load_dependency_names_missing_manifest() {
        let fs = MemoryFileSystem::new();
        let sink = CollectingSink::new();
        let reader = ManifestReader::new(&fs, &sink);

        assert_eq!(reader.load_dependency_names(Path::new("/project")), None);
        assert_eq!(sink.count(DiagnosticLevel::Error), 1);
        assert!(sink.messages()[0].starts_with("Failed to load package.json in /project"));
    }

    #[test]
    fn test_load_dependency_names_distinguishes_empty() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/project/package.json", r#"{ "dependencies": {} }"#);
        let sink = CollectingSink::new();
        let reader = ManifestReader::new(&fs, &sink);

        assert_eq!(reader.load_dependency_names(Path::new("/project")), Some(vec![]));
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_missing_dependencies_field_is_empty_with_warning() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/project/package.json", r#"{ "name": "app" }"#);
        let sink = CollectingSink::new();
        let reader = ManifestReader::new(&fs, &sink);

        assert_eq!(reader.load_dependency_names(Path::new("/project")), Some(vec![]));
        assert_eq!(sink.count(DiagnosticLevel::Warning), 1);
    }

    #[test]
    fn test_dev_only_manifest_warns_only_without_dev_selection() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/project/package.json", r#"{ "devDependencies": { "jest": "29" } }"#);

        let sink = CollectingSink::new();
        let reader = ManifestReader::new(&fs, &sink);
        let declared = reader
            .load_dependencies(
                Path::new("/project"),
                DependencySelection { development: true, optional: false },
            )
            .unwrap();
        assert_eq!(declared.len(), 1);
        assert_eq!(sink.count(DiagnosticLevel::Warning), 0);

        let sink = CollectingSink::new();
        let reader = ManifestReader::new(&fs, &sink);
        assert_eq!(reader.load_dependency_names(Path::new("/project")), Some(vec![]));
        assert_eq!(sink.count(DiagnosticLevel::Warning), 1);
    }

    #[test]
    fn test_selection_appends_kinds_without_duplicates() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file(
            "/project/package.json",
            r#"{
                "dependencies": { "b": "1", "a": "1" },
                "devDependencies": { "a": "1", "jest": "29" },
                "optionalDependencies": { "fsevents": "2" }
            }"#,
        );
        let sink = CollectingSink::new();
        let reader = ManifestReader::new(&fs, &sink);

        let declared = reader
            .load_dependencies(
                Path::new("/project"),
                DependencySelection { development: true, optional: true },
            )
            .unwrap();

        let names: Vec<(&str, DependencyKind)> =
            declared.iter().map(|d| (d.name.as_str(), d.kind)).collect();
        assert_eq!(names, vec![
            ("b", DependencyKind::Production),
            ("a", DependencyKind::Production),
            ("jest", DependencyKind::Development),
            ("fsevents", DependencyKind::Optional),
        ]);
    }

    #[test]
    fn test_parse_file_reports_path() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/dep/package.json", "not json");

        match PackageJsonParser::parse_file(&fs, Path::new("/dep/package.json")) {
            Err(CheckerError::JsonParse { file, .. }) => assert_eq!(file, PathBuf::from("/dep/package.json")),
            other => panic!("Expected JsonParse error, got {:?}", other),
        }

        match PackageJsonParser::parse_file(&fs, Path::new("/other/package.json")) {
            Err(CheckerError::PackageJsonNotFound { path, .. }) => assert_eq!(path, PathBuf::from("/other")),
            other => panic!("Expected PackageJsonNotFound error, got {:?}", other),
        }
    }
}

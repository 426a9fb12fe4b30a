//! Package-related data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The parts of a package.json that a check reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub main: Option<String>,
    pub package_type: Option<String>,
    /// `None` when the manifest has no `dependencies` object at all
    pub dependencies: Option<Vec<DependencyEntry>>,
    pub dev_dependencies: Option<Vec<DependencyEntry>>,
    pub optional_dependencies: Option<Vec<DependencyEntry>>,
}

impl PackageManifest {
    /// Whether the package declares `"type": "module"`
    pub fn is_module(&self) -> bool {
        self.package_type.as_deref() == Some("module")
    }

    /// The `main` field, treating an empty string as unset
    pub fn main_field(&self) -> Option<&str> {
        self.main.as_deref().filter(|main| !main.is_empty())
    }

    /// Declared entries of one dependency kind, in declaration order
    pub fn entries(&self, kind: DependencyKind) -> Option<&[DependencyEntry]> {
        match kind {
            DependencyKind::Production => self.dependencies.as_deref(),
            DependencyKind::Development => self.dev_dependencies.as_deref(),
            DependencyKind::Optional => self.optional_dependencies.as_deref(),
        }
    }
}

/// A single dependency declaration (name -> version range)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub name: String,
    pub version_spec: String,
}

/// Which dependency mapping a name was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Production,
    Development,
    Optional,
}

impl DependencyKind {
    /// Manifest key holding this kind of dependency
    pub fn manifest_key(self) -> &'static str {
        match self {
            DependencyKind::Production => "dependencies",
            DependencyKind::Development => "devDependencies",
            DependencyKind::Optional => "optionalDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Production => write!(f, "production"),
            DependencyKind::Development => write!(f, "development"),
            DependencyKind::Optional => write!(f, "optional"),
        }
    }
}

/// A dependency name as declared by the root manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredDependency {
    pub name: String,
    pub kind: DependencyKind,
}

/// An installed dependency, built while iterating the declared names
#[derive(Debug, Clone)]
pub struct DependencyRecord {
    pub name: String,
    pub kind: DependencyKind,
    pub installed_path: PathBuf,
    pub manifest: PackageManifest,
}

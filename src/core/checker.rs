//! Compatibility checking of a project's direct dependencies
//!
//! [`CompatibilityChecker`] walks the dependencies declared in the project's
//! package.json in declaration order, resolves each one's entry script and asks
//! a [`GrammarOracle`] whether it parses under the target edition. Every
//! per-dependency problem is reported to the [`DiagnosticSink`] and the batch
//! always continues; only an unreadable root manifest ends the run early.

use crate::error::CheckerError;
use crate::models::config::CheckOptions;
use crate::models::package::{DeclaredDependency, DependencyRecord};
use crate::models::report::{CheckResults, DependencyVerdict, UncheckedReason, Verdict};
use crate::output::diagnostics::{ConsoleSink, Diagnostic, DiagnosticSink};
use crate::parsers::grammar::{GrammarOracle, OxcGrammarOracle};
use crate::parsers::package_json::{DependencySelection, ManifestReader};
use crate::utils::fs::{FileSystem, RealFileSystem};
use crate::utils::path_resolver::{source_kind_for, EntryResolver};
use glob::Pattern;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Progress update emitted once per dependency
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

pub type ProgressCallback = Box<dyn Fn(ProgressUpdate)>;

/// Checks every declared dependency of one project
pub struct CompatibilityChecker {
    project_dir: PathBuf,
    options: CheckOptions,
    fs: Arc<dyn FileSystem>,
    oracle: Arc<dyn GrammarOracle>,
    sink: Arc<dyn DiagnosticSink>,
    progress: Option<ProgressCallback>,
}

impl CompatibilityChecker {
    /// Create a checker for `project_dir`, resolved against the working directory
    pub fn new(project_dir: impl AsRef<Path>, options: CheckOptions) -> Self {
        let project_dir = project_dir.as_ref();
        let project_dir = std::path::absolute(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());

        Self {
            project_dir,
            options,
            fs: Arc::new(RealFileSystem),
            oracle: Arc::new(OxcGrammarOracle::new()),
            sink: Arc::new(ConsoleSink::default()),
            progress: None,
        }
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_oracle(mut self, oracle: Arc<dyn GrammarOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Directory holding installed dependencies
    pub fn modules_root(&self) -> PathBuf {
        self.project_dir.join(&self.options.modules_dir)
    }

    /// Names of the non-conforming dependencies, in declaration order
    pub fn check(&self) -> Vec<String> {
        self.check_detailed().report.into_names()
    }

    /// Run the check and keep the verdict of every dependency
    pub fn check_detailed(&self) -> CheckResults {
        let start_time = Instant::now();
        let mut results = CheckResults::new(self.project_dir.clone(), self.options.target);

        let reader = ManifestReader::new(self.fs.as_ref(), self.sink.as_ref());
        let resolver = EntryResolver::new(self.fs.as_ref());

        let selection = DependencySelection {
            development: self.options.include_dev_dependencies,
            optional: self.options.include_optional_dependencies,
        };

        let declared = match reader.load_dependencies(&self.project_dir, selection) {
            Ok(declared) => declared,
            Err(err) => {
                results.root_manifest_error = Some(err.user_message());
                results.set_duration(start_time.elapsed());
                return results;
            }
        };

        let ignore_patterns = self.compile_ignore_patterns();
        let total = declared.len();
        tracing::info!(
            project = %self.project_dir.display(),
            target = %self.options.target,
            dependencies = total,
            "checking dependencies"
        );

        for (index, dependency) in declared.iter().enumerate() {
            self.report_progress(index, total, &dependency.name);
            let verdict = self.check_dependency(dependency, &reader, &resolver, &ignore_patterns);
            results.add_verdict(verdict);
        }
        self.report_progress(total, total, "done");

        results.set_duration(start_time.elapsed());
        tracing::info!(
            non_conforming = results.summary.non_conforming,
            unchecked = results.summary.unchecked,
            "check finished"
        );
        results
    }

    fn check_dependency(
        &self,
        dependency: &DeclaredDependency,
        reader: &ManifestReader<'_>,
        resolver: &EntryResolver<'_>,
        ignore_patterns: &[Pattern],
    ) -> DependencyVerdict {
        let name = dependency.name.as_str();
        let verdict = |entry_script: Option<PathBuf>, verdict: Verdict| DependencyVerdict {
            name: name.to_string(),
            kind: dependency.kind,
            entry_script,
            verdict,
        };

        if let Some(pattern) = ignore_patterns.iter().find(|pattern| pattern.matches(name)) {
            tracing::debug!(dependency = name, pattern = pattern.as_str(), "ignored");
            self.sink.emit(Diagnostic::skipped(
                name,
                format!("{} was not checked because it matches ignore pattern '{}'", name, pattern.as_str()),
            ));
            return verdict(
                None,
                Verdict::Unchecked(UncheckedReason::Ignored {
                    pattern: pattern.as_str().to_string(),
                }),
            );
        }

        let installed_path = self.modules_root().join(name);
        let manifest = match reader.read_manifest(&installed_path) {
            Ok(manifest) => manifest,
            Err(err) => {
                tracing::warn!(dependency = name, "dependency manifest unreadable: {}", err);
                self.sink.emit(Diagnostic::skipped(
                    name,
                    format!("{} was not checked because its package.json could not be loaded", name),
                ));
                return verdict(
                    None,
                    Verdict::Unchecked(UncheckedReason::ManifestUnreadable {
                        message: err.user_message(),
                    }),
                );
            }
        };

        let record = DependencyRecord {
            name: name.to_string(),
            kind: dependency.kind,
            installed_path,
            manifest,
        };

        let Some(entry_script) = resolver.resolve_entry_script(&record.manifest, &record.installed_path) else {
            self.sink.emit(Diagnostic::skipped(
                name,
                format!("{} was not checked because no entry script was found", name),
            ));
            return verdict(None, Verdict::Unchecked(UncheckedReason::NoEntryScript));
        };

        let source_text = match self.fs.read_text(&entry_script) {
            Ok(text) => text,
            Err(err) => {
                let err = CheckerError::script_read_error(&entry_script, err);
                tracing::warn!(dependency = name, "{}", err);
                self.sink.emit(Diagnostic::skipped(
                    name,
                    format!("{} was not checked because its entry script could not be read", name),
                ));
                return verdict(
                    Some(entry_script),
                    Verdict::Unchecked(UncheckedReason::ScriptUnreadable {
                        message: err.user_message(),
                    }),
                );
            }
        };

        let kind = source_kind_for(&entry_script, &record.manifest);
        let target = self.options.target;

        match self.oracle.parse(&source_text, kind, target) {
            Ok(()) => {
                tracing::debug!(dependency = name, path = %entry_script.display(), "conforming");
                if self.options.log_conforming_packages {
                    self.sink.emit(Diagnostic::conforming(name, format!("{} is {}", name, target)));
                }
                verdict(Some(entry_script), Verdict::Conforming)
            }
            Err(failure) => {
                tracing::debug!(dependency = name, path = %entry_script.display(), "non-conforming: {}", failure);
                self.sink.emit(Diagnostic::non_conforming(name, format!("{} is not {}", name, target)));
                verdict(Some(entry_script), Verdict::NonConforming { failure })
            }
        }
    }

    /// Compile ignore globs, warning about and dropping invalid ones
    fn compile_ignore_patterns(&self) -> Vec<Pattern> {
        self.options
            .ignore
            .iter()
            .filter_map(|raw| match Pattern::new(raw) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    self.sink.emit(Diagnostic::warning(format!(
                        "Ignoring invalid ignore pattern '{}': {}",
                        raw, err
                    )));
                    None
                }
            })
            .collect()
    }

    fn report_progress(&self, current: usize, total: usize, message: &str) {
        if let Some(callback) = &self.progress {
            callback(ProgressUpdate::new(current, total, message));
        }
    }
}

/// Names of the dependencies of `project_dir` whose entry script does not
/// conform to `options.target`, in declaration order
pub fn check(project_dir: impl AsRef<Path>, options: CheckOptions) -> Vec<String> {
    CompatibilityChecker::new(project_dir, options).check()
}

//! Check result structures

use super::package::DependencyKind;
use super::syntax::{EcmaVersion, SyntaxFailure};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Names of non-conforming dependencies, in declaration order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConformanceReport {
    names: Vec<String>,
}

impl ConformanceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a name unless it is already present; returns whether it was added
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Why a dependency was left unjudged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UncheckedReason {
    /// The dependency's own package.json could not be loaded
    ManifestUnreadable { message: String },
    /// Neither `main` nor `index.js` led to a script
    NoEntryScript,
    /// The entry script exists but could not be read
    ScriptUnreadable { message: String },
    /// The name matched an ignore pattern
    Ignored { pattern: String },
}

impl UncheckedReason {
    pub fn describe(&self) -> String {
        match self {
            UncheckedReason::ManifestUnreadable { message } => format!("package.json unreadable: {}", message),
            UncheckedReason::NoEntryScript => "no entry script found".to_string(),
            UncheckedReason::ScriptUnreadable { message } => format!("entry script unreadable: {}", message),
            UncheckedReason::Ignored { pattern } => format!("ignored by pattern '{}'", pattern),
        }
    }
}

/// Outcome for one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Conforming,
    NonConforming { failure: SyntaxFailure },
    Unchecked(UncheckedReason),
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Conforming => "conforming",
            Verdict::NonConforming { .. } => "non-conforming",
            Verdict::Unchecked(_) => "unchecked",
        }
    }
}

/// Verdict for one dependency with the script that was examined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyVerdict {
    pub name: String,
    pub kind: DependencyKind,
    pub entry_script: Option<PathBuf>,
    pub verdict: Verdict,
}

/// Summary statistics for a check run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub total_dependencies: usize,
    pub conforming: usize,
    pub non_conforming: usize,
    pub unchecked: usize,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

/// Full outcome of a check run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResults {
    pub project_dir: PathBuf,
    pub target: EcmaVersion,
    pub report: ConformanceReport,
    pub dependencies: Vec<DependencyVerdict>,
    pub summary: CheckSummary,
    /// Set when the root package.json could not be loaded and nothing was checked
    pub root_manifest_error: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl CheckResults {
    pub fn new(project_dir: PathBuf, target: EcmaVersion) -> Self {
        Self {
            project_dir,
            target,
            report: ConformanceReport::new(),
            dependencies: Vec::new(),
            summary: CheckSummary::default(),
            root_manifest_error: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Record a verdict, updating the report and the summary
    pub fn add_verdict(&mut self, verdict: DependencyVerdict) {
        self.summary.total_dependencies += 1;
        match &verdict.verdict {
            Verdict::Conforming => self.summary.conforming += 1,
            Verdict::NonConforming { .. } => {
                self.summary.non_conforming += 1;
                self.report.push(verdict.name.clone());
            }
            Verdict::Unchecked(_) => self.summary.unchecked += 1,
        }
        self.dependencies.push(verdict);
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.summary.duration = duration;
    }

    pub fn has_non_conforming(&self) -> bool {
        !self.report.is_empty()
    }

    /// Names of non-conforming dependencies
    pub fn non_conforming(&self) -> &[String] {
        self.report.names()
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

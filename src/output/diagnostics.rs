//! Per-dependency diagnostics emitted while a check runs
//!
//! The checker never prints directly. It hands every diagnostic to a
//! [`DiagnosticSink`], which the CLI backs with [`ConsoleSink`] and tests back
//! with [`CollectingSink`].

use ansi_term::Colour::{Green, Red, Yellow};
use ansi_term::Style;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Dependency passed the check
    Conforming,
    /// Dependency failed the check
    NonConforming,
    /// Something was skipped or looked odd
    Warning,
    /// The run could not proceed
    Error,
}

/// A single message emitted during a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub dependency: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn conforming(dependency: &str, message: impl Into<String>) -> Self {
        Self::for_dependency(DiagnosticLevel::Conforming, dependency, message)
    }

    pub fn non_conforming(dependency: &str, message: impl Into<String>) -> Self {
        Self::for_dependency(DiagnosticLevel::NonConforming, dependency, message)
    }

    pub fn skipped(dependency: &str, message: impl Into<String>) -> Self {
        Self::for_dependency(DiagnosticLevel::Warning, dependency, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            dependency: None,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            dependency: None,
            message: message.into(),
        }
    }

    fn for_dependency(level: DiagnosticLevel, dependency: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            dependency: Some(dependency.to_string()),
            message: message.into(),
        }
    }

    fn marker(&self) -> &'static str {
        match self.level {
            DiagnosticLevel::Conforming => "✅",
            DiagnosticLevel::NonConforming => "❌",
            DiagnosticLevel::Warning => "⚠️",
            DiagnosticLevel::Error => "✗",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.message)
    }
}

/// Receiver for diagnostics
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic)
    }
}

/// Prints diagnostics to stderr
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    use_colors: bool,
    quiet: bool,
}

impl ConsoleSink {
    pub fn new(use_colors: bool, quiet: bool) -> Self {
        Self { use_colors, quiet }
    }

    /// Render a diagnostic the way it is printed
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        if !self.use_colors {
            return diagnostic.to_string();
        }

        let message = match diagnostic.level {
            DiagnosticLevel::Conforming => Green.paint(diagnostic.message.as_str()).to_string(),
            DiagnosticLevel::NonConforming => Red.paint(diagnostic.message.as_str()).to_string(),
            DiagnosticLevel::Warning => Yellow.paint(diagnostic.message.as_str()).to_string(),
            DiagnosticLevel::Error => Red.bold().paint(diagnostic.message.as_str()).to_string(),
        };

        format!("{} {}", Style::new().bold().paint(diagnostic.marker()), message)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, diagnostic: Diagnostic) {
        // Errors are always shown; quiet mode hides the per-dependency chatter
        if self.quiet && diagnostic.level != DiagnosticLevel::Error {
            return;
        }
        eprintln!("{}", self.render(&diagnostic));
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Messages emitted so far, without markers
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.lock().iter().map(|d| d.message.clone()).collect()
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.lock().iter().filter(|d| d.level == level).count()
    }

    pub fn clear(&self) {
        self.diagnostics.lock().clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}

/// Discards every diagnostic
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

//! es5check - find npm dependencies whose entry script is not ES5
//!
//! This library reads a project's package.json, resolves the entry script of
//! every direct dependency installed under node_modules, and reports the
//! dependencies whose entry script does not parse under a target ECMAScript
//! edition.

#![feature(error_generic_member_access)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{check, CompatibilityChecker, ProgressUpdate};
pub use error::{CheckerError, ErrorSeverity, Result, ResultExt};
pub use models::{
    config::{CheckOptions, Settings},
    report::{CheckResults, ConformanceReport, Verdict},
    syntax::{EcmaVersion, SourceKind, SyntaxFailure, SyntaxFeature},
};
pub use output::{CollectingSink, Diagnostic, DiagnosticLevel, DiagnosticSink};
pub use parsers::{GrammarOracle, OxcGrammarOracle};
pub use utils::fs::{FileSystem, MemoryFileSystem, RealFileSystem};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Data models shared across the crate

pub mod config;
pub mod package;
pub mod report;
pub mod syntax;

pub use config::{CheckOptions, OutputFormat, PartialSettings, Settings};
pub use package::{DeclaredDependency, DependencyEntry, DependencyKind, DependencyRecord, PackageManifest};
pub use report::{CheckResults, CheckSummary, ConformanceReport, DependencyVerdict, UncheckedReason, Verdict};
pub use syntax::{EcmaVersion, SourceKind, SyntaxFailure, SyntaxFeature};

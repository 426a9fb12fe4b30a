//! Parsing functionality
//!
//! Manifest parsing for package.json files and the grammar oracle that
//! decides whether an entry script conforms to an ECMAScript edition.

pub mod feature_detector;
pub mod grammar;
pub mod package_json;

pub use feature_detector::{FeatureDetector, FeatureUse};
pub use grammar::{GrammarOracle, OxcGrammarOracle};
pub use package_json::{DependencySelection, ManifestReader, PackageJsonParser};

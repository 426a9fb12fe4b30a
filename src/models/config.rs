//! Configuration-related data structures

use super::syntax::EcmaVersion;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory holding installed dependencies
pub const DEFAULT_MODULES_DIR: &str = "node_modules";

/// Main configuration settings for es5check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Project directory containing package.json
    pub project_path: PathBuf,

    /// Edition every entry script must parse under
    pub target: EcmaVersion,

    /// Report conforming dependencies too, not only failures
    pub log_conforming_packages: bool,

    /// Also check devDependencies
    pub include_dev_deps: bool,

    /// Also check optionalDependencies
    pub include_optional_deps: bool,

    /// Glob patterns over dependency names to skip
    pub ignore_patterns: Vec<String>,

    /// Directory under the project holding installed dependencies
    pub modules_dir: String,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to use colors in text output and diagnostics
    pub use_colors: bool,

    /// Whether to show a progress bar
    pub show_progress: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed information
    pub verbose: bool,

    /// Exit with a failure code when non-conforming dependencies are found
    pub fail_on_nonconforming: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from("."),
            target: EcmaVersion::Es5,
            log_conforming_packages: false,
            include_dev_deps: false,
            include_optional_deps: false,
            ignore_patterns: Vec::new(),
            modules_dir: DEFAULT_MODULES_DIR.to_string(),
            output_format: OutputFormat::Text,
            output_file: None,
            use_colors: true,
            show_progress: true,
            quiet: false,
            verbose: false,
            fail_on_nonconforming: true,
        }
    }
}

impl Settings {
    /// Options handed to the compatibility checker
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            log_conforming_packages: self.log_conforming_packages,
            target: self.target,
            include_dev_dependencies: self.include_dev_deps,
            include_optional_dependencies: self.include_optional_deps,
            ignore: self.ignore_patterns.clone(),
            modules_dir: self.modules_dir.clone(),
        }
    }
}

/// Options recognised by a single check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub log_conforming_packages: bool,
    pub target: EcmaVersion,
    pub include_dev_dependencies: bool,
    pub include_optional_dependencies: bool,
    pub ignore: Vec<String>,
    pub modules_dir: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Settings::default().check_options()
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub project_path: Option<PathBuf>,
    pub target: Option<EcmaVersion>,
    pub log_conforming_packages: Option<bool>,
    pub include_dev_deps: Option<bool>,
    pub include_optional_deps: Option<bool>,
    pub ignore_patterns: Option<Vec<String>>,
    pub modules_dir: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub fail_on_nonconforming: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.project_path.is_some() {
            self.project_path = other.project_path;
        }
        if other.target.is_some() {
            self.target = other.target;
        }
        if other.log_conforming_packages.is_some() {
            self.log_conforming_packages = other.log_conforming_packages;
        }
        if other.include_dev_deps.is_some() {
            self.include_dev_deps = other.include_dev_deps;
        }
        if other.include_optional_deps.is_some() {
            self.include_optional_deps = other.include_optional_deps;
        }
        if other.ignore_patterns.is_some() {
            self.ignore_patterns = other.ignore_patterns;
        }
        if other.modules_dir.is_some() {
            self.modules_dir = other.modules_dir;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.fail_on_nonconforming.is_some() {
            self.fail_on_nonconforming = other.fail_on_nonconforming;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(project_path) = &self.project_path {
            settings.project_path = project_path.clone();
        }
        if let Some(target) = self.target {
            settings.target = target;
        }
        if let Some(log_conforming) = self.log_conforming_packages {
            settings.log_conforming_packages = log_conforming;
        }
        if let Some(include_dev_deps) = self.include_dev_deps {
            settings.include_dev_deps = include_dev_deps;
        }
        if let Some(include_optional_deps) = self.include_optional_deps {
            settings.include_optional_deps = include_optional_deps;
        }
        if let Some(ignore_patterns) = &self.ignore_patterns {
            settings.ignore_patterns = ignore_patterns.clone();
        }
        if let Some(modules_dir) = &self.modules_dir {
            settings.modules_dir = modules_dir.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(fail) = self.fail_on_nonconforming {
            settings.fail_on_nonconforming = fail;
        }

        settings
    }
}

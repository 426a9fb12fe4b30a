//! Configuration file and environment variable sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{CheckerError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".es5check.toml";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(CheckerError::ConfigNotFound {
                path: self.path.clone(),
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_PROJECT_PATH`, `_TARGET`, `_LOG_CONFORMING`, `_DEV_DEPS`,
/// `_OPTIONAL_DEPS`, `_IGNORE` (comma separated), `_MODULES_DIR`,
/// `_OUTPUT_FORMAT`, `_OUTPUT_FILE` and `_NO_COLORS`.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

const ENV_KEYS: [&str; 10] = [
    "PROJECT_PATH",
    "TARGET",
    "LOG_CONFORMING",
    "DEV_DEPS",
    "OPTIONAL_DEPS",
    "IGNORE",
    "MODULES_DIR",
    "OUTPUT_FORMAT",
    "OUTPUT_FILE",
    "NO_COLORS",
];

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key)).ok()
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.var(key).map(|value| parse_bool(&value))
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(path) = self.var("PROJECT_PATH") {
            settings.project_path = Some(PathBuf::from(path));
        }

        if let Some(target) = self.var("TARGET") {
            settings.target = Some(target.parse().map_err(|_| CheckerError::invalid_target(target))?);
        }

        settings.log_conforming_packages = self.flag("LOG_CONFORMING");
        settings.include_dev_deps = self.flag("DEV_DEPS");
        settings.include_optional_deps = self.flag("OPTIONAL_DEPS");

        if let Some(ignore) = self.var("IGNORE") {
            settings.ignore_patterns = Some(
                ignore
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        if let Some(modules_dir) = self.var("MODULES_DIR") {
            settings.modules_dir = Some(modules_dir);
        }

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            settings.output_format = Some(format.parse().map_err(|e: String| CheckerError::config_error(e))?);
        }

        if let Some(output_file) = self.var("OUTPUT_FILE") {
            settings.output_file = Some(PathBuf::from(output_file));
        }

        if self.flag("NO_COLORS") == Some(true) {
            settings.use_colors = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

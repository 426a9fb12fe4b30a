//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::{CheckerError, Result};
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub target: Option<String>,
    pub log_conforming: bool,
    pub dev_deps: bool,
    pub optional_deps: bool,
    pub ignore: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_colors: bool,
    pub no_progress: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub no_fail: bool,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        CliArgs {
            path: args.path.clone(),
            target: args.target.clone(),
            log_conforming: args.log_conforming,
            dev_deps: args.dev_deps,
            optional_deps: args.optional_deps,
            ignore: if args.ignore.is_empty() { None } else { Some(args.ignore.clone()) },
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            config: args.config.clone(),
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            quiet: args.quiet,
            verbose: args.verbose,
            no_fail: args.no_fail,
        }
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(path) = &self.args.path {
            settings.project_path = Some(path.clone());
        }

        if let Some(target) = &self.args.target {
            settings.target = Some(target.parse().map_err(|_| CheckerError::invalid_target(target.as_str()))?);
        }

        if let Some(ignore) = &self.args.ignore {
            settings.ignore_patterns = Some(ignore.clone());
        }

        if let Some(format) = self.args.output_format {
            settings.output_format = Some(format);
        }

        if let Some(output_file) = &self.args.output_file {
            settings.output_file = Some(output_file.clone());
        }

        // Flags only ever switch a behavior away from its default
        if self.args.log_conforming {
            settings.log_conforming_packages = Some(true);
        }

        if self.args.dev_deps {
            settings.include_dev_deps = Some(true);
        }

        if self.args.optional_deps {
            settings.include_optional_deps = Some(true);
        }

        if self.args.no_colors {
            settings.use_colors = Some(false);
        }

        if self.args.no_progress {
            settings.show_progress = Some(false);
        }

        if self.args.quiet {
            settings.quiet = Some(true);
        }

        if self.args.verbose {
            settings.verbose = Some(true);
        }

        if self.args.no_fail {
            settings.fail_on_nonconforming = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

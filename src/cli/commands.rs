//! Command implementations

use std::path::PathBuf;
use std::sync::Arc;

use super::Args;
use crate::config::{self, file::DEFAULT_CONFIG_FILE, CliArgs};
use crate::core::CompatibilityChecker;
use crate::error::{CheckerError, ErrorSeverity, Result};
use crate::models::config::Settings;
use crate::models::report::CheckResults;
use crate::output::{create_formatter, create_progress_callback, create_writer, ProgressReporter};

/// Exit status when every checked dependency conforms
pub const EXIT_OK: i32 = 0;
/// Exit status when at least one dependency does not conform
pub const EXIT_NON_CONFORMING: i32 = 1;
/// Exit status when the check could not run
pub const EXIT_FAILURE: i32 = 2;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Check the direct dependencies of a project
    Check(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        Command::Check(args)
    }

    /// Execute the command and return the process exit status
    pub fn execute(&self) -> Result<i32> {
        self.validate()?;

        match self {
            Command::Check(args) => {
                let settings = config::load_config(CliArgs::from(args))?;
                tracing::debug!(?settings, "resolved settings");

                let results = run_check(&settings);
                write_results(&results, &settings)?;

                Ok(exit_status(&results, &settings))
            }
            Command::Init => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

                if config_path.exists() {
                    eprintln!("Configuration file already exists at: {}", config_path.display());
                    eprintln!("To overwrite it, delete the file first and run this command again.");
                    return Ok(EXIT_OK);
                }

                config::create_default_config(&config_path)?;

                eprintln!("Created default configuration file at: {}", config_path.display());
                Ok(EXIT_OK)
            }
        }
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Check(args) => {
                if let Some(path) = &args.path {
                    if !path.is_dir() {
                        return Err(CheckerError::invalid_path(path));
                    }
                }

                if let Some(config_path) = &args.config {
                    if !config_path.exists() {
                        return Err(CheckerError::ConfigNotFound {
                            path: config_path.clone(),
                            #[cfg(not(tarpaulin_include))]
                            backtrace: std::backtrace::Backtrace::capture(),
                        });
                    }
                }

                Ok(())
            }
            Command::Init => Ok(()),
        }
    }

    /// Run the command and handle errors
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(code) => code,
            Err(err) => {
                report_error(&err, self.is_verbose());

                match err.severity() {
                    ErrorSeverity::Warning => EXIT_OK,
                    ErrorSeverity::Error | ErrorSeverity::Critical => EXIT_FAILURE,
                }
            }
        }
    }

    fn is_verbose(&self) -> bool {
        matches!(self, Command::Check(args) if args.verbose)
    }
}

/// Run the checker over the configured project with progress on stderr
pub fn run_check(settings: &Settings) -> CheckResults {
    let reporter = Arc::new(ProgressReporter::new(
        settings.quiet,
        settings.verbose,
        settings.show_progress,
        settings.use_colors,
    ));

    let checker = CompatibilityChecker::new(&settings.project_path, settings.check_options())
        .with_sink(reporter.clone())
        .with_progress(create_progress_callback(reporter.clone()));

    reporter.start(0, &format!("Checking {}", checker.project_dir().display()));
    let results = checker.check_detailed();
    reporter.finish(&format!(
        "{} dependencies checked, {} non-conforming",
        results.summary.total_dependencies,
        results.summary.non_conforming
    ));

    results
}

/// Format results and write them to stdout or the configured output file
pub fn write_results(results: &CheckResults, settings: &Settings) -> Result<()> {
    let formatter = create_formatter(settings.output_format, settings.use_colors, settings.verbose, settings.quiet);
    let output = formatter.format(results)?;

    let writer = create_writer(settings.output_file.as_ref());
    writer.write(&output)
}

/// Exit status for a finished run
pub fn exit_status(results: &CheckResults, settings: &Settings) -> i32 {
    if results.root_manifest_error.is_some() {
        EXIT_FAILURE
    } else if results.has_non_conforming() && settings.fail_on_nonconforming {
        EXIT_NON_CONFORMING
    } else {
        EXIT_OK
    }
}

/// Print an error with its suggestion, and the backtrace in verbose mode
pub fn report_error(err: &CheckerError, verbose: bool) {
    tracing::error!(severity = %err.severity(), "{}", err);

    let label = if err.is_critical() { "Critical error" } else { "Error" };
    eprintln!("{}: {}", label, err.user_message());

    if let Some(suggestion) = err.suggestion() {
        eprintln!("Suggestion: {}", suggestion);
    }

    #[cfg(not(tarpaulin_include))]
    if verbose {
        eprintln!("\nBacktrace:\n{}", err.backtrace());
    }
    #[cfg(tarpaulin_include)]
    let _ = verbose;
}

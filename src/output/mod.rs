//! Output formatting, writing, diagnostics and progress reporting

pub mod diagnostics;
mod formatters;
mod progress;
#[cfg(test)]
mod tests;
mod writers;

pub use self::diagnostics::{CollectingSink, ConsoleSink, Diagnostic, DiagnosticLevel, DiagnosticSink, NullSink};
pub use self::formatters::format_duration;
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::report::CheckResults;

/// Trait for different output formatters
pub trait Formatter {
    /// Format check results into a string
    fn format(&self, results: &CheckResults) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, results: &CheckResults) -> Result<String> {
        // Quiet mode prints just the failing names, one per line
        if self.quiet {
            let mut output = String::new();
            if let Some(error) = &results.root_manifest_error {
                output.push_str(&format!("Could not load package.json: {}\n", error));
            }
            for name in results.non_conforming() {
                output.push_str(name);
                output.push('\n');
            }
            return Ok(output);
        }

        Ok(formatters::format_results_text(results, self.use_colors, self.verbose))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, results: &CheckResults) -> Result<String> {
        formatters::format_results_json(results, self.pretty)
    }
}

/// CSV formatter for spreadsheet analysis
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, results: &CheckResults) -> Result<String> {
        formatters::format_results_csv(results)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool, verbose: bool, quiet: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}

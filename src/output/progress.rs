//! Progress reporting functionality
//!
//! This module provides progress reporting for a check run with support for
//! quiet and verbose modes. The reporter doubles as the diagnostic sink so
//! per-dependency messages do not tear the progress bar.

use super::diagnostics::{ConsoleSink, Diagnostic, DiagnosticSink};
use crate::core::checker::ProgressUpdate;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}";

/// Progress reporter for a check run
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    bar: Option<ProgressBar>,
    console: ConsoleSink,
}

impl ProgressReporter {
    /// Create a new progress reporter
    ///
    /// No bar is drawn in quiet mode or when `show_bar` is false.
    pub fn new(quiet: bool, verbose: bool, show_bar: bool, use_colors: bool) -> Self {
        let bar = if quiet || !show_bar {
            None
        } else {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            bar.set_style(style);
            Some(bar)
        };

        Self {
            quiet,
            verbose,
            bar,
            console: ConsoleSink::new(use_colors, quiet),
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if let Some(bar) = &self.bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }

        if self.verbose {
            self.print(&format!("Starting: {}", operation));
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
            bar.set_message(message.to_string());
        }

        if self.verbose && current < total {
            self.print(&format!("[{}/{}] {}", current + 1, total, message));
        }
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Finish the progress operation and clear the bar
    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }

        if self.verbose {
            self.print(&format!("Finished: {}", message));
        }
    }

    /// Print a line to stderr without disturbing the bar
    pub fn print(&self, message: &str) {
        if self.quiet {
            return;
        }
        match &self.bar {
            Some(bar) => bar.suspend(|| eprintln!("{}", message)),
            None => eprintln!("{}", message),
        }
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether a bar is being drawn
    pub fn has_bar(&self) -> bool {
        self.bar.is_some()
    }
}

impl DiagnosticSink for ProgressReporter {
    fn emit(&self, diagnostic: Diagnostic) {
        match &self.bar {
            Some(bar) => bar.suspend(|| self.console.emit(diagnostic)),
            None => self.console.emit(diagnostic),
        }
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> impl Fn(ProgressUpdate) + 'static {
    move |progress: ProgressUpdate| {
        reporter.update_from(progress);
    }
}

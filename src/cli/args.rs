//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// es5check - find npm dependencies whose entry script is not ES5
#[derive(Parser, Debug)]
#[command(name = "es5check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check that the direct dependencies of an npm project parse as ES5")]
#[command(long_about = "es5check reads the package.json of a project, resolves the entry script of every \
direct dependency installed under node_modules, and reports each dependency whose entry script does not \
parse under the target ECMAScript edition (ES5 by default).")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Check the project in the current directory
    es5check

    # Check a specific project
    es5check --path ./my-app

    # Allow ES2015 syntax
    es5check --target es2015

    # Also list the dependencies that pass
    es5check --log-conforming

Dependency Selection:
    # Also check devDependencies and optionalDependencies
    es5check --dev-deps --optional-deps

    # Skip dependencies by name (glob patterns, can be repeated)
    es5check --ignore '@types/*' --ignore typescript

Output Options:
    # Output in JSON format
    es5check --output json

    # Save a CSV report
    es5check --output csv --output-file report.csv

    # Print only the names of failing dependencies
    es5check --quiet

Configuration:
    # Use a specific configuration file
    es5check --config ./es5check.toml

    # Create a default configuration file
    es5check --init

Exit Status:
    0  every checked dependency conforms
    1  at least one dependency does not conform (disable with --no-fail)
    2  the check could not run
")]
pub struct Args {
    /// Project directory
    #[arg(short, long, value_name = "PATH", help = "Project directory containing package.json (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Target ECMAScript edition
    #[arg(short, long, value_name = "EDITION", help = "ECMAScript edition entry scripts must parse under: es5, es2015 (es6) ... es2024 [default: es5]")]
    pub target: Option<String>,

    /// Report conforming dependencies too
    #[arg(long, help = "Also report dependencies whose entry script conforms")]
    pub log_conforming: bool,

    /// Check devDependencies
    #[arg(long, help = "Also check devDependencies")]
    pub dev_deps: bool,

    /// Check optionalDependencies
    #[arg(long, help = "Also check optionalDependencies")]
    pub optional_deps: bool,

    /// Dependency names to skip
    #[arg(short, long, value_name = "PATTERN", help = "Glob pattern over dependency names to skip (can be specified multiple times)")]
    pub ignore: Vec<String>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Output format for results: 'text' for human-readable output, 'json' for machine processing, 'csv' for spreadsheet analysis [default: text]")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the report to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .es5check.toml in the current directory if present)")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable the progress bar (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Only print the names of non-conforming dependencies")]
    pub quiet: bool,

    /// Show detailed information
    #[arg(short, long, help = "Show every dependency with its entry script, and backtraces on errors")]
    pub verbose: bool,

    /// Exit with status 0 even if dependencies do not conform
    #[arg(long, help = "Exit with status 0 even when non-conforming dependencies are found")]
    pub no_fail: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.es5check.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

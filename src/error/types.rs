//! Error types and definitions for es5check
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`CheckerError`]. Per-dependency failures are turned into verdicts by the
//! checker, so the variants that reach a caller are mostly configuration,
//! manifest and output problems.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for es5check operations
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Unknown ECMAScript edition requested as the compatibility target
    #[error("Invalid ECMAScript target: {value}")]
    InvalidTarget {
        value: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Dependency check errors
    #[error("Dependency check error: {message}")]
    DependencyCheck {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Filesystem access errors with a path
    #[error("Error accessing {path}: {message}")]
    FileAccess {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Package.json not found
    #[error("package.json not found in {path}")]
    PackageJsonNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Invalid package.json structure
    #[error("Invalid package.json structure in {path}: {message}")]
    InvalidPackageJson {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Entry script could not be read
    #[error("Error reading script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },
}

impl CheckerError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            CheckerError::PermissionDenied { .. } => ErrorSeverity::Warning,
            CheckerError::JsonParse { .. } => ErrorSeverity::Warning,
            CheckerError::PackageJsonNotFound { .. } => ErrorSeverity::Warning,
            CheckerError::InvalidPackageJson { .. } => ErrorSeverity::Warning,
            CheckerError::ScriptRead { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            CheckerError::Config { .. } => ErrorSeverity::Critical,
            CheckerError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            CheckerError::ConfigRead { .. } => ErrorSeverity::Critical,
            CheckerError::ConfigParse { .. } => ErrorSeverity::Critical,
            CheckerError::InvalidTarget { .. } => ErrorSeverity::Critical,
            CheckerError::InvalidPath { .. } => ErrorSeverity::Critical,
            CheckerError::StdoutWrite { .. } => ErrorSeverity::Critical,
            CheckerError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CheckerError::PermissionDenied { path, .. } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            CheckerError::JsonParse { file, source, .. } => {
                format!("Invalid JSON in '{}': {}. Please check the file format.", file.display(), source)
            }
            CheckerError::Io { source, .. } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            CheckerError::InvalidPath { path, .. } => {
                format!("Invalid path: '{}'. Please provide a valid project directory.", path.display())
            }
            CheckerError::ConfigNotFound { path, .. } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            CheckerError::InvalidTarget { value, .. } => {
                format!("'{}' is not a known ECMAScript edition. Use es5, es2015 (es6) up to es2024.", value)
            }
            CheckerError::PackageJsonNotFound { path, .. } => {
                format!("No package.json found in '{}'.", path.display())
            }
            CheckerError::InvalidPackageJson { path, message, .. } => {
                format!("Invalid package.json in '{}': {}.", path.display(), message)
            }
            CheckerError::ScriptRead { path, source, .. } => {
                format!("Could not read script '{}': {}.", path.display(), source)
            }
            CheckerError::OutputDirectoryNotFound { path, .. } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Get a suggestion for resolving this error, if one applies
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            CheckerError::PackageJsonNotFound { .. } => {
                Some("Run the check from the project root or pass --path")
            }
            CheckerError::ConfigParse { .. } | CheckerError::Config { .. } => {
                Some("Run `es5check --init` to generate a valid configuration file")
            }
            CheckerError::InvalidTarget { .. } => Some("Pass --target es5 or another edition such as es2017"),
            _ => None,
        }
    }

    /// Get the backtrace captured when this error was created
    #[cfg(not(tarpaulin_include))]
    pub fn backtrace(&self) -> &std::backtrace::Backtrace {
        match self {
            CheckerError::Io { backtrace, .. }
            | CheckerError::JsonParse { backtrace, .. }
            | CheckerError::Config { backtrace, .. }
            | CheckerError::PermissionDenied { backtrace, .. }
            | CheckerError::InvalidPath { backtrace, .. }
            | CheckerError::TomlParse { backtrace, .. }
            | CheckerError::Csv { backtrace, .. }
            | CheckerError::GlobPattern { backtrace, .. }
            | CheckerError::ConfigNotFound { backtrace, .. }
            | CheckerError::ConfigRead { backtrace, .. }
            | CheckerError::ConfigParse { backtrace, .. }
            | CheckerError::InvalidTarget { backtrace, .. }
            | CheckerError::OutputWrite { backtrace, .. }
            | CheckerError::StdoutWrite { backtrace, .. }
            | CheckerError::DependencyCheck { backtrace, .. }
            | CheckerError::FileAccess { backtrace, .. }
            | CheckerError::PackageJsonNotFound { backtrace, .. }
            | CheckerError::InvalidPackageJson { backtrace, .. }
            | CheckerError::ScriptRead { backtrace, .. }
            | CheckerError::JsonSerialize { backtrace, .. }
            | CheckerError::CsvSerialize { backtrace, .. }
            | CheckerError::OutputDirectoryNotFound { backtrace, .. } => backtrace,
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        CheckerError::Io {
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CheckerError::JsonParse {
            file: file.into(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        CheckerError::Config {
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        CheckerError::PermissionDenied {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        CheckerError::InvalidPath {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an invalid target error
    pub fn invalid_target(value: impl Into<String>) -> Self {
        CheckerError::InvalidTarget {
            value: value.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a dependency check error
    pub fn dependency_check_error(message: impl Into<String>) -> Self {
        CheckerError::DependencyCheck {
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a file access error
    pub fn file_access_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CheckerError::FileAccess {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a package.json not found error
    pub fn package_json_not_found(path: impl Into<PathBuf>) -> Self {
        CheckerError::PackageJsonNotFound {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an invalid package.json error
    pub fn invalid_package_json(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CheckerError::InvalidPackageJson {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a script read error
    pub fn script_read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CheckerError::ScriptRead {
            path: path.into(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for CheckerError {
    fn from(err: std::io::Error) -> Self {
        CheckerError::io_error(err)
    }
}

impl From<toml::de::Error> for CheckerError {
    fn from(err: toml::de::Error) -> Self {
        CheckerError::TomlParse {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl From<csv::Error> for CheckerError {
    fn from(err: csv::Error) -> Self {
        CheckerError::Csv {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for CheckerError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        CheckerError::io_error(err.into_error())
    }
}

impl From<glob::PatternError> for CheckerError {
    fn from(err: glob::PatternError) -> Self {
        CheckerError::GlobPattern {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl From<serde_json::Error> for CheckerError {
    fn from(err: serde_json::Error) -> Self {
        CheckerError::JsonSerialize {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

/// Result type alias for es5check operations
pub type Result<T> = std::result::Result<T, CheckerError>;

//! Error handling for es5check
//!
//! This module provides the error type, result alias, and error context
//! utilities shared by the whole crate.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{CheckerError, ErrorSeverity, Result};

//! Core checking functionality

pub mod checker;

pub use checker::{check, CompatibilityChecker, ProgressCallback, ProgressUpdate};

//! Per-turn error types

use serde::Serialize;
use thiserror::Error;

/// Turn input that cannot be routed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQueryError {
    /// Input was not a string (or an object with a string `prompt`)
    #[error("query must be a string, got {found}")]
    NotAString {
        /// JSON type that was supplied
        found: &'static str,
    },

    /// Input was expected to be JSON but did not parse
    #[error("query is not valid JSON: {reason}")]
    NotJson {
        /// Parser message
        reason: String,
    },

    /// Input bytes were not valid UTF-8
    #[error("query is not valid UTF-8")]
    NotUtf8,

    /// Input exceeds the configured length limit
    #[error("query is {len} bytes, limit is {max}")]
    TooLong {
        /// Actual length in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },
}

/// One module's content could not be resolved this turn
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("module '{module_id}' could not be loaded: {reason}")]
pub struct ModuleLoadError {
    /// Module that failed
    pub module_id: String,
    /// Why resolution failed
    pub reason: String,
}

impl ModuleLoadError {
    /// Build an error for a module
    pub fn new(module_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            reason: reason.into(),
        }
    }
}

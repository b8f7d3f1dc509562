//! Error types for capability declarations

use thiserror::Error;

/// Errors raised while reading capability declarations
#[derive(Debug, Error)]
pub enum CapabilityConfigError {
    /// Declaration file could not be read
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// File path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON declaration did not parse
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        /// File path
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// TOML declaration did not parse
    #[error("Invalid TOML in '{path}': {source}")]
    Toml {
        /// File path
        path: String,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },

    /// File extension is neither `.json` nor `.toml`
    #[error("Unsupported declaration format for '{path}' (expected .json or .toml)")]
    UnsupportedFormat {
        /// File path
        path: String,
    },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, CapabilityConfigError>;

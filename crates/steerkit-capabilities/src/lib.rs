//! Steerkit Capability Table
//!
//! Declares external tool integrations (MCP servers) as named capabilities and
//! reports, per turn, which of them are usable in the current environment.
//!
//! ## Features
//!
//! - Parse `mcp.json` / `mcp.toml` server declarations
//! - Derive required environment variables from `${VAR}` placeholders
//! - Pure availability gate over an environment snapshot
//! - Never launches connectors; invocation belongs to the host

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod config;
pub mod error;
pub mod gate;
pub mod table;

pub use config::{CapabilityConfig, ServerConfig};
pub use error::CapabilityConfigError;
pub use gate::{available_capabilities, Availability, CapabilityStatus, EnvironmentSnapshot};
pub use table::{validate_capabilities, CapabilityTable};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{available_capabilities, CapabilityTable, EnvironmentSnapshot};
}

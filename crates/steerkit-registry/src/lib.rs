//! Steerkit Module Registry
//!
//! Static table of keyword-triggered knowledge modules ("steering files").
//!
//! ## Lifecycle
//!
//! Discovery: scan steering directories and parse each file's YAML front matter
//! (id, category, priority, keywords). Bodies are not read.
//! Construction: validate the discovered modules and freeze them into an
//! immutable [`ModuleRegistry`] shared by every conversation.
//! Activation: bodies are resolved later, on demand, by the router's loader.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod discovery;
pub mod registry;
pub mod steering;
pub mod validate;

pub use discovery::{Discovered, SteeringDiscovery};
pub use registry::ModuleRegistry;
pub use steering::{
    module_from_file, parse_steering_content, strip_front_matter, SteeringFrontMatter,
};
pub use validate::validate_modules;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ModuleRegistry, SteeringDiscovery};
}

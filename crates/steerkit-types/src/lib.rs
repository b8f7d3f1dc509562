//! Steerkit Types - Core types shared by the routing crates
//!
//! This crate defines the data model: knowledge modules, capability
//! descriptors, match results and registry violations.

pub mod capability;
pub mod module;
pub mod violation;

pub use capability::{CapabilityDescriptor, Connector};
pub use module::{normalize_keyword, Category, ContentRef, KnowledgeModule, MatchResult};
pub use violation::{RegistryError, Violation};

//! Steerkit Router
//!
//! Decides, per conversational turn, which knowledge modules join the
//! assistant's working context and which tool integrations may be offered.
//!
//! ## Turn flow
//!
//! 1. Build a [`Query`] from the user's input (the only per-turn error site)
//! 2. [`Matcher`] scores every registered module by keyword phrase containment
//! 3. [`Loader`] resolves bodies of newly selected modules, skipping ones the
//!    [`Session`] already holds
//! 4. The capability gate reports which integrations are configured
//!
//! Registry and capability table are immutable values passed in explicitly;
//! each conversation owns its own [`Session`].

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod content;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod pack;
pub mod query;
pub mod router;
pub mod session;
pub mod validation;

pub use content::{ContentSource, FsContentSource};
pub use error::{InvalidQueryError, ModuleLoadError};
pub use loader::{LoadOutcome, LoadedDocument, Loader};
pub use matcher::{Matcher, MatcherConfig};
pub use pack::{ContentPack, PackPaths};
pub use query::Query;
pub use router::{
    Router, RouterConfig, TurnReport, GUIDANCE_UNAVAILABLE_NOTICE, QUERY_REJECTED_NOTICE,
};
pub use session::{Session, SessionStore, TurnRecord};
pub use validation::{validate, ValidationReport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Query, Router, RouterConfig, Session, SessionStore};
}

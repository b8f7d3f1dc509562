//! One conversational turn, end to end

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use steerkit_capabilities::{
    available_capabilities, CapabilityStatus, CapabilityTable, EnvironmentSnapshot,
};
use steerkit_registry::ModuleRegistry;
use steerkit_types::MatchResult;
use tracing::{info, warn};

use crate::content::ContentSource;
use crate::error::{InvalidQueryError, ModuleLoadError};
use crate::loader::{LoadedDocument, Loader};
use crate::matcher::{Matcher, MatcherConfig, DEFAULT_MAX_MODULES};
use crate::query::{Query, DEFAULT_MAX_QUERY_LEN};
use crate::session::Session;

/// Soft notice shown when some selected guidance could not be loaded
pub const GUIDANCE_UNAVAILABLE_NOTICE: &str = "some guidance unavailable this turn";

/// Soft notice shown when the turn's input could not be read as a query
pub const QUERY_REJECTED_NOTICE: &str = "couldn't read this request; showing general guidance";

/// Router tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Hard cap on modules selected per turn
    pub max_modules: usize,
    /// Minimum score a module needs to be selected
    pub min_score: u32,
    /// Longest accepted query, in bytes
    pub max_query_len: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_modules: DEFAULT_MAX_MODULES,
            min_score: 1,
            max_query_len: DEFAULT_MAX_QUERY_LEN,
        }
    }
}

/// Everything the host needs after routing one turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    /// Conversation the turn belongs to
    pub session_id: String,
    /// Normalized query, absent when the input was rejected
    pub query: Option<String>,
    /// Why the input was rejected, if it was
    pub rejected: Option<String>,
    /// Modules selected this turn, in rank order
    pub matches: Vec<MatchResult>,
    /// Modules newly brought into context this turn
    pub documents: Vec<LoadedDocument>,
    /// Modules that were selected but could not be loaded
    pub failed: Vec<ModuleLoadError>,
    /// Availability of every declared tool integration
    pub capabilities: Vec<CapabilityStatus>,
    /// User-facing soft notices
    pub notices: Vec<String>,
}

/// Routes conversational turns against a shared registry and capability table
pub struct Router {
    registry: Arc<ModuleRegistry>,
    capabilities: Arc<CapabilityTable>,
    matcher: Matcher,
    loader: Loader,
    max_query_len: usize,
}

impl Router {
    /// Create a router over shared, already-validated tables
    pub fn new(
        registry: Arc<ModuleRegistry>,
        capabilities: Arc<CapabilityTable>,
        config: RouterConfig,
        source: impl ContentSource + 'static,
    ) -> Self {
        Self {
            registry,
            capabilities,
            matcher: Matcher::new(MatcherConfig {
                max_modules: config.max_modules,
                min_score: config.min_score,
            }),
            loader: Loader::new(source),
            max_query_len: config.max_query_len,
        }
    }

    /// The module registry
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The capability table
    pub fn capability_table(&self) -> &CapabilityTable {
        &self.capabilities
    }

    /// Build a query from text, applying the configured length limit
    pub fn parse_query(&self, raw: &str) -> Result<Query, InvalidQueryError> {
        Query::parse(raw, self.max_query_len)
    }

    /// Build a query from hook-style JSON input
    pub fn parse_json_query(&self, value: &Value) -> Result<Query, InvalidQueryError> {
        Query::from_json(value, self.max_query_len)
    }

    /// Build a query from raw bytes, as read from a line of input
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Query, InvalidQueryError> {
        Query::from_bytes(bytes, self.max_query_len)
    }

    /// Build a query from raw bytes holding hook-style JSON
    pub fn parse_json_bytes(&self, bytes: &[u8]) -> Result<Query, InvalidQueryError> {
        Query::from_json_bytes(bytes, self.max_query_len)
    }

    /// Select modules for a query, or the default module for rejected input
    pub fn select(&self, input: &Result<Query, InvalidQueryError>) -> Vec<MatchResult> {
        match input {
            Ok(query) => self.matcher.match_query(query, &self.registry),
            Err(_) => vec![MatchResult::fallback(self.registry.default_module())],
        }
    }

    /// Availability of every declared capability right now
    pub fn capabilities(&self, env: &EnvironmentSnapshot) -> Vec<CapabilityStatus> {
        available_capabilities(&self.capabilities, env)
    }

    /// Route one turn: match, load what the session lacks, gate capabilities
    ///
    /// Never fails. Rejected input falls back to the default module, and
    /// modules that cannot be loaded are reported with a soft notice.
    pub fn turn(
        &self,
        session: &mut Session,
        input: Result<Query, InvalidQueryError>,
        env: &EnvironmentSnapshot,
    ) -> TurnReport {
        let mut notices = Vec::new();

        let rejected = match &input {
            Ok(_) => None,
            Err(e) => {
                warn!("Rejected query in session {}: {}", session.id(), e);
                notices.push(QUERY_REJECTED_NOTICE.to_string());
                Some(e.to_string())
            }
        };

        let matches = self.select(&input);
        let outcome = self.loader.load(&matches, session, &self.registry);
        if !outcome.is_complete() {
            notices.push(GUIDANCE_UNAVAILABLE_NOTICE.to_string());
        }

        let capabilities = self.capabilities(env);
        notices.extend(capabilities.iter().filter_map(CapabilityStatus::notice));

        info!(
            "Session {} turn {}: {} selected, {} loaded, {} failed",
            session.id(),
            session.turn_history().len(),
            matches.len(),
            outcome.documents.len(),
            outcome.failed.len()
        );

        TurnReport {
            session_id: session.id().to_string(),
            query: input.ok().map(|query| query.normalized().to_string()),
            rejected,
            matches,
            documents: outcome.documents,
            failed: outcome.failed,
            capabilities,
            notices,
        }
    }
}

//! Session-cached module loading

use serde::Serialize;
use steerkit_registry::ModuleRegistry;
use steerkit_types::{Category, MatchResult};
use tracing::{debug, warn};

use crate::content::ContentSource;
use crate::error::ModuleLoadError;
use crate::session::Session;

/// A module body newly brought into context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedDocument {
    /// Module id
    pub module_id: String,
    /// Module category
    pub category: Category,
    /// Module body
    pub content: String,
}

/// Result of loading one turn's selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    /// Newly loaded documents, in selection order
    pub documents: Vec<LoadedDocument>,
    /// Modules whose content could not be resolved
    pub failed: Vec<ModuleLoadError>,
}

impl LoadOutcome {
    /// Ids of modules that failed to load
    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|e| e.module_id.as_str()).collect()
    }

    /// Check if every requested module was available
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resolves selected modules into content, consulting the session cache
pub struct Loader {
    source: Box<dyn ContentSource>,
}

impl Loader {
    /// Create a loader over a content source
    pub fn new(source: impl ContentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Load the modules named by `matches` that the session does not hold yet
    ///
    /// Already-loaded modules are skipped without re-fetching. A module whose
    /// content cannot be resolved is reported in [`LoadOutcome::failed`], is
    /// not marked loaded, and does not stop the remaining modules. The turn's
    /// matches are appended to the session history either way.
    pub fn load(
        &self,
        matches: &[MatchResult],
        session: &mut Session,
        registry: &ModuleRegistry,
    ) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        for result in matches {
            let module_id = result.module_id.as_str();

            if session.is_loaded(module_id) {
                debug!("Module '{}' already in context, skipping", module_id);
                continue;
            }

            if outcome.failed.iter().any(|e| e.module_id == module_id) {
                continue;
            }

            let Some(module) = registry.get(module_id) else {
                warn!("Module '{}' is not registered", module_id);
                outcome
                    .failed
                    .push(ModuleLoadError::new(module_id, "module is not registered"));
                continue;
            };

            match self.source.resolve(module) {
                Ok(content) => {
                    debug!("Loaded module '{}' ({} bytes)", module_id, content.len());
                    session.mark_loaded(module_id);
                    outcome.documents.push(LoadedDocument {
                        module_id: module.id.clone(),
                        category: module.category,
                        content,
                    });
                }
                Err(e) => {
                    warn!("{}", e);
                    outcome.failed.push(e);
                }
            }
        }

        session.record_turn(matches.to_vec());
        outcome
    }
}

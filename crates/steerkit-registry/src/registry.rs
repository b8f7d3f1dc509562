//! Immutable registry of knowledge modules

use std::collections::HashMap;
use steerkit_types::{KnowledgeModule, RegistryError};
use tracing::info;

use crate::validate::validate_modules;

/// Validated, read-only table of knowledge modules
///
/// Built once at startup and shared across conversations. Construction fails
/// if any module invariant is violated, so holders may rely on unique ids,
/// non-empty keyword sets and an existing default module.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    /// Modules in registration order
    modules: Vec<KnowledgeModule>,
    /// Module id to registration index
    index: HashMap<String, usize>,
    default_module: String,
}

impl ModuleRegistry {
    /// Validate modules and freeze them into a registry
    pub fn new(
        modules: Vec<KnowledgeModule>,
        default_module: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let default_module = default_module.into();
        let violations = validate_modules(&modules, &default_module);
        if !violations.is_empty() {
            return Err(RegistryError::new(violations));
        }

        let index = modules
            .iter()
            .enumerate()
            .map(|(i, module)| (module.id.clone(), i))
            .collect();

        info!(
            "Module registry ready: {} modules, default '{}'",
            modules.len(),
            default_module
        );

        Ok(Self {
            modules,
            index,
            default_module,
        })
    }

    /// Get a module by id
    pub fn get(&self, id: &str) -> Option<&KnowledgeModule> {
        self.index.get(id).map(|&i| &self.modules[i])
    }

    /// Id of the module surfaced when nothing matches
    pub fn default_module(&self) -> &str {
        &self.default_module
    }

    /// All modules in registration order
    pub fn modules(&self) -> &[KnowledgeModule] {
        &self.modules
    }

    /// Get number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Human-readable module listing, sorted by id
    pub fn generate_listing(&self) -> String {
        let mut sorted: Vec<_> = self.modules.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));

        let mut listing = String::new();
        for module in sorted {
            listing.push_str(&module.to_summary());
            listing.push('\n');
        }
        listing
    }
}

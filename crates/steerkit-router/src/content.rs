//! Resolution of module content references

use std::fs;
use steerkit_registry::strip_front_matter;
use steerkit_types::{ContentRef, KnowledgeModule};

use crate::error::ModuleLoadError;

/// Resolves a module's content reference into its body
pub trait ContentSource: Send + Sync {
    /// Fetch the body of `module`
    fn resolve(&self, module: &KnowledgeModule) -> Result<String, ModuleLoadError>;
}

/// Reads steering files from disk and returns inline content as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentSource;

impl ContentSource for FsContentSource {
    fn resolve(&self, module: &KnowledgeModule) -> Result<String, ModuleLoadError> {
        match &module.content {
            ContentRef::Inline(content) => Ok(content.clone()),
            ContentRef::File(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    ModuleLoadError::new(
                        &module.id,
                        format!("failed to read {}: {e}", path.display()),
                    )
                })?;
                strip_front_matter(&content).map_err(|e| {
                    ModuleLoadError::new(&module.id, format!("{}: {e:#}", path.display()))
                })
            }
        }
    }
}

//! Steering directory scanning
//!
//! Reads front matter only; bodies are resolved later by the loader.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use steerkit_types::{KnowledgeModule, Violation};
use tracing::{debug, info, warn};

use crate::steering::module_from_file;

/// Modules found on disk plus files that could not be parsed
#[derive(Debug, Default)]
pub struct Discovered {
    /// Parsed modules in registration order
    pub modules: Vec<KnowledgeModule>,
    /// Steering files that failed to parse
    pub violations: Vec<Violation>,
}

/// Scans steering directories for knowledge modules
#[derive(Debug, Default)]
pub struct SteeringDiscovery {
    directories: Vec<PathBuf>,
}

impl SteeringDiscovery {
    /// Create a discovery with no directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a steering directory to scan
    pub fn add_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directories.push(dir.into());
        self
    }

    /// Scan every configured directory
    ///
    /// Directories are visited in the order they were added and files within
    /// a directory in lexicographic path order; that sequence is the
    /// registration order used for tie-breaking.
    pub fn discover(&self) -> Result<Discovered> {
        info!(
            "Starting steering discovery in {} directories",
            self.directories.len()
        );

        let mut discovered = Discovered::default();

        for dir in &self.directories {
            if !dir.exists() {
                warn!("Steering directory does not exist: {:?}", dir);
                continue;
            }

            if !dir.is_dir() {
                warn!("Steering path is not a directory: {:?}", dir);
                continue;
            }

            scan_directory(dir, &mut discovered)?;
        }

        info!(
            "Discovered {} modules ({} malformed files)",
            discovered.modules.len(),
            discovered.violations.len()
        );
        Ok(discovered)
    }
}

fn scan_directory(dir: &Path, discovered: &mut Discovered) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {:?}", dir))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        match module_from_file(&path) {
            Ok(module) => {
                debug!("Discovered module: {} at {:?}", module.id, path);
                discovered.modules.push(module);
            }
            Err(e) => {
                warn!("Skipping {:?}: {:#}", path, e);
                discovered.violations.push(Violation::MalformedModuleFile {
                    path: path.display().to_string(),
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    Ok(())
}

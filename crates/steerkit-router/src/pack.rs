//! Loading a packaged content tree (steering files plus capability declarations)

use anyhow::Result;
use std::path::{Path, PathBuf};
use steerkit_capabilities::CapabilityTable;
use steerkit_registry::{ModuleRegistry, SteeringDiscovery};
use steerkit_types::{CapabilityDescriptor, KnowledgeModule, Violation};
use tracing::{info, warn};

use crate::validation::{validate, ValidationReport};

/// Locations of the packaged content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackPaths {
    /// Steering directories, scanned in order
    pub steering_dirs: Vec<PathBuf>,
    /// Capability declaration file (`.json` or `.toml`)
    pub capabilities_file: Option<PathBuf>,
}

impl PackPaths {
    /// Paths relative to a content root
    pub fn under(root: &Path, steering_dir: &str, capabilities_file: &str) -> Self {
        Self {
            steering_dirs: vec![root.join(steering_dir)],
            capabilities_file: Some(root.join(capabilities_file)),
        }
    }
}

/// Validated registry and capability table built from packaged content
#[derive(Debug, Clone)]
pub struct ContentPack {
    /// Knowledge modules
    pub registry: ModuleRegistry,
    /// Declared capabilities
    pub capabilities: CapabilityTable,
}

struct RawPack {
    modules: Vec<KnowledgeModule>,
    capabilities: Vec<CapabilityDescriptor>,
    parse_violations: Vec<Violation>,
}

impl RawPack {
    fn report(&self, default_module: &str) -> ValidationReport {
        let mut report = ValidationReport {
            violations: self.parse_violations.clone(),
        };
        report.extend(validate(&self.modules, &self.capabilities, default_module).violations);
        report
    }
}

fn read_raw(paths: &PackPaths) -> Result<RawPack> {
    let discovery = paths
        .steering_dirs
        .iter()
        .fold(SteeringDiscovery::new(), |discovery, dir| {
            discovery.add_directory(dir.clone())
        });
    let discovered = discovery.discover()?;
    let mut parse_violations = discovered.violations;

    let capabilities = match &paths.capabilities_file {
        Some(path) if path.exists() => {
            let (descriptors, violations) = CapabilityTable::read_descriptors(path);
            parse_violations.extend(violations);
            descriptors
        }
        Some(path) => {
            warn!("Capability declarations not found: {:?}", path);
            Vec::new()
        }
        None => Vec::new(),
    };

    Ok(RawPack {
        modules: discovered.modules,
        capabilities,
        parse_violations,
    })
}

impl ContentPack {
    /// Collect every violation in the packaged content without building it
    pub fn check(paths: &PackPaths, default_module: &str) -> Result<ValidationReport> {
        Ok(read_raw(paths)?.report(default_module))
    }

    /// Build the registry and capability table, failing on any violation
    pub fn load(paths: &PackPaths, default_module: &str) -> Result<Self> {
        let raw = read_raw(paths)?;
        raw.report(default_module).into_result()?;

        let registry = ModuleRegistry::new(raw.modules, default_module)?;
        let capabilities = CapabilityTable::new(raw.capabilities)?;
        info!(
            "Content pack loaded: {} modules, {} capabilities",
            registry.len(),
            capabilities.len()
        );

        Ok(Self {
            registry,
            capabilities,
        })
    }
}

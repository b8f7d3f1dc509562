//! Startup validation of the registry and capability table

use serde::Serialize;
use steerkit_capabilities::validate_capabilities;
use steerkit_registry::validate_modules;
use steerkit_types::{CapabilityDescriptor, KnowledgeModule, RegistryError, Violation};

/// Every violation found across the registry and capability table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Violations in discovery order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Check if no violations were found
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Add violations found elsewhere (e.g. while parsing files)
    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    /// Fail with a [`RegistryError`] listing every violation
    pub fn into_result(self) -> Result<(), RegistryError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(RegistryError::new(self.violations))
        }
    }
}

/// Check module and capability invariants together
///
/// Reports all violations rather than stopping at the first, so every
/// problem can be fixed in one pass.
pub fn validate(
    modules: &[KnowledgeModule],
    capabilities: &[CapabilityDescriptor],
    default_module: &str,
) -> ValidationReport {
    let mut report = ValidationReport {
        violations: validate_modules(modules, default_module),
    };
    report.extend(validate_capabilities(capabilities));
    report
}

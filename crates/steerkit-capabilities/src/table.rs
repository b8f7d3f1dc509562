//! Immutable table of declared capabilities

use std::collections::HashSet;
use std::path::Path;
use steerkit_types::{CapabilityDescriptor, RegistryError, Violation};
use tracing::info;

use crate::config::CapabilityConfig;

/// Validated, read-only set of capability descriptors
#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    descriptors: Vec<CapabilityDescriptor>,
}

impl CapabilityTable {
    /// Validate descriptors and freeze them into a table
    pub fn new(descriptors: Vec<CapabilityDescriptor>) -> Result<Self, RegistryError> {
        let violations = validate_capabilities(&descriptors);
        if !violations.is_empty() {
            return Err(RegistryError::new(violations));
        }

        info!("Capability table ready: {} capabilities", descriptors.len());
        Ok(Self { descriptors })
    }

    /// Table with no capabilities
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read descriptors from a declaration file
    ///
    /// Parse failures are reported as violations alongside any invariant
    /// violations so callers see every problem at once.
    pub fn read_descriptors(path: &Path) -> (Vec<CapabilityDescriptor>, Vec<Violation>) {
        match CapabilityConfig::load(path) {
            Ok(config) => (config.descriptors(), Vec::new()),
            Err(e) => (
                Vec::new(),
                vec![Violation::MalformedCapabilityFile {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }],
            ),
        }
    }

    /// Load and validate a declaration file
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let (descriptors, violations) = Self::read_descriptors(path);
        if !violations.is_empty() {
            return Err(RegistryError::new(violations));
        }
        Self::new(descriptors)
    }

    /// Get a capability by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CapabilityDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// All descriptors in declaration order
    #[must_use]
    pub fn descriptors(&self) -> &[CapabilityDescriptor] {
        &self.descriptors
    }

    /// Get number of capabilities
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Check capability invariants, returning every violation found
#[must_use]
pub fn validate_capabilities(descriptors: &[CapabilityDescriptor]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for descriptor in descriptors {
        if !seen.insert(descriptor.name.as_str()) {
            violations.push(Violation::DuplicateCapability {
                name: descriptor.name.clone(),
            });
        }

        if descriptor.connector.command.trim().is_empty() {
            violations.push(Violation::EmptyConnectorCommand {
                name: descriptor.name.clone(),
            });
        }
    }

    violations
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use steerkit_types::Connector;

    #[test]
    fn test_validate_reports_all() {
        let descriptors = vec![
            CapabilityDescriptor::new("design-file-access", Connector::new("npx")),
            CapabilityDescriptor::new("design-file-access", Connector::new("uvx")),
            CapabilityDescriptor::new("browser-automation", Connector::new("  ")),
        ];

        let violations = validate_capabilities(&descriptors);
        assert_eq!(
            violations,
            vec![
                Violation::DuplicateCapability {
                    name: "design-file-access".into()
                },
                Violation::EmptyConnectorCommand {
                    name: "browser-automation".into()
                },
            ]
        );
        assert!(CapabilityTable::new(descriptors).is_err());
    }

    #[test]
    fn test_from_file_two_servers_one_capability() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp.json");
        fs::write(
            &path,
            r#"{"mcpServers": {
                "figma": {"command": "npx figma", "capability": "design-file-access"},
                "figma-alt": {"command": "uvx figma", "capability": "design-file-access"}
            }}"#,
        )
        .unwrap();

        let err = CapabilityTable::from_file(&path).unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::DuplicateCapability {
                name: "design-file-access".into()
            }]
        );
    }

    #[test]
    fn test_from_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp.json");
        fs::write(&path, "{ not json").unwrap();

        let err = CapabilityTable::from_file(&path).unwrap_err();
        assert!(matches!(
            err.violations.as_slice(),
            [Violation::MalformedCapabilityFile { .. }]
        ));
    }

    #[test]
    fn test_lookup() {
        let table = CapabilityTable::new(vec![CapabilityDescriptor::new(
            "browser-automation",
            Connector::new("npx"),
        )])
        .unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("browser-automation").is_some());
        assert!(table.get("design-file-access").is_none());
        assert!(CapabilityTable::empty().is_empty());
    }
}

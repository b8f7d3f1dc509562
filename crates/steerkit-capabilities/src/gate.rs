//! Per-turn capability availability

use serde::Serialize;
use std::collections::BTreeMap;
use steerkit_types::CapabilityDescriptor;

use crate::table::CapabilityTable;

/// Point-in-time view of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Snapshot the current process environment
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars().collect()
    }

    /// Set a variable in this snapshot
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remove a variable from this snapshot
    pub fn remove(&mut self, name: &str) {
        self.vars.remove(name);
    }

    /// Value of a variable, if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Present and not blank
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Whether a capability can be offered this turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Availability {
    /// All preconditions met
    Available,
    /// Required variables are missing or empty
    Unavailable {
        /// Missing variable names in declaration order
        missing: Vec<String>,
    },
}

/// Availability report for one capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityStatus {
    /// Capability name
    pub name: String,
    /// Declaring server key
    pub server: String,
    /// Availability verdict
    pub availability: Availability,
}

impl CapabilityStatus {
    /// Check if the capability may be offered
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self.availability, Availability::Available)
    }

    /// User-facing message for unavailable capabilities
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match &self.availability {
            Availability::Available => None,
            Availability::Unavailable { missing } => Some(format!(
                "{}: this tool integration isn't configured (missing {})",
                self.name,
                missing.join(", ")
            )),
        }
    }
}

fn status_of(descriptor: &CapabilityDescriptor, env: &EnvironmentSnapshot) -> CapabilityStatus {
    let missing: Vec<String> = descriptor
        .required_env
        .iter()
        .filter(|name| !env.is_set(name))
        .cloned()
        .collect();

    let availability = if missing.is_empty() {
        Availability::Available
    } else {
        Availability::Unavailable { missing }
    };

    CapabilityStatus {
        name: descriptor.name.clone(),
        server: descriptor.server.clone(),
        availability,
    }
}

/// Report availability of every capability against an environment snapshot
///
/// Pure; call it every turn so variables set mid-session are picked up.
#[must_use]
pub fn available_capabilities(
    table: &CapabilityTable,
    env: &EnvironmentSnapshot,
) -> Vec<CapabilityStatus> {
    table
        .descriptors()
        .iter()
        .map(|descriptor| status_of(descriptor, env))
        .collect()
}

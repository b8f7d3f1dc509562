use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the host would launch an external tool server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub command: String,
    pub args: Vec<String>,
    /// Environment template passed to the child (values may hold `${VAR}` placeholders)
    pub env: BTreeMap<String, String>,
}

impl Connector {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Command line as a single display string
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A named external-tool capability and its preconditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    pub name: String,
    /// Key of the server declaration this capability came from
    pub server: String,
    pub description: Option<String>,
    pub connector: Connector,
    /// Variables that must be present and non-empty, in declaration order
    pub required_env: Vec<String>,
}

impl CapabilityDescriptor {
    pub fn new(name: impl Into<String>, connector: Connector) -> Self {
        let name = name.into();
        Self {
            server: name.clone(),
            name,
            description: None,
            connector,
            required_env: Vec::new(),
        }
    }

    pub fn requiring(mut self, vars: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for var in vars {
            let var = var.into();
            if !self.required_env.contains(&var) {
                self.required_env.push(var);
            }
        }
        self
    }
}

//! Capability declaration format (MCP server declarations)

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use steerkit_types::{CapabilityDescriptor, Connector};
use tracing::debug;

use crate::error::{CapabilityConfigError, Result};

/// Matches `${NAME}` placeholders in connector environment values
const PLACEHOLDER_PATTERN: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}";

/// Top-level capability declaration file
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CapabilityConfig {
    /// Server declarations keyed by server name
    #[serde(default, alias = "mcpServers")]
    pub servers: BTreeMap<String, ServerConfig>,
}

/// Individual server declaration
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum ServerConfig {
    /// Simple form: a command line split on whitespace
    Simple(String),

    /// Advanced form with explicit arguments, environment and metadata
    Advanced {
        /// Program to execute (split on whitespace when `args` is empty)
        command: String,

        /// Optional separate arguments list
        #[serde(default)]
        args: Vec<String>,

        /// Environment template for the child process
        #[serde(default)]
        env: BTreeMap<String, String>,

        /// Variables that must be set, in addition to `${VAR}` placeholders in `env`
        #[serde(default, alias = "requiredEnv")]
        required_env: Vec<String>,

        /// Capability name; defaults to the server key
        #[serde(default)]
        capability: Option<String>,

        /// What the integration offers
        #[serde(default)]
        description: Option<String>,

        /// Skip this declaration entirely
        #[serde(default)]
        disabled: bool,
    },
}

impl CapabilityConfig {
    /// Load declarations from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| CapabilityConfigError::Read {
            path: display.clone(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content, &display),
            Some("toml") => Self::from_toml_str(&content, &display),
            _ => Err(CapabilityConfigError::UnsupportedFormat { path: display }),
        }
    }

    /// Parse JSON declarations
    pub fn from_json_str(content: &str, path: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| CapabilityConfigError::Json {
            path: path.to_string(),
            source,
        })
    }

    /// Parse TOML declarations
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| CapabilityConfigError::Toml {
            path: path.to_string(),
            source,
        })
    }

    /// Convert enabled declarations into capability descriptors, ordered by server key
    #[must_use]
    pub fn descriptors(&self) -> Vec<CapabilityDescriptor> {
        self.servers
            .iter()
            .filter_map(|(server, config)| {
                let descriptor = config.to_descriptor(server);
                if descriptor.is_none() {
                    debug!("Server '{}' is disabled", server);
                }
                descriptor
            })
            .collect()
    }
}

impl ServerConfig {
    /// Build the descriptor for this declaration, or `None` when disabled
    #[must_use]
    pub fn to_descriptor(&self, server: &str) -> Option<CapabilityDescriptor> {
        match self {
            ServerConfig::Simple(line) => {
                Some(CapabilityDescriptor::new(server, split_command(line)))
            }
            ServerConfig::Advanced {
                command,
                args,
                env,
                required_env,
                capability,
                description,
                disabled,
            } => {
                if *disabled {
                    return None;
                }

                let mut connector = if args.is_empty() {
                    // No explicit args, split command string like Simple variant
                    split_command(command)
                } else {
                    Connector::new(command.clone()).with_args(args.iter().cloned())
                };
                connector.env.clone_from(env);

                let name = capability.clone().unwrap_or_else(|| server.to_string());
                let mut descriptor = CapabilityDescriptor::new(name, connector)
                    .requiring(required_env.iter().cloned())
                    .requiring(env.values().flat_map(|value| placeholders(value)));
                descriptor.server = server.to_string();
                descriptor.description.clone_from(description);
                Some(descriptor)
            }
        }
    }
}

fn split_command(line: &str) -> Connector {
    let mut parts = line.split_whitespace();
    let program = parts.next().unwrap_or_default();
    Connector::new(program).with_args(parts)
}

/// Variable names referenced as `${NAME}` in a value, in order of appearance
fn placeholders(value: &str) -> Vec<String> {
    let Ok(re) = Regex::new(PLACEHOLDER_PATTERN) else {
        return Vec::new();
    };
    re.captures_iter(value)
        .filter_map(|captures| captures.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::Category;

/// A single structural problem in the registry or capability table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    DuplicateModuleId { id: String },
    EmptyKeywords { module_id: String },
    EmptyKeyword { module_id: String },
    DuplicateKeyword {
        keyword: String,
        category: Category,
        first: String,
        second: String,
    },
    InvalidModuleId { id: String },
    UnknownDefaultModule { id: String },
    MalformedModuleFile { path: String, reason: String },
    DuplicateCapability { name: String },
    EmptyConnectorCommand { name: String },
    MalformedCapabilityFile { path: String, reason: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateModuleId { id } => write!(f, "duplicate module id '{id}'"),
            Violation::EmptyKeywords { module_id } => {
                write!(f, "module '{module_id}' declares no keywords")
            }
            Violation::EmptyKeyword { module_id } => {
                write!(f, "module '{module_id}' declares an empty keyword")
            }
            Violation::DuplicateKeyword {
                keyword,
                category,
                first,
                second,
            } => write!(
                f,
                "keyword '{keyword}' is declared by both '{first}' and '{second}' in category '{category}'"
            ),
            Violation::InvalidModuleId { id } => write!(
                f,
                "module id '{id}' must contain only lowercase letters, numbers, and hyphens"
            ),
            Violation::UnknownDefaultModule { id } => {
                write!(f, "default module '{id}' is not registered")
            }
            Violation::MalformedModuleFile { path, reason } => write!(f, "{path}: {reason}"),
            Violation::DuplicateCapability { name } => {
                write!(f, "duplicate capability name '{name}'")
            }
            Violation::EmptyConnectorCommand { name } => {
                write!(f, "capability '{name}' has an empty connector command")
            }
            Violation::MalformedCapabilityFile { path, reason } => write!(f, "{path}: {reason}"),
        }
    }
}

/// Structural invariant violations found at startup
#[derive(Debug, Clone, Error)]
#[error("registry validation failed with {} violation(s)", violations.len())]
pub struct RegistryError {
    pub violations: Vec<Violation>,
}

impl RegistryError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

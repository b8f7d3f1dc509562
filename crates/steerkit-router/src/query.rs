//! User queries

use serde_json::Value;
use steerkit_types::normalize_keyword;

use crate::error::InvalidQueryError;

/// Default limit on query length, in bytes
pub const DEFAULT_MAX_QUERY_LEN: usize = 8192;

/// A user's request, as typed and in normalized form
///
/// Normalization lowercases the text and collapses whitespace runs to single
/// spaces, matching how registry keywords are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    normalized: String,
}

impl Query {
    /// Build a query without a length limit
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_keyword(&raw);
        Self { raw, normalized }
    }

    /// Build a query, rejecting input longer than `max_len` bytes
    pub fn parse(raw: &str, max_len: usize) -> Result<Self, InvalidQueryError> {
        if raw.len() > max_len {
            return Err(InvalidQueryError::TooLong {
                len: raw.len(),
                max: max_len,
            });
        }
        Ok(Self::new(raw))
    }

    /// Build a query from raw bytes
    pub fn from_bytes(bytes: &[u8], max_len: usize) -> Result<Self, InvalidQueryError> {
        let raw = std::str::from_utf8(bytes).map_err(|_| InvalidQueryError::NotUtf8)?;
        Self::parse(raw, max_len)
    }

    /// Build a query from raw JSON bytes
    ///
    /// Malformed JSON is reported as [`InvalidQueryError::NotJson`] so the
    /// turn can still fall back to the default module.
    pub fn from_json_bytes(bytes: &[u8], max_len: usize) -> Result<Self, InvalidQueryError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| InvalidQueryError::NotJson {
                reason: e.to_string(),
            })?;
        Self::from_json(&value, max_len)
    }

    /// Build a query from JSON input
    ///
    /// Accepts a bare string or an object whose `prompt` field is a string.
    pub fn from_json(value: &Value, max_len: usize) -> Result<Self, InvalidQueryError> {
        match value {
            Value::String(raw) => Self::parse(raw, max_len),
            Value::Object(map) => match map.get("prompt") {
                Some(Value::String(raw)) => Self::parse(raw, max_len),
                Some(other) => Err(InvalidQueryError::NotAString {
                    found: json_type(other),
                }),
                None => Err(InvalidQueryError::NotAString { found: "object" }),
            },
            other => Err(InvalidQueryError::NotAString {
                found: json_type(other),
            }),
        }
    }

    /// Text as supplied
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased, whitespace-collapsed text
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Check if the query has no words
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

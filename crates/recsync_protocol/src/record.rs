//! Remote record model and identifier extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Default name of the field carrying a record's identifier.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Identifier of a remote record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a record id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single record returned by the remote source.
///
/// The remote is free to return arbitrary object shapes, so the record is
/// carried as raw JSON and interpreted lazily by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteRecord(Value);

impl RemoteRecord {
    /// Wraps a JSON value as a remote record.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The record's raw JSON.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Consumes the record, returning its raw JSON.
    pub fn into_json(self) -> Value {
        self.0
    }

    /// Looks up a top-level field, if the record is an object.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<Value> for RemoteRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Locates the identifier inside a remote record.
///
/// The field carrying the identifier is a convention shared across all
/// fetch strategies and owned by the remote API, not by this crate; callers
/// choose the implementation that matches their deployment.
pub trait IdExtractor: Send + Sync {
    /// Returns the record's identifier, or `None` if it cannot be located.
    fn extract(&self, record: &RemoteRecord) -> Option<RecordId>;
}

/// Extracts the identifier from a fixed top-level field.
///
/// String and integer values are accepted; anything else counts as "no id".
#[derive(Debug, Clone)]
pub struct FieldIdExtractor {
    field: String,
}

impl FieldIdExtractor {
    /// Creates an extractor reading the given field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// The field name this extractor reads.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Default for FieldIdExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ID_FIELD)
    }
}

impl IdExtractor for FieldIdExtractor {
    fn extract(&self, record: &RemoteRecord) -> Option<RecordId> {
        match record.field(&self.field)? {
            Value::String(s) if !s.is_empty() => Some(RecordId::new(s.clone())),
            Value::Number(n) => Some(RecordId::new(n.to_string())),
            _ => None,
        }
    }
}

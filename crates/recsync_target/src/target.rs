//! Target descriptors: the persisted identity of a fetch strategy.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Wire value of `totalSize` before any fetch has run.
pub const TOTAL_SIZE_UNSET: i64 = -1;

/// Discriminant identifying which concrete strategy owns a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Full-text search over the remote index.
    Search,
    /// Structured query against the remote schema.
    Query,
    /// The remote's most-recently-used listing.
    #[serde(rename = "recent")]
    MostRecent,
}

impl StrategyKind {
    /// The wire tag of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Search => "search",
            StrategyKind::Query => "query",
            StrategyKind::MostRecent => "recent",
        }
    }

    fn is_known_tag(tag: &str) -> bool {
        matches!(tag, "search" | "query" | "recent")
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes which strategy and query a sync target uses.
///
/// Wire format: `{ "type": "search", "query": "...", "totalSize": n }`.
/// `type` is the discriminant consumed by the registry; `query` is required
/// and must be non-empty. Fields this crate does not interpret are carried
/// through serialization untouched.
///
/// The query is immutable once constructed. `totalSize` holds the record
/// count of the most recent initial fetch only, never a running total
/// across pages; it is serialized as a last-known value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    #[serde(rename = "type")]
    kind: StrategyKind,
    query: String,
    #[serde(rename = "totalSize", default = "total_size_unset")]
    total_size: i64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn total_size_unset() -> i64 {
    TOTAL_SIZE_UNSET
}

impl TargetDescriptor {
    /// Creates a descriptor for a query expression.
    pub fn new(kind: StrategyKind, query: impl Into<String>) -> ConfigResult<Self> {
        let query = query.into();
        if query.is_empty() {
            return Err(ConfigError::EmptyQuery);
        }
        Ok(Self {
            kind,
            query,
            total_size: TOTAL_SIZE_UNSET,
            extra: Map::new(),
        })
    }

    /// Parses a descriptor from its wire document.
    pub fn from_document(document: &Value) -> ConfigResult<Self> {
        match document.get("type") {
            None => {
                return Err(ConfigError::Malformed(
                    "missing \"type\" discriminant".into(),
                ))
            }
            Some(Value::String(tag)) if !StrategyKind::is_known_tag(tag) => {
                return Err(ConfigError::UnknownKind { kind: tag.clone() })
            }
            Some(Value::String(_)) => {}
            Some(other) => {
                return Err(ConfigError::Malformed(format!(
                    "\"type\" discriminant must be a string, got {other}"
                )))
            }
        }

        let descriptor: TargetDescriptor = serde_json::from_value(document.clone())
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;

        if descriptor.query.is_empty() {
            return Err(ConfigError::EmptyQuery);
        }
        Ok(descriptor)
    }

    /// Serializes to the wire document.
    pub fn to_document(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// The strategy discriminant.
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// The strategy-specific query expression.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Record count of the latest initial fetch, if one has completed.
    pub fn total_size(&self) -> Option<u64> {
        u64::try_from(self.total_size).ok()
    }

    /// Fields not interpreted by this crate, preserved across round trips.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub(crate) fn set_total_size(&mut self, count: u64) {
        self.total_size = count as i64;
    }
}

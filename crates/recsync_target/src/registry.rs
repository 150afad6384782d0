//! Materializes concrete strategies from persisted descriptors.

use crate::error::{ConfigError, ConfigResult};
use crate::search::SearchTarget;
use crate::strategy::FetchStrategy;
use crate::target::{StrategyKind, TargetDescriptor};
use serde_json::Value;

/// Dispatches descriptors to the concrete strategy that owns them.
///
/// Pure dispatch by discriminant tag; holds no state. The set of variants
/// is closed: adding a strategy means adding a kind here, never open-ended
/// registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyRegistry;

impl StrategyRegistry {
    /// Materializes a strategy from a descriptor document.
    pub fn from_document(document: &Value) -> ConfigResult<Box<dyn FetchStrategy>> {
        let descriptor = TargetDescriptor::from_document(document)?;
        Self::from_descriptor(descriptor)
    }

    /// Materializes a strategy from an already-parsed descriptor.
    pub fn from_descriptor(descriptor: TargetDescriptor) -> ConfigResult<Box<dyn FetchStrategy>> {
        match descriptor.kind() {
            StrategyKind::Search => Ok(Box::new(SearchTarget::from_descriptor(descriptor)?)),
            // Recognized tags whose strategies live outside this crate.
            kind @ (StrategyKind::Query | StrategyKind::MostRecent) => {
                Err(ConfigError::UnsupportedKind { kind })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_documents_materialize_search_targets() {
        let document = json!({"type": "search", "query": "FIND {Acme}"});
        let strategy = StrategyRegistry::from_document(&document).unwrap();
        assert_eq!(strategy.kind(), StrategyKind::Search);
        assert_eq!(strategy.descriptor().query(), "FIND {Acme}");
    }

    #[test]
    fn materialized_strategies_round_trip_their_descriptor() {
        let document = json!({"type": "search", "query": "FIND {Acme}", "label": "acme"});
        let strategy = StrategyRegistry::from_document(&document).unwrap();

        let serialized = strategy.to_document().unwrap();
        let restored = StrategyRegistry::from_document(&serialized).unwrap();
        assert_eq!(restored.kind(), strategy.kind());
        assert_eq!(restored.descriptor().query(), strategy.descriptor().query());
        assert_eq!(serialized["label"], json!("acme"));
    }

    #[test]
    fn sibling_kinds_are_refused() {
        for tag in ["query", "recent"] {
            let document = json!({"type": tag, "query": "anything"});
            let err = StrategyRegistry::from_document(&document).unwrap_err();
            assert!(matches!(err, ConfigError::UnsupportedKind { .. }), "tag {tag}");
        }
    }

    #[test]
    fn unknown_tags_are_refused() {
        let document = json!({"type": "mystery", "query": "anything"});
        let err = StrategyRegistry::from_document(&document).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKind { kind } if kind == "mystery"));
    }

    #[test]
    fn missing_query_is_refused() {
        let document = json!({"type": "search"});
        assert!(StrategyRegistry::from_document(&document).is_err());
    }
}

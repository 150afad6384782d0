//! Sync-down target defined by a full-text search query.

use crate::config::FetchContext;
use crate::error::{ConfigError, ConfigResult, FetchResult};
use crate::strategy::{FetchStrategy, HighWaterMark, RemoteIdListing};
use crate::target::{StrategyKind, TargetDescriptor};
use recsync_protocol::{RecordId, RemoteRecord, RestRequest};
use std::collections::HashSet;
use tracing::warn;

/// Fetches the records matching a full-text search expression.
///
/// The search mechanism answers every query with a single batch: it has no
/// modification-time filter and no cursor. Consequently `start_fetch`
/// ignores its high-water mark and `continue_fetch` always reports the end
/// of pages; both limits are reported through the capability flags.
#[derive(Debug)]
pub struct SearchTarget {
    descriptor: TargetDescriptor,
}

impl SearchTarget {
    /// Creates a target for a search expression.
    pub fn new(query: impl Into<String>) -> ConfigResult<Self> {
        Ok(Self {
            descriptor: TargetDescriptor::new(StrategyKind::Search, query)?,
        })
    }

    /// Rebuilds a target from a persisted descriptor.
    pub fn from_descriptor(descriptor: TargetDescriptor) -> ConfigResult<Self> {
        if descriptor.kind() != StrategyKind::Search {
            return Err(ConfigError::KindMismatch {
                expected: StrategyKind::Search,
                got: descriptor.kind(),
            });
        }
        if descriptor.query().is_empty() {
            return Err(ConfigError::EmptyQuery);
        }
        Ok(Self { descriptor })
    }

    /// The search expression this target runs.
    pub fn query(&self) -> &str {
        self.descriptor.query()
    }

    fn run_search(&self, ctx: &FetchContext<'_>) -> FetchResult<Vec<RemoteRecord>> {
        let request = RestRequest::for_search(ctx.api_version(), self.descriptor.query());
        let response = ctx.transport().send(&request)?;
        Ok(response.records()?)
    }
}

impl FetchStrategy for SearchTarget {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Search
    }

    fn descriptor(&self) -> &TargetDescriptor {
        &self.descriptor
    }

    fn supports_incremental_filter(&self) -> bool {
        false
    }

    fn supports_pagination(&self) -> bool {
        false
    }

    /// Runs the search and returns all matching records.
    ///
    /// The search mechanism has no modification-time filter, so
    /// `high_water_mark` is ignored; every fetch is a full fetch.
    fn start_fetch(
        &mut self,
        ctx: &FetchContext<'_>,
        _high_water_mark: HighWaterMark,
    ) -> FetchResult<Vec<RemoteRecord>> {
        let records = self.run_search(ctx)?;
        self.descriptor.set_total_size(records.len() as u64);
        Ok(records)
    }

    /// Always the end of pages: search answers in a single batch.
    fn continue_fetch(
        &mut self,
        _ctx: &FetchContext<'_>,
    ) -> FetchResult<Option<Vec<RemoteRecord>>> {
        Ok(None)
    }

    /// Re-runs the same search, unfiltered, and extracts the matching ids.
    ///
    /// Failures here degrade to a [`RemoteIdListing::Partial`] instead of
    /// propagating, so a transient error cannot abort the caller's whole
    /// reconciliation pass. Callers must treat a partial listing as "no
    /// confirmed ids", not as the remote set.
    fn list_remote_ids(
        &self,
        ctx: &FetchContext<'_>,
        known_local_ids: Option<&HashSet<RecordId>>,
    ) -> Option<RemoteIdListing> {
        known_local_ids?;

        let records = match self.run_search(ctx) {
            Ok(records) => records,
            Err(error) => {
                warn!(query = self.descriptor.query(), %error, "remote id listing degraded");
                return Some(RemoteIdListing::Partial(HashSet::new()));
            }
        };

        let mut ids = HashSet::new();
        let mut missing = 0usize;
        for record in &records {
            match ctx.extractor().extract(record) {
                Some(id) => {
                    ids.insert(id);
                }
                None => missing += 1,
            }
        }

        if missing > 0 {
            warn!(
                query = self.descriptor.query(),
                missing, "records without an extractable id"
            );
            return Some(RemoteIdListing::Partial(ids));
        }
        Some(RemoteIdListing::Confirmed(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::error::FetchError;
    use crate::transport::MockTransport;
    use recsync_protocol::FieldIdExtractor;
    use serde_json::json;

    fn context<'a>(
        config: &'a FetchConfig,
        transport: &'a MockTransport,
        extractor: &'a FieldIdExtractor,
    ) -> FetchContext<'a> {
        FetchContext::new(config, transport, extractor)
    }

    #[test]
    fn start_fetch_returns_records_and_records_total_size() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_response(json!([
            {"id": "001"}, {"id": "002"}, {"id": "003"}
        ]));

        let mut target = SearchTarget::new("FIND {Acme}").unwrap();
        assert_eq!(target.total_size(), None);

        let records = target
            .start_fetch(&context(&config, &transport, &extractor), 0)
            .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(target.total_size(), Some(3));
    }

    #[test]
    fn start_fetch_empty_result_sets_total_size_to_zero() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_response(json!([]));

        let mut target = SearchTarget::new("FIND {Nothing}").unwrap();
        let records = target
            .start_fetch(&context(&config, &transport, &extractor), 0)
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(target.total_size(), Some(0));
    }

    #[test]
    fn high_water_mark_does_not_change_the_request() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_response(json!([]));
        transport.push_response(json!([]));

        let mut target = SearchTarget::new("FIND {Acme}").unwrap();
        let ctx = context(&config, &transport, &extractor);
        target.start_fetch(&ctx, 0).unwrap();
        target.start_fetch(&ctx, 1_700_000_000_000).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0], requests[1]);
        assert!(!target.supports_incremental_filter());
    }

    #[test]
    fn start_fetch_propagates_transport_errors() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_error(FetchError::transport_retryable("connection reset"));

        let mut target = SearchTarget::new("FIND {Acme}").unwrap();
        let err = target
            .start_fetch(&context(&config, &transport, &extractor), 0)
            .unwrap_err();
        assert!(err.is_retryable());
        // A failed fetch leaves total_size untouched
        assert_eq!(target.total_size(), None);
    }

    #[test]
    fn start_fetch_propagates_malformed_responses() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_response(json!({"unexpected": "object"}));

        let mut target = SearchTarget::new("FIND {Acme}").unwrap();
        let err = target
            .start_fetch(&context(&config, &transport, &extractor), 0)
            .unwrap_err();
        assert!(matches!(err, FetchError::Response(_)));
    }

    #[test]
    fn continue_fetch_is_always_the_end_of_pages() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();

        let mut target = SearchTarget::new("FIND {Acme}").unwrap();
        let ctx = context(&config, &transport, &extractor);
        assert!(target.continue_fetch(&ctx).unwrap().is_none());
        assert!(target.continue_fetch(&ctx).unwrap().is_none());
        assert!(!target.supports_pagination());
        // No request goes out for a mechanism that never paginates
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn list_remote_ids_without_baseline_returns_none() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();

        let target = SearchTarget::new("FIND {Acme}").unwrap();
        let listing = target.list_remote_ids(&context(&config, &transport, &extractor), None);
        assert!(listing.is_none());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn list_remote_ids_is_not_filtered_by_the_baseline() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_response(json!([{"id": "001"}, {"id": "003"}]));

        let known: HashSet<RecordId> = ["001", "002"].iter().map(|s| RecordId::new(*s)).collect();
        let target = SearchTarget::new("FIND {Acme}").unwrap();
        let listing = target
            .list_remote_ids(&context(&config, &transport, &extractor), Some(&known))
            .unwrap();

        assert!(!listing.is_degraded());
        let expected: HashSet<RecordId> = ["001", "003"].iter().map(|s| RecordId::new(*s)).collect();
        assert_eq!(listing.into_ids(), expected);
    }

    #[test]
    fn list_remote_ids_degrades_on_transport_failure() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_error(FetchError::transport_retryable("connection reset"));

        let known = HashSet::from([RecordId::new("001")]);
        let target = SearchTarget::new("FIND {Acme}").unwrap();
        let listing = target
            .list_remote_ids(&context(&config, &transport, &extractor), Some(&known))
            .unwrap();

        assert!(listing.is_degraded());
        assert!(listing.is_empty());
    }

    #[test]
    fn list_remote_ids_degrades_on_malformed_response() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_response(json!("not an array"));

        let known = HashSet::from([RecordId::new("001")]);
        let target = SearchTarget::new("FIND {Acme}").unwrap();
        let listing = target
            .list_remote_ids(&context(&config, &transport, &extractor), Some(&known))
            .unwrap();

        assert!(listing.is_degraded());
        assert!(listing.is_empty());
    }

    #[test]
    fn records_without_ids_demote_the_listing_to_partial() {
        let config = FetchConfig::default();
        let transport = MockTransport::new();
        let extractor = FieldIdExtractor::default();
        transport.push_response(json!([{"id": "001"}, {"name": "no id"}]));

        let known = HashSet::from([RecordId::new("001")]);
        let target = SearchTarget::new("FIND {Acme}").unwrap();
        let listing = target
            .list_remote_ids(&context(&config, &transport, &extractor), Some(&known))
            .unwrap();

        assert!(listing.is_degraded());
        assert_eq!(listing.into_ids(), HashSet::from([RecordId::new("001")]));
    }

    #[test]
    fn descriptor_kind_must_match() {
        let descriptor = TargetDescriptor::new(StrategyKind::Query, "SELECT name").unwrap();
        let err = SearchTarget::from_descriptor(descriptor).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::KindMismatch {
                expected: StrategyKind::Search,
                got: StrategyKind::Query
            }
        ));
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(
            SearchTarget::new("").unwrap_err(),
            ConfigError::EmptyQuery
        ));
    }
}

//! The uniform fetch contract every concrete strategy implements.

use crate::config::FetchContext;
use crate::error::{ConfigResult, FetchResult};
use crate::target::{StrategyKind, TargetDescriptor};
use recsync_protocol::{RecordId, RemoteRecord};
use serde_json::Value;
use std::collections::HashSet;

/// Epoch-millisecond timestamp cursor for incremental fetches.
pub type HighWaterMark = i64;

/// Result of a reconciliation listing.
///
/// `Confirmed` means the full remote id set was retrieved and parsed.
/// `Partial` means the listing degraded on a transport or parse failure and
/// holds only the ids collected before the failure. An empty `Partial` set
/// means "no confirmed ids", never "zero remote records" — callers must not
/// treat it as evidence of remote deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteIdListing {
    /// The complete set of ids currently matching the target's query.
    Confirmed(HashSet<RecordId>),
    /// Whatever ids could be collected before a failure.
    Partial(HashSet<RecordId>),
}

impl RemoteIdListing {
    /// The collected ids.
    pub fn ids(&self) -> &HashSet<RecordId> {
        match self {
            RemoteIdListing::Confirmed(ids) | RemoteIdListing::Partial(ids) => ids,
        }
    }

    /// Consumes the listing, returning the collected ids.
    pub fn into_ids(self) -> HashSet<RecordId> {
        match self {
            RemoteIdListing::Confirmed(ids) | RemoteIdListing::Partial(ids) => ids,
        }
    }

    /// True when the listing may be missing remote ids.
    pub fn is_degraded(&self) -> bool {
        matches!(self, RemoteIdListing::Partial(_))
    }

    /// Number of collected ids.
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// True when no ids were collected.
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

/// The uniform contract a sync engine drives, regardless of which remote
/// query mechanism sits behind it.
///
/// The engine materializes a strategy from its descriptor, calls
/// [`start_fetch`](FetchStrategy::start_fetch) once,
/// [`continue_fetch`](FetchStrategy::continue_fetch) until it reports the
/// end of pages, and periodically
/// [`list_remote_ids`](FetchStrategy::list_remote_ids) to detect remote
/// deletions. All calls are synchronous and blocking, and the engine keeps
/// at most one fetch in flight per target.
pub trait FetchStrategy: Send + std::fmt::Debug {
    /// Discriminant of the concrete strategy.
    fn kind(&self) -> StrategyKind;

    /// The descriptor this strategy was built from.
    fn descriptor(&self) -> &TargetDescriptor;

    /// Whether `start_fetch` honors its high-water mark.
    ///
    /// Engines should plan a full reconciliation pass for strategies that
    /// return false here, since every fetch is unfiltered.
    fn supports_incremental_filter(&self) -> bool;

    /// Whether `continue_fetch` can ever yield another page.
    fn supports_pagination(&self) -> bool;

    /// Performs the initial remote fetch.
    ///
    /// `high_water_mark` requests only records modified at or after the
    /// given timestamp. A strategy whose mechanism has no incremental
    /// filtering capability is permitted to ignore it; such strategies
    /// document the limitation and report it via
    /// [`supports_incremental_filter`](FetchStrategy::supports_incremental_filter).
    fn start_fetch(
        &mut self,
        ctx: &FetchContext<'_>,
        high_water_mark: HighWaterMark,
    ) -> FetchResult<Vec<RemoteRecord>>;

    /// Retrieves the next page; `Ok(None)` marks the end of pages.
    ///
    /// Strategies whose mechanism returns all matches in a single response
    /// report the end of pages immediately.
    fn continue_fetch(&mut self, ctx: &FetchContext<'_>) -> FetchResult<Option<Vec<RemoteRecord>>>;

    /// Lists the ids currently matching this target's query, for deletion
    /// detection by the caller.
    ///
    /// Returns `None` when `known_local_ids` is absent: without a local
    /// baseline there is nothing to reconcile against. The listing is
    /// independent of any fetch cursor state and is never filtered by
    /// `known_local_ids`; the parameter exists for contract symmetry with
    /// strategies that use it for batching.
    fn list_remote_ids(
        &self,
        ctx: &FetchContext<'_>,
        known_local_ids: Option<&HashSet<RecordId>>,
    ) -> Option<RemoteIdListing>;

    /// Record count of the most recent `start_fetch`, if one has run.
    fn total_size(&self) -> Option<u64> {
        self.descriptor().total_size()
    }

    /// Serializes this strategy's descriptor to its wire document.
    fn to_document(&self) -> ConfigResult<Value> {
        self.descriptor().to_document()
    }
}

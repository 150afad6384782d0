//! # Recsync Target
//!
//! Pluggable sync-down fetch targets for a record synchronization engine.
//!
//! This crate provides:
//! - [`FetchStrategy`], the uniform contract a sync engine drives
//! - [`SearchTarget`], the full-text-search strategy
//! - [`StrategyRegistry`] for materializing strategies from descriptors
//! - [`Transport`] abstraction with an HTTP adapter seam and a mock
//!
//! ## Architecture
//!
//! A sync engine holds a [`TargetDescriptor`], asks [`StrategyRegistry`] to
//! materialize the strategy, then calls `start_fetch` once,
//! `continue_fetch` until it reports the end of pages, and periodically
//! `list_remote_ids` to detect remote deletions.
//!
//! The remote exposes several incompatible query mechanisms. Each concrete
//! strategy drives one mechanism and reports the capabilities it lacks via
//! `supports_incremental_filter`/`supports_pagination` instead of silently
//! misbehaving; engines adapt their reconciliation plan accordingly.
//!
//! ## Key invariants
//!
//! - `start_fetch`/`continue_fetch` failures always propagate to the
//!   caller, which owns retry policy.
//! - `list_remote_ids` never fails: it degrades to a
//!   [`RemoteIdListing::Partial`] so a transient error cannot abort a
//!   whole reconciliation pass.
//! - A descriptor's `totalSize` reflects only the latest initial fetch.
//! - Descriptors that cannot be understood are refused, never defaulted.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod registry;
mod search;
mod strategy;
mod target;
mod transport;

pub use config::{FetchConfig, FetchContext, DEFAULT_API_VERSION};
pub use error::{ConfigError, ConfigResult, FetchError, FetchResult};
pub use http::{HttpClient, HttpTransport};
pub use registry::StrategyRegistry;
pub use search::SearchTarget;
pub use strategy::{FetchStrategy, HighWaterMark, RemoteIdListing};
pub use target::{StrategyKind, TargetDescriptor, TOTAL_SIZE_UNSET};
pub use transport::{MockTransport, Transport};

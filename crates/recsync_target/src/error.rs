//! Error types for fetch targets.

use crate::target::StrategyKind;
use recsync_protocol::ProtocolError;
use thiserror::Error;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for descriptor handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while fetching records from the remote source.
///
/// Fetch errors are always propagated to the caller; whether to retry or
/// abort the target's sync is the caller's policy. The `retryable` flag on
/// transport errors is advisory input to that policy.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network or transport error.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// The remote answered with something outside the response contract.
    #[error("malformed response: {0}")]
    Response(#[from] ProtocolError),
}

impl FetchError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if this error can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { retryable, .. } => *retryable,
            FetchError::Response(_) => false,
        }
    }
}

/// Errors raised while materializing a strategy from a descriptor.
///
/// These are fatal to the target: a descriptor that cannot be understood is
/// never silently defaulted.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The descriptor document could not be deserialized.
    #[error("malformed descriptor: {0}")]
    Malformed(String),

    /// The discriminant tag is not part of the wire contract.
    #[error("unknown strategy kind: {kind:?}")]
    UnknownKind {
        /// The unrecognized tag.
        kind: String,
    },

    /// The discriminant names a strategy this crate does not provide.
    #[error("unsupported strategy kind: {kind}")]
    UnsupportedKind {
        /// The recognized but unsupported kind.
        kind: StrategyKind,
    },

    /// The descriptor belongs to a different concrete strategy.
    #[error("descriptor kind mismatch: expected {expected}, got {got}")]
    KindMismatch {
        /// Kind the strategy requires.
        expected: StrategyKind,
        /// Kind found in the descriptor.
        got: StrategyKind,
    },

    /// The query expression is required and must be non-empty.
    #[error("query must be a non-empty string")]
    EmptyQuery,
}

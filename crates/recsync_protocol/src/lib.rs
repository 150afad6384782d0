//! # Recsync Protocol
//!
//! Wire vocabulary for recsync fetch targets.
//!
//! This crate provides:
//! - `RemoteRecord` and `RecordId` for records returned by the remote source
//! - `IdExtractor` for locating identifiers in arbitrary record shapes
//! - `RestRequest`/`RestResponse`, the request vocabulary consumed by the
//!   transport layer
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod record;
mod request;

pub use error::{ProtocolError, ProtocolResult};
pub use record::{FieldIdExtractor, IdExtractor, RecordId, RemoteRecord, DEFAULT_ID_FIELD};
pub use request::{RestRequest, RestResponse};

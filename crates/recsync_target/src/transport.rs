//! Transport seam between fetch targets and the remote REST API.

use crate::error::{FetchError, FetchResult};
use parking_lot::Mutex;
use recsync_protocol::{RestRequest, RestResponse};
use std::collections::VecDeque;

/// Executes read requests against the remote source.
///
/// Implementations own request execution, authentication, and session
/// handling. The sync engine keeps at most one fetch in flight per target,
/// so implementations need no coordination beyond `Send + Sync`.
pub trait Transport: Send + Sync {
    /// Sends a request and returns its parsed JSON body.
    fn send(&self, request: &RestRequest) -> FetchResult<RestResponse>;
}

/// A programmable transport for tests.
///
/// Responses are served in FIFO order; an exhausted queue yields a fatal
/// transport error. Every request sent is recorded for inspection.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<FetchResult<RestResponse>>>,
    requests: Mutex<Vec<RestRequest>>,
}

impl MockTransport {
    /// Creates a mock with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful JSON response.
    pub fn push_response(&self, body: serde_json::Value) {
        self.responses.lock().push_back(Ok(RestResponse::new(body)));
    }

    /// Queues a failure.
    pub fn push_error(&self, error: FetchError) {
        self.responses.lock().push_back(Err(error));
    }

    /// The requests seen so far, in order.
    pub fn requests(&self) -> Vec<RestRequest> {
        self.requests.lock().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &RestRequest) -> FetchResult<RestResponse> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::transport_fatal("no mock response queued")))
    }
}

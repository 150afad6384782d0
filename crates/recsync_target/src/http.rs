//! HTTP-backed transport.
//!
//! The actual HTTP client is abstracted via a trait so different
//! implementations (reqwest, ureq, hyper) can back the transport without
//! this crate depending on one.

use crate::error::{FetchError, FetchResult};
use crate::transport::Transport;
use parking_lot::RwLock;
use recsync_protocol::{RestRequest, RestResponse};
use std::sync::atomic::{AtomicBool, Ordering};

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP layer, including any
/// authentication headers the remote requires.
pub trait HttpClient: Send + Sync {
    /// Issues a GET request and returns the response body bytes.
    fn get(&self, url: &str) -> Result<Vec<u8>, String>;

    /// Checks if the client is connected/healthy.
    fn is_healthy(&self) -> bool;
}

/// HTTP-based fetch transport.
///
/// Renders requests against a base URL and parses response bodies as JSON.
/// Client failures are reported as retryable transport errors and flip the
/// connected state until a later request succeeds.
pub struct HttpTransport<C: HttpClient> {
    base_url: String,
    client: C,
    connected: AtomicBool,
    last_error: RwLock<Option<String>>,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            connected: AtomicBool::new(true),
            last_error: RwLock::new(None),
        }
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the last request succeeded and the client reports healthy.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst) && self.client.is_healthy()
    }

    /// The last transport error message, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    fn set_error(&self, err: &str) {
        *self.last_error.write() = Some(err.to_string());
    }

    fn clear_error(&self) {
        *self.last_error.write() = None;
    }
}

impl<C: HttpClient> Transport for HttpTransport<C> {
    fn send(&self, request: &RestRequest) -> FetchResult<RestResponse> {
        let url = format!("{}{}", self.base_url, request.to_path_and_query());

        let body = self.client.get(&url).map_err(|e| {
            self.set_error(&e);
            self.connected.store(false, Ordering::SeqCst);
            FetchError::transport_retryable(e)
        })?;

        self.clear_error();
        self.connected.store(true, Ordering::SeqCst);

        Ok(RestResponse::from_slice(&body)?)
    }
}

//! Fetch configuration and the per-call collaborator bundle.

use crate::transport::Transport;
use recsync_protocol::{FieldIdExtractor, IdExtractor, DEFAULT_ID_FIELD};

/// Default remote API version requested by fetch targets.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Configuration shared by all fetch targets of a sync client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Remote API version used when building requests.
    pub api_version: String,
    /// Name of the field carrying record identifiers.
    pub id_field: String,
}

impl FetchConfig {
    /// Creates a configuration for an API version.
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            id_field: DEFAULT_ID_FIELD.into(),
        }
    }

    /// Sets the identifier field name.
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Builds the conventional extractor for this configuration.
    pub fn id_extractor(&self) -> FieldIdExtractor {
        FieldIdExtractor::new(self.id_field.clone())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_VERSION)
    }
}

/// Collaborators lent to every fetch operation.
///
/// Strategies stay plain serializable data; the sync engine owns the
/// transport and extractor and hands them in per call.
pub struct FetchContext<'a> {
    config: &'a FetchConfig,
    transport: &'a dyn Transport,
    extractor: &'a dyn IdExtractor,
}

impl<'a> FetchContext<'a> {
    /// Bundles the collaborators for a fetch call.
    pub fn new(
        config: &'a FetchConfig,
        transport: &'a dyn Transport,
        extractor: &'a dyn IdExtractor,
    ) -> Self {
        Self {
            config,
            transport,
            extractor,
        }
    }

    /// The API version requests are built against.
    pub fn api_version(&self) -> &str {
        &self.config.api_version
    }

    /// The transport executing requests.
    pub fn transport(&self) -> &dyn Transport {
        self.transport
    }

    /// The extractor locating record identifiers.
    pub fn extractor(&self) -> &dyn IdExtractor {
        self.extractor
    }
}

//! Dependency initialization and wiring for the search client.

use tracing::info;

use crate::config::Settings;
use crate::ClientError;
use search_client_repository::SearchClient;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured client ready to build requests.
    pub client: SearchClient,
}

impl Dependencies {
    /// Initialize all dependencies from settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ClientError)` - If initialization fails
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        info!(
            endpoint = %settings.endpoint,
            max_batch_size = ?settings.max_batch_size,
            timeout = ?settings.request_timeout,
            "Initializing dependencies"
        );

        let client = SearchClient::connect(settings.client_config()).map_err(|e| {
            ClientError::config(format!("Failed to create search client: {}", e))
        })?;

        Ok(Self { client })
    }
}

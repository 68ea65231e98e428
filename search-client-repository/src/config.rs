//! Configuration types for the SearchClient.

use std::time::Duration;

/// Default search engine endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9200";

/// Configuration for the SearchClient.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Base URL of the search engine, without a trailing slash.
    pub endpoint: String,
    /// Maximum number of actions allowed in a single bulk request.
    /// Set to None to disable the limit (not recommended for production).
    pub max_batch_size: Option<usize>,
    /// Per-request timeout handed to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_batch_size: Some(1000),
            request_timeout: None,
        }
    }
}

impl SearchClientConfig {
    /// Create a config for the given endpoint with default limits.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint.into()),
            ..Default::default()
        }
    }

    /// Remove the bulk batch size limit (use with caution).
    pub fn unlimited(mut self) -> Self {
        self.max_batch_size = None;
        self
    }

    /// Set a custom bulk batch size limit.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

fn normalize_endpoint(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_batch_size, Some(1000));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let config = SearchClientConfig::new("http://search:9200//");
        assert_eq!(config.endpoint, "http://search:9200");
    }

    #[test]
    fn test_builders() {
        let config = SearchClientConfig::new("http://search:9200")
            .with_max_batch_size(10)
            .with_request_timeout(Duration::from_secs(2));
        assert_eq!(config.max_batch_size, Some(10));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(2)));

        assert!(config.unlimited().max_batch_size.is_none());
    }
}

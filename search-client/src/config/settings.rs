//! Settings read from the environment.

use std::env;
use std::time::Duration;

use search_client_repository::config::DEFAULT_ENDPOINT;
use search_client_repository::SearchClientConfig;

use crate::ClientError;

/// Default maximum number of actions per bulk request.
const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Process settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub max_batch_size: Option<usize>,
    pub request_timeout: Option<Duration>,
    pub json_logs: bool,
    pub document_id: Option<String>,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_ENDPOINT`: Search engine URL (default: http://localhost:9200)
    /// - `SEARCH_MAX_BATCH_SIZE`: Bulk batch limit, `0` disables it (default: 1000)
    /// - `SEARCH_TIMEOUT_MS`: Per-request timeout in milliseconds (default: none)
    /// - `LOG_FORMAT`: `json` for JSON log lines (default: human readable)
    /// - `SEARCH_ID`: Fetch this document instead of searching (default: none)
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let endpoint = lookup("SEARCH_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let max_batch_size = match lookup("SEARCH_MAX_BATCH_SIZE") {
            Some(raw) => match parse_number(&raw, "SEARCH_MAX_BATCH_SIZE")? {
                0 => None,
                max => Some(max as usize),
            },
            None => Some(DEFAULT_MAX_BATCH_SIZE),
        };

        let request_timeout = lookup("SEARCH_TIMEOUT_MS")
            .map(|raw| parse_number(&raw, "SEARCH_TIMEOUT_MS").map(Duration::from_millis))
            .transpose()?;

        let json_logs = lookup("LOG_FORMAT").is_some_and(|format| format.eq_ignore_ascii_case("json"));

        let document_id = lookup("SEARCH_ID")
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Ok(Self {
            endpoint,
            max_batch_size,
            request_timeout,
            json_logs,
            document_id,
        })
    }

    /// Client configuration derived from these settings.
    pub fn client_config(&self) -> SearchClientConfig {
        let mut config = SearchClientConfig::new(self.endpoint.as_str());
        config.max_batch_size = self.max_batch_size;
        config.request_timeout = self.request_timeout;
        config
    }
}

fn parse_number(raw: &str, key: &str) -> Result<u64, ClientError> {
    raw.trim()
        .parse()
        .map_err(|e| ClientError::config(format!("{} must be a number: {}", key, e)))
}

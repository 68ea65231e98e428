//! OpenSearch transport implementation.
//!
//! This module provides the concrete implementation of `Transport` using the
//! OpenSearch Rust client's low-level `send`.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    http::headers::{HeaderMap, HeaderValue, CONTENT_TYPE},
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::Method,
    OpenSearch,
};
use tracing::{debug, info};
use url::Url;

use crate::config::SearchClientConfig;
use crate::errors::SearchError;
use crate::interfaces::{HttpMethod, Transport, TransportResponse};

/// Transport sending requests through an OpenSearch client.
///
/// # Example
///
/// ```ignore
/// let config = SearchClientConfig::new("http://localhost:9200");
/// let transport = OpenSearchTransport::new(&config)?;
/// let client = SearchClient::with_config(Arc::new(transport), config);
/// ```
pub struct OpenSearchTransport {
    client: OpenSearch,
    endpoint: String,
    timeout: Option<Duration>,
}

impl OpenSearchTransport {
    /// Create a new transport connected to the configured endpoint.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchTransport)` - A new transport instance
    /// * `Err(SearchError::ConnectionError)` - If the endpoint is invalid or setup fails
    pub fn new(config: &SearchClientConfig) -> Result<Self, SearchError> {
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        let parsed_url =
            Url::parse(&endpoint).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            endpoint = %endpoint,
            timeout = ?config.request_timeout,
            "Created OpenSearch transport"
        );

        Ok(Self {
            client,
            endpoint,
            timeout: config.request_timeout,
        })
    }

    /// The path and query of `url` relative to the endpoint.
    fn relative_path<'u>(&self, url: &'u str) -> Result<&'u str, SearchError> {
        url.strip_prefix(self.endpoint.as_str())
            .filter(|path| path.is_empty() || path.starts_with('/'))
            .ok_or_else(|| {
                SearchError::transport(format!(
                    "URL {} is outside endpoint {}",
                    url, self.endpoint
                ))
            })
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::Get,
            HttpMethod::Post => Method::Post,
            HttpMethod::Put => Method::Put,
            HttpMethod::Delete => Method::Delete,
            HttpMethod::Head => Method::Head,
        }
    }
}

#[async_trait]
impl Transport for OpenSearchTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&[u8]>,
        content_type: &str,
    ) -> Result<TransportResponse, SearchError> {
        let path = self.relative_path(url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type)
                .map_err(|e| SearchError::transport(format!("invalid content type: {}", e)))?,
        );

        let response = self
            .client
            .send(
                Self::method(method),
                path,
                headers,
                None::<&()>,
                body.map(<[u8]>::to_vec),
                self.timeout,
            )
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let status = response.status_code().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?
            .into_bytes();

        debug!(status = status, bytes = body.len(), "Received response");

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(endpoint: &str) -> OpenSearchTransport {
        OpenSearchTransport::new(&SearchClientConfig::new(endpoint)).unwrap()
    }

    #[test]
    fn test_relative_path() {
        let transport = transport("http://localhost:9200");

        assert_eq!(
            transport
                .relative_path("http://localhost:9200/persons/_search?size=1")
                .unwrap(),
            "/persons/_search?size=1"
        );
    }

    #[test]
    fn test_relative_path_with_prefix() {
        let transport = transport("http://proxy:8080/search/");

        assert_eq!(
            transport.relative_path("http://proxy:8080/search/_bulk").unwrap(),
            "/_bulk"
        );
    }

    #[test]
    fn test_relative_path_outside_endpoint() {
        let transport = transport("http://localhost:9200");

        assert!(matches!(
            transport.relative_path("http://elsewhere:9200/persons"),
            Err(SearchError::TransportError(_))
        ));
        assert!(transport
            .relative_path("http://localhost:92000/persons")
            .is_err());
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = OpenSearchTransport::new(&SearchClientConfig::new("not a url"));
        assert!(matches!(result, Err(SearchError::ConnectionError(_))));
    }

    #[test]
    fn test_method_mapping() {
        assert!(matches!(
            OpenSearchTransport::method(HttpMethod::Post),
            Method::Post
        ));
        assert!(matches!(
            OpenSearchTransport::method(HttpMethod::Get),
            Method::Get
        ));
    }
}

//! Transport trait definition.
//!
//! This module defines the abstract HTTP exchange used by every request
//! the client sends, allowing the OpenSearch-backed transport to be
//! swapped for a mock in tests.

use std::fmt;

use async_trait::async_trait;

use crate::errors::SearchError;

/// Content type for JSON request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for newline-delimited JSON (bulk requests).
pub const CONTENT_TYPE_NDJSON: &str = "application/x-ndjson";

/// HTTP verb of an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        };
        f.write_str(verb)
    }
}

/// Raw result of an HTTP exchange.
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    /// HTTP status code. Not interpreted by the client; engine errors are
    /// detected from the payload shape.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// Abstract interface for sending requests to the search engine.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single transport is shared by
/// every request built from one client.
///
/// # Error Handling
///
/// Any failure to complete the exchange must be reported as
/// `SearchError::TransportError`. The client never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP verb
    /// * `url` - The full request URL, including the endpoint and query string
    /// * `body` - The request body, if any
    /// * `content_type` - Content type of the body
    ///
    /// # Returns
    ///
    /// * `Ok(TransportResponse)` - Status and raw body, whatever the status
    /// * `Err(SearchError)` - If the exchange could not be completed
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&[u8]>,
        content_type: &str,
    ) -> Result<TransportResponse, SearchError>;
}

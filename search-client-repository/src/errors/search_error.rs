//! Search error types.
//!
//! This module defines the error types that can occur while building,
//! sending and decoding search requests.

use search_client_shared::SearchResponse;
use thiserror::Error;

/// Errors that can occur during search client operations.
///
/// Engine-reported conditions (a missing document, a malformed query) are
/// not errors: they arrive as ordinary [`SearchResponse`] variants.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Failed to set up the transport to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The HTTP exchange with the search engine failed.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The response body is not a valid envelope.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Reading, parsing or rendering a request template failed.
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Failed to serialize a query object or document.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Hit payloads could not be decoded into the destination.
    ///
    /// The decoded envelope is kept so that timing and shard metadata stay
    /// available to the caller.
    #[error("Hydration error: {message}")]
    HydrationError {
        message: String,
        response: Box<SearchResponse>,
    },

    /// The bulk request was rejected by the engine.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create a template error.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::TemplateError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a hydration error carrying the decoded response.
    pub fn hydration(msg: impl Into<String>, response: SearchResponse) -> Self {
        Self::HydrationError {
            message: msg.into(),
            response: Box::new(response),
        }
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// The response that accompanied the failure, if any.
    pub fn response(&self) -> Option<&SearchResponse> {
        match self {
            Self::HydrationError { response, .. } => Some(response),
            _ => None,
        }
    }
}

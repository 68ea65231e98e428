//! OpenSearch implementation of the client capabilities.
//!
//! This module provides the production `Transport` backed by the OpenSearch
//! client, and builders for common query bodies.

pub mod queries;
mod transport;

pub use transport::OpenSearchTransport;

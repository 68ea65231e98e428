//! # Search Client Repository
//!
//! This crate builds search requests, sends them through an injectable
//! transport, and hydrates matched documents into caller-supplied types.
//! It includes definitions for errors, interfaces, a template cache, and a
//! concrete transport for OpenSearch.

pub mod bulk;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod search;
pub mod templates;
pub mod types;

#[cfg(test)]
mod testing;

pub use bulk::{BulkAction, BulkOperation, BulkService};
pub use client::SearchClient;
pub use config::SearchClientConfig;
pub use errors::SearchError;
pub use interfaces::{HttpMethod, JsonQuery, Query, TemplateSource, Transport, TransportResponse};
pub use opensearch::OpenSearchTransport;
pub use search::{BodySource, Hydrate, ScrollService, SearchService};
pub use templates::{FileTemplateSource, TemplateStore};
pub use types::{BatchOperationResult, BatchOperationSummary};

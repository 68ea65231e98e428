//! Interface definitions for the search client.
//!
//! This module defines the capabilities the client consumes: the HTTP
//! transport, the template source and query objects. Each is a trait so
//! implementations can be injected and mocked.

mod query;
mod template_source;
mod transport;

pub use query::{JsonQuery, Query};
pub use template_source::TemplateSource;
pub use transport::{
    HttpMethod, Transport, TransportResponse, CONTENT_TYPE_JSON, CONTENT_TYPE_NDJSON,
};

//! # Search Client Shared
//!
//! Wire types shared between the search client crates: the decoded
//! response envelope, template data, and bulk response shapes. Field names
//! follow the search engine's REST format.

pub mod bulk;
pub mod response;
pub mod template;

pub use bulk::{BulkItem, BulkResponse};
pub use response::{
    DocumentResponse, ErrorResponse, Hit, HitsResponse, NotFoundResponse, SearchResponse,
    ShardsSummary, TotalHits,
};
pub use template::SearchTemplate;

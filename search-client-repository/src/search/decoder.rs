//! Response envelope decoder.
//!
//! Every field of every shape is optional on the wire; the shape is picked
//! from what is present. Engine errors win over not-found, which wins over
//! a found document, which wins over a hit list.

use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use tracing::error;

use search_client_shared::{
    DocumentResponse, ErrorResponse, Hit, HitsResponse, NotFoundResponse, SearchResponse,
    ShardsSummary, TotalHits,
};

use crate::errors::SearchError;

#[derive(Deserialize)]
struct RawEnvelope {
    took: Option<u64>,
    timed_out: Option<bool>,
    #[serde(rename = "_shards")]
    shards: Option<ShardsSummary>,
    hits: Option<RawHits>,
    #[serde(rename = "_scroll_id")]
    scroll_id: Option<String>,

    #[serde(rename = "_index")]
    index: Option<String>,
    #[serde(rename = "_type")]
    doc_type: Option<String>,
    #[serde(rename = "_id")]
    id: Option<String>,
    #[serde(rename = "_version")]
    version: Option<i64>,
    found: Option<bool>,
    #[serde(rename = "_source")]
    source: Option<Box<RawValue>>,

    error: Option<Value>,
    status: Option<u16>,
}

#[derive(Deserialize)]
struct RawHits {
    total: Option<TotalHits>,
    max_score: Option<f64>,
    #[serde(default)]
    hits: Vec<Hit>,
}

/// Decode a raw response body into a [`SearchResponse`].
///
/// Fails only when the body is not JSON or a present field has the wrong
/// type.
pub fn decode(body: &[u8]) -> Result<SearchResponse, SearchError> {
    let raw: RawEnvelope = serde_json::from_slice(body).map_err(|e| {
        error!(error = %e, "Failed to decode search response");
        SearchError::decode(e.to_string())
    })?;

    if let Some(error) = raw.error {
        return Ok(SearchResponse::Error(ErrorResponse {
            error,
            status: raw.status,
        }));
    }

    match raw.found {
        Some(false) => Ok(SearchResponse::NotFound(NotFoundResponse {
            index: raw.index.unwrap_or_default(),
            doc_type: raw.doc_type,
            id: raw.id.unwrap_or_default(),
        })),
        Some(true) => Ok(SearchResponse::Document(DocumentResponse {
            index: raw.index.unwrap_or_default(),
            doc_type: raw.doc_type,
            id: raw.id.unwrap_or_default(),
            version: raw.version,
            source: raw.source,
        })),
        None => {
            let (total, max_score, hits) = match raw.hits {
                Some(hits) => (hits.total, hits.max_score, hits.hits),
                None => (None, None, Vec::new()),
            };

            Ok(SearchResponse::Hits(HitsResponse {
                took: raw.took.unwrap_or_default(),
                timed_out: raw.timed_out.unwrap_or_default(),
                shards: raw.shards.unwrap_or_default(),
                total,
                max_score,
                hits,
                scroll_id: raw.scroll_id,
            }))
        }
    }
}

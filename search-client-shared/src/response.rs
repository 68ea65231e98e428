//! Response envelope types.
//!
//! A response from the search engine is exactly one of: a hit list, a
//! single found document, a not-found marker, or an engine error.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

/// Shard-count summary reported with every search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardsSummary {
    pub total: u64,
    pub successful: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Total hit count. Older engines send a bare number, newer ones an object
/// with a relation (`eq` or `gte`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Tracked { value: u64, relation: String },
}

impl TotalHits {
    /// The hit count regardless of representation.
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(value) => *value,
            TotalHits::Tracked { value, .. } => *value,
        }
    }
}

/// One matched document: engine metadata plus the untouched `_source`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index", default)]
    pub index: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Box<RawValue>>,
}

/// A normal search result.
#[derive(Debug, Clone, Default)]
pub struct HitsResponse {
    /// Server-side time in milliseconds.
    pub took: u64,
    pub timed_out: bool,
    pub shards: ShardsSummary,
    pub total: Option<TotalHits>,
    pub max_score: Option<f64>,
    /// Hits in the order the engine returned them.
    pub hits: Vec<Hit>,
    /// Present when the request opened or continued a scroll.
    pub scroll_id: Option<String>,
}

/// A single-document lookup that found its document.
#[derive(Debug, Clone)]
pub struct DocumentResponse {
    pub index: String,
    pub doc_type: Option<String>,
    pub id: String,
    pub version: Option<i64>,
    pub source: Option<Box<RawValue>>,
}

/// A single-document lookup miss (`found: false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundResponse {
    pub index: String,
    pub doc_type: Option<String>,
    pub id: String,
}

/// An error reported by the engine in the response payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    /// Either a plain string or the engine's structured error object.
    pub error: Value,
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Best-effort human readable reason.
    pub fn reason(&self) -> String {
        match &self.error {
            Value::String(reason) => reason.clone(),
            other => other
                .get("reason")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        }
    }

    /// The engine's error type, e.g. `index_not_found_exception`.
    pub fn error_type(&self) -> Option<&str> {
        self.error.get("type").and_then(Value::as_str)
    }
}

/// Decoded response envelope.
#[derive(Debug, Clone)]
pub enum SearchResponse {
    Hits(HitsResponse),
    Document(DocumentResponse),
    NotFound(NotFoundResponse),
    Error(ErrorResponse),
}

impl SearchResponse {
    /// Server-side timing, only reported for hit results.
    pub fn took(&self) -> Option<u64> {
        match self {
            SearchResponse::Hits(hits) => Some(hits.took),
            _ => None,
        }
    }

    /// Shard summary, only reported for hit results.
    pub fn shards(&self) -> Option<&ShardsSummary> {
        match self {
            SearchResponse::Hits(hits) => Some(&hits.shards),
            _ => None,
        }
    }

    /// The hit records; empty for every shape except `Hits`.
    pub fn hits(&self) -> &[Hit] {
        match self {
            SearchResponse::Hits(hits) => &hits.hits,
            _ => &[],
        }
    }

    pub fn scroll_id(&self) -> Option<&str> {
        match self {
            SearchResponse::Hits(hits) => hits.scroll_id.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SearchResponse::NotFound(_))
    }

    pub fn engine_error(&self) -> Option<&ErrorResponse> {
        match self {
            SearchResponse::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Whether documents can be hydrated from this response.
    pub fn has_payloads(&self) -> bool {
        matches!(self, SearchResponse::Hits(_) | SearchResponse::Document(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_hits_both_forms() {
        let bare: TotalHits = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(bare.value(), 7);

        let tracked: TotalHits =
            serde_json::from_value(json!({"value": 10000, "relation": "gte"})).unwrap();
        assert_eq!(tracked.value(), 10000);
        assert!(matches!(tracked, TotalHits::Tracked { ref relation, .. } if relation == "gte"));
    }

    #[test]
    fn test_hit_keeps_raw_source() {
        let hit: Hit = serde_json::from_str(
            r#"{"_index":"persons","_type":"person","_id":"1","_score":1.5,"_source":{"name":"a","age":1}}"#,
        )
        .unwrap();

        assert_eq!(hit.index, "persons");
        assert_eq!(hit.doc_type.as_deref(), Some("person"));
        assert_eq!(hit.score, Some(1.5));
        assert_eq!(hit.source.unwrap().get(), r#"{"name":"a","age":1}"#);
    }

    #[test]
    fn test_hit_null_score() {
        let hit: Hit = serde_json::from_str(r#"{"_index":"p","_id":"1","_score":null}"#).unwrap();
        assert!(hit.score.is_none());
        assert!(hit.source.is_none());
    }

    #[test]
    fn test_error_reason() {
        let structured = ErrorResponse {
            error: json!({"type": "index_not_found_exception", "reason": "no such index [x]"}),
            status: Some(404),
        };
        assert_eq!(structured.reason(), "no such index [x]");
        assert_eq!(structured.error_type(), Some("index_not_found_exception"));

        let plain = ErrorResponse {
            error: json!("bad request"),
            status: None,
        };
        assert_eq!(plain.reason(), "bad request");
        assert!(plain.error_type().is_none());
    }

    #[test]
    fn test_accessors_per_shape() {
        let hits = SearchResponse::Hits(HitsResponse {
            took: 3,
            ..Default::default()
        });
        assert_eq!(hits.took(), Some(3));
        assert!(hits.has_payloads());

        let missing = SearchResponse::NotFound(NotFoundResponse {
            index: "persons".to_string(),
            doc_type: None,
            id: "42".to_string(),
        });
        assert!(missing.is_not_found());
        assert!(missing.took().is_none());
        assert!(missing.hits().is_empty());
        assert!(!missing.has_payloads());
    }
}

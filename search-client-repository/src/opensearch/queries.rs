//! OpenSearch query builders.
//!
//! Small helpers producing request bodies as `serde_json::Value`. Every
//! helper returns a complete body (`{"query": ...}`) unless it is named
//! `*_clause`, in which case it returns a bare clause for composition with
//! [`bool_query`].

use serde_json::{json, Value};

/// Wrap a clause into a request body.
pub fn body(clause: Value) -> Value {
    json!({ "query": clause })
}

/// Match every document.
pub fn match_all() -> Value {
    body(json!({ "match_all": {} }))
}

/// Full-text match on a single field.
pub fn match_clause(field: &str, text: &str) -> Value {
    json!({ "match": { field: { "query": text } } })
}

/// Full-text match over several fields.
///
/// With `fuzzy` set, AUTO fuzziness tolerates minor typos:
/// 1-2 chars: 0 edits, 3-4 chars: 1 edit, 5+ chars: 2 edits.
pub fn multi_match_clause(text: &str, fields: &[&str], fuzzy: bool) -> Value {
    let mut clause = json!({
        "multi_match": {
            "query": text,
            "fields": fields
        }
    });
    if fuzzy {
        clause["multi_match"]["fuzziness"] = json!("AUTO");
    }
    clause
}

/// Prefix match on a phrase, boosted.
pub fn match_phrase_prefix_clause(field: &str, text: &str, boost: f64) -> Value {
    json!({
        "match_phrase_prefix": {
            field: {
                "query": text,
                "boost": boost
            }
        }
    })
}

/// Exact match on a keyword field.
pub fn term_clause(field: &str, value: impl Into<Value>) -> Value {
    json!({ "term": { field: value.into() } })
}

/// Exact match against any of several values.
pub fn terms_clause<V: Into<Value>>(field: &str, values: impl IntoIterator<Item = V>) -> Value {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    json!({ "terms": { field: values } })
}

/// Lookup by document ids.
pub fn ids(ids: &[&str]) -> Value {
    body(json!({ "ids": { "values": ids } }))
}

/// Combine clauses into a bool query body.
///
/// When `must` is empty, at least one `should` clause has to match.
pub fn bool_query(must: Vec<Value>, should: Vec<Value>, filter: Vec<Value>) -> Value {
    let mut bool_clause = serde_json::Map::new();
    let require_should = must.is_empty() && !should.is_empty();

    if !must.is_empty() {
        bool_clause.insert("must".to_string(), Value::Array(must));
    }
    if !should.is_empty() {
        bool_clause.insert("should".to_string(), Value::Array(should));
    }
    if !filter.is_empty() {
        bool_clause.insert("filter".to_string(), Value::Array(filter));
    }
    if require_should {
        bool_clause.insert("minimum_should_match".to_string(), json!(1));
    }

    body(json!({ "bool": bool_clause }))
}

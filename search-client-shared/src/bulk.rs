//! Bulk API response shapes.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Response to a `_bulk` request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub took: u64,
    /// True when at least one item failed.
    #[serde(default)]
    pub errors: bool,
    /// One entry per action, keyed by the action name (`index`, `create`).
    #[serde(default)]
    pub items: Vec<HashMap<String, BulkItem>>,
}

/// Outcome of a single bulk action.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkItem {
    #[serde(rename = "_index", default)]
    pub index: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub error: Option<Value>,
}

impl BulkItem {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }
}

//! Bulk indexing.
//!
//! Accumulates index/create actions and sends them as one NDJSON request to
//! the `_bulk` endpoint. Per-item outcomes are reported in request order;
//! nothing is retried.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, instrument, warn};

use search_client_shared::BulkResponse;

use crate::errors::SearchError;
use crate::interfaces::{HttpMethod, Transport, CONTENT_TYPE_NDJSON};
use crate::types::{BatchOperationResult, BatchOperationSummary};

/// Bulk action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOperation {
    /// Create or replace the document.
    Index,
    /// Create the document, failing if it already exists.
    Create,
}

impl BulkOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkOperation::Index => "index",
            BulkOperation::Create => "create",
        }
    }
}

/// One document write within a bulk request.
#[derive(Debug, Clone)]
pub struct BulkAction {
    operation: BulkOperation,
    target: String,
    subtype: Option<String>,
    id: String,
    source: Vec<u8>,
}

impl BulkAction {
    /// Create-or-replace `document` under `id`.
    pub fn index<T: Serialize + ?Sized>(
        target: impl Into<String>,
        id: impl Into<String>,
        document: &T,
    ) -> Result<Self, SearchError> {
        Self::new(BulkOperation::Index, target.into(), id.into(), document)
    }

    /// Create `document` under `id`; the item fails if it already exists.
    pub fn create<T: Serialize + ?Sized>(
        target: impl Into<String>,
        id: impl Into<String>,
        document: &T,
    ) -> Result<Self, SearchError> {
        Self::new(BulkOperation::Create, target.into(), id.into(), document)
    }

    fn new<T: Serialize + ?Sized>(
        operation: BulkOperation,
        target: String,
        id: String,
        document: &T,
    ) -> Result<Self, SearchError> {
        let source = serde_json::to_vec(document)
            .map_err(|e| SearchError::serialization(format!("document {}: {}", id, e)))?;
        Ok(Self {
            operation,
            target,
            subtype: None,
            id,
            source,
        })
    }

    /// Set the document type.
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn operation(&self) -> BulkOperation {
        self.operation
    }

    /// Append the action and source lines.
    fn write_ndjson(&self, out: &mut Vec<u8>) -> Result<(), SearchError> {
        let mut meta = Map::new();
        meta.insert("_index".to_string(), json!(self.target));
        if let Some(subtype) = &self.subtype {
            meta.insert("_type".to_string(), json!(subtype));
        }
        meta.insert("_id".to_string(), json!(self.id));

        let mut header = Map::new();
        header.insert(self.operation.as_str().to_string(), Value::Object(meta));
        serde_json::to_writer(&mut *out, &header)
            .map_err(|e| SearchError::serialization(e.to_string()))?;
        out.push(b'\n');
        out.extend_from_slice(&self.source);
        out.push(b'\n');
        Ok(())
    }
}

/// Builder and executor for a bulk request.
pub struct BulkService {
    transport: Arc<dyn Transport>,
    endpoint: String,
    max_batch_size: Option<usize>,
    actions: Vec<BulkAction>,
}

impl BulkService {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        endpoint: impl Into<String>,
        max_batch_size: Option<usize>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            max_batch_size,
            actions: Vec::new(),
        }
    }

    /// Queue an action.
    pub fn add(&mut self, action: BulkAction) -> &mut Self {
        self.actions.push(action);
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn url(&self) -> String {
        format!("{}/_bulk", self.endpoint)
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self) -> Result<(), SearchError> {
        if let Some(max) = self.max_batch_size {
            if self.actions.len() > max {
                return Err(SearchError::batch_size_exceeded(self.actions.len(), max));
            }
        }
        Ok(())
    }

    /// Serialize the queued actions as NDJSON.
    fn body(&self) -> Result<Vec<u8>, SearchError> {
        let mut body = Vec::with_capacity(self.actions.iter().map(|a| a.source.len() + 64).sum());
        for action in &self.actions {
            action.write_ndjson(&mut body)?;
        }
        Ok(body)
    }

    /// Send the queued actions.
    ///
    /// Queued actions are cleared once the engine has answered, whatever the
    /// per-item outcome. On a transport or decode failure they are kept.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-item results in request order
    /// * `Err(SearchError::BatchSizeExceeded)` - Too many queued actions
    /// * `Err(SearchError::BulkIndexError)` - The engine rejected the request as a whole
    #[instrument(skip(self), fields(action_count = self.actions.len()))]
    pub async fn execute(&mut self) -> Result<BatchOperationSummary, SearchError> {
        if self.actions.is_empty() {
            return Ok(BatchOperationSummary::default());
        }
        self.validate_batch_size()?;

        let url = self.url();
        let body = self.body()?;
        debug!(url = %url, bytes = body.len(), "Sending bulk request");

        let response = self
            .transport
            .send(HttpMethod::Post, &url, Some(&body), CONTENT_TYPE_NDJSON)
            .await?;

        let value: Value = serde_json::from_slice(&response.body)
            .map_err(|e| SearchError::decode(e.to_string()))?;
        if let Some(error) = value.get("error") {
            error!(status = response.status, error = %error, "Bulk request rejected");
            return Err(SearchError::bulk_index(error.to_string()));
        }
        let bulk: BulkResponse =
            serde_json::from_value(value).map_err(|e| SearchError::decode(e.to_string()))?;

        let actions = std::mem::take(&mut self.actions);
        let summary = Self::summarize(&actions, bulk);

        if summary.failed > 0 {
            warn!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Bulk request completed with failures"
            );
        } else {
            info!(count = summary.total, "Bulk request completed");
        }

        Ok(summary)
    }

    fn summarize(actions: &[BulkAction], response: BulkResponse) -> BatchOperationSummary {
        let results = response
            .items
            .into_iter()
            .enumerate()
            .filter_map(|(position, mut item)| {
                let (_, outcome) = item.drain().next()?;
                let id = if outcome.id.is_empty() {
                    actions
                        .get(position)
                        .map(|a| a.id.clone())
                        .unwrap_or_default()
                } else {
                    outcome.id.clone()
                };
                Some(BatchOperationResult {
                    id,
                    success: outcome.is_success(),
                    status: outcome.status,
                    error: outcome.error.map(|e| e.to_string()),
                })
            })
            .collect();

        BatchOperationSummary::from_results(results)
    }
}

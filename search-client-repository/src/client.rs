//! Search client implementation.
//!
//! This module provides the main entry point for talking to the search
//! engine. Application code uses it to start searches, scroll continuations
//! and bulk requests that share one transport and one template store.

use std::sync::Arc;

use tracing::info;

use crate::bulk::BulkService;
use crate::config::SearchClientConfig;
use crate::errors::SearchError;
use crate::interfaces::Transport;
use crate::opensearch::OpenSearchTransport;
use crate::search::{ScrollService, SearchService};
use crate::templates::TemplateStore;

/// The main client for interacting with the search engine.
///
/// Cheap to share: each request builder clones the transport and template
/// store handles, so builders are independent of each other.
pub struct SearchClient {
    transport: Arc<dyn Transport>,
    config: SearchClientConfig,
    templates: Arc<TemplateStore>,
}

impl SearchClient {
    /// Create a new SearchClient with default configuration.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, SearchClientConfig::default())
    }

    /// Create a new SearchClient with custom configuration.
    ///
    /// Templates are read from the filesystem through the process-wide store.
    pub fn with_config(transport: Arc<dyn Transport>, config: SearchClientConfig) -> Self {
        Self {
            transport,
            config,
            templates: TemplateStore::global(),
        }
    }

    /// Connect to the configured endpoint through OpenSearch.
    pub fn connect(config: SearchClientConfig) -> Result<Self, SearchError> {
        let transport = OpenSearchTransport::new(&config)?;
        info!(endpoint = %config.endpoint, "Search client ready");
        Ok(Self::with_config(Arc::new(transport), config))
    }

    /// Use `templates` instead of the process-wide store.
    pub fn with_template_store(mut self, templates: Arc<TemplateStore>) -> Self {
        self.templates = templates;
        self
    }

    pub fn config(&self) -> &SearchClientConfig {
        &self.config
    }

    pub fn templates(&self) -> &Arc<TemplateStore> {
        &self.templates
    }

    /// Start building a search or single-document request.
    pub fn search<'a>(&self) -> SearchService<'a> {
        SearchService::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.templates),
            self.config.endpoint.as_str(),
        )
    }

    /// Continue the scroll identified by `scroll_id`.
    pub fn scroll<'a>(&self, scroll_id: impl Into<String>) -> ScrollService<'a> {
        ScrollService::new(
            Arc::clone(&self.transport),
            self.config.endpoint.as_str(),
            scroll_id,
        )
    }

    /// Start a bulk request, limited by the configured batch size.
    pub fn bulk(&self) -> BulkService {
        BulkService::new(
            Arc::clone(&self.transport),
            self.config.endpoint.as_str(),
            self.config.max_batch_size,
        )
    }
}

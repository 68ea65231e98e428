//! Scroll continuation.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, instrument};

use search_client_shared::SearchResponse;

use crate::errors::SearchError;
use crate::interfaces::{HttpMethod, Query, Transport, CONTENT_TYPE_JSON};
use crate::search::decoder::decode;
use crate::search::hydrator::{complete, Hydrate};

/// Fetches the next page of a scroll opened with `SearchService::with_scroll`.
pub struct ScrollService<'a> {
    transport: Arc<dyn Transport>,
    endpoint: String,
    scroll_id: String,
    scroll: Option<String>,
    destination: Option<&'a mut (dyn Hydrate + Send)>,
}

impl<'a> ScrollService<'a> {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        endpoint: impl Into<String>,
        scroll_id: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            scroll_id: scroll_id.into(),
            scroll: None,
            destination: None,
        }
    }

    /// Extend the scroll context by `duration` (e.g. `"1m"`).
    pub fn with_scroll(mut self, duration: impl Into<String>) -> Self {
        self.scroll = Some(duration.into());
        self
    }

    pub fn with_destination<T: Hydrate + Send>(mut self, destination: &'a mut T) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn url(&self) -> String {
        format!("{}/_search/scroll", self.endpoint)
    }

    fn body(&self) -> Result<Vec<u8>, SearchError> {
        let mut body = json!({ "scroll_id": self.scroll_id });
        if let Some(scroll) = &self.scroll {
            body["scroll"] = json!(scroll);
        }
        body.to_bytes()
    }

    /// Fetch the next page and hydrate it into the destination.
    #[instrument(skip(self))]
    pub async fn execute(&mut self) -> Result<SearchResponse, SearchError> {
        let url = self.url();
        let body = self.body()?;

        debug!(url = %url, "Sending scroll request");

        let response = self
            .transport
            .send(HttpMethod::Post, &url, Some(&body), CONTENT_TYPE_JSON)
            .await?;
        let envelope = decode(&response.body)?;

        complete(envelope, self.destination.as_deref_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;

    #[tokio::test]
    async fn test_scroll_request() {
        let transport = Arc::new(MockTransport::new().respond_with(json!({
            "_scroll_id": "next",
            "took": 2,
            "hits": {"hits": [{"_source": {"a": 3}}]}
        })));

        let mut page: Vec<serde_json::Value> = Vec::new();
        let response = ScrollService::new(transport.clone(), "http://localhost:9200", "first")
            .with_scroll("1m")
            .with_destination(&mut page)
            .execute()
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://localhost:9200/_search/scroll");
        assert_eq!(request.body_json(), json!({"scroll": "1m", "scroll_id": "first"}));

        assert_eq!(response.scroll_id(), Some("next"));
        assert_eq!(page, vec![json!({"a": 3})]);
    }

    #[tokio::test]
    async fn test_scroll_without_duration() {
        let transport = Arc::new(MockTransport::new().respond_with(json!({"hits": {"hits": []}})));

        ScrollService::new(transport.clone(), "http://localhost:9200", "id")
            .execute()
            .await
            .unwrap();

        assert_eq!(transport.last_request().body_json(), json!({"scroll_id": "id"}));
    }
}

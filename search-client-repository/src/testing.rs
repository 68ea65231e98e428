//! Test doubles shared by the module tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use crate::interfaces::{HttpMethod, TemplateSource, Transport, TransportResponse};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Vec<u8>>,
    pub content_type: String,
}

impl RecordedRequest {
    pub fn body_json(&self) -> Value {
        serde_json::from_slice(self.body.as_deref().unwrap_or_default()).unwrap()
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(self.body.as_deref().unwrap_or_default()).unwrap()
    }
}

/// Mock transport that records every exchange and replays canned responses.
///
/// Responses are served in order; the last one repeats once the list is
/// exhausted.
pub struct MockTransport {
    responses: Vec<Result<TransportResponse, String>>,
    served: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            served: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_with(self, body: Value) -> Self {
        self.respond_status(200, body)
    }

    pub fn respond_status(mut self, status: u16, body: Value) -> Self {
        self.responses.push(Ok(TransportResponse {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        }));
        self
    }

    pub fn respond_raw(mut self, body: &[u8]) -> Self {
        self.responses.push(Ok(TransportResponse {
            status: 200,
            body: body.to_vec(),
        }));
        self
    }

    pub fn fail_with(mut self, message: &str) -> Self {
        self.responses.push(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&[u8]>,
        content_type: &str,
    ) -> Result<TransportResponse, SearchError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body: body.map(<[u8]>::to_vec),
            content_type: content_type.to_string(),
        });

        let served = self.served.fetch_add(1, Ordering::SeqCst);
        let index = served.min(self.responses.len().saturating_sub(1));
        match self.responses.get(index) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(SearchError::transport(message.clone())),
            None => Ok(TransportResponse {
                status: 200,
                body: b"{}".to_vec(),
            }),
        }
    }
}

/// In-memory template source counting how often it is read.
pub struct CountingTemplateSource {
    templates: Mutex<HashMap<String, String>>,
    delay: Option<Duration>,
    pub reads: AtomicUsize,
}

impl CountingTemplateSource {
    pub fn new() -> Self {
        Self {
            templates: Mutex::new(HashMap::new()),
            delay: None,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn with_template(self, key: &str, source: &str) -> Self {
        self.set_template(key, source);
        self
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_template(&self, key: &str, source: &str) {
        self.templates
            .lock()
            .unwrap()
            .insert(key.to_string(), source.to_string());
    }
}

impl TemplateSource for CountingTemplateSource {
    fn read(&self, key: &str) -> Result<Vec<u8>, SearchError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.templates
            .lock()
            .unwrap()
            .get(key)
            .map(|source| source.clone().into_bytes())
            .ok_or_else(|| SearchError::template(format!("no template {}", key)))
    }
}

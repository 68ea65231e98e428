//! Search request builder.
//!
//! A `SearchService` accumulates the facets of one request and turns them
//! into a single HTTP exchange on `execute`. It is owned by one caller and
//! is not meant to be shared between tasks.

use std::collections::BTreeMap;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use tracing::{debug, error, instrument};
use url::form_urlencoded;

use search_client_shared::SearchResponse;

use crate::errors::SearchError;
use crate::interfaces::{HttpMethod, Query, Transport, CONTENT_TYPE_JSON};
use crate::search::decoder::decode;
use crate::search::hydrator::{complete, Hydrate};
use crate::templates::TemplateStore;

const PARAM_FROM: &str = "from";
const PARAM_SIZE: &str = "size";
const PARAM_SCROLL: &str = "scroll";

/// Characters escaped inside a path segment. Commas and wildcards stay
/// literal so multi-target patterns like `a,b*` keep working.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Where the request body came from. Each setter replaces the previous
/// source as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodySource {
    #[default]
    None,
    Raw(Vec<u8>),
    Query(Vec<u8>),
    Template(Vec<u8>),
}

impl BodySource {
    /// The body bytes, if any were set and they are non-empty.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            BodySource::None => None,
            BodySource::Raw(bytes) | BodySource::Query(bytes) | BodySource::Template(bytes) => {
                Some(bytes.as_slice()).filter(|bytes| !bytes.is_empty())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_none()
    }
}

/// Builder for a search or single-document request.
///
/// # Example
///
/// ```ignore
/// let mut persons: Vec<Person> = Vec::new();
/// let response = client
///     .search()
///     .with_target("persons")
///     .with_query(&queries::match_all())?
///     .with_from(0)
///     .with_size(10)
///     .with_destination(&mut persons)
///     .execute()
///     .await?;
/// ```
pub struct SearchService<'a> {
    transport: Arc<dyn Transport>,
    templates: Arc<TemplateStore>,
    endpoint: String,
    target: String,
    subtype: Option<String>,
    identifier: Option<String>,
    body: BodySource,
    destination: Option<&'a mut (dyn Hydrate + Send)>,
    parameters: BTreeMap<&'static str, String>,
}

impl<'a> SearchService<'a> {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        templates: Arc<TemplateStore>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            templates,
            endpoint: endpoint.into(),
            target: String::new(),
            subtype: None,
            identifier: None,
            body: BodySource::None,
            destination: None,
            parameters: BTreeMap::new(),
        }
    }

    /// Set the collection (index) to query.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the document type. It is kept on the request but never becomes
    /// part of the URL.
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Look up a single document instead of searching.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Use `body` verbatim as the request body.
    pub fn with_raw_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = BodySource::Raw(body.into());
        self
    }

    /// Serialize `query` now and use it as the request body.
    pub fn with_query<Q: Query + ?Sized>(mut self, query: &Q) -> Result<Self, SearchError> {
        self.body = BodySource::Query(query.to_bytes()?);
        Ok(self)
    }

    /// Render the template `name` under `path` and use it as the request body.
    ///
    /// A template that cannot be read, parsed or rendered is logged and
    /// ignored: the previous body stays in place.
    pub fn with_template<T: Serialize + ?Sized>(
        mut self,
        path: &str,
        name: &str,
        data: &T,
        force_reload: bool,
    ) -> Self {
        match self.templates.render(path, name, data, force_reload) {
            Ok(rendered) => self.body = BodySource::Template(rendered),
            Err(e) => {
                error!(
                    key = %TemplateStore::key(path, name),
                    error = %e,
                    "Failed to render search template, keeping previous body"
                );
            }
        }
        self
    }

    /// Hydrate matched documents into `destination` on execute.
    pub fn with_destination<T: Hydrate + Send>(mut self, destination: &'a mut T) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_from(mut self, from: i64) -> Self {
        self.parameters.insert(PARAM_FROM, from.to_string());
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.parameters.insert(PARAM_SIZE, size.to_string());
        self
    }

    /// Keep a scroll context open for `duration` (e.g. `"1m"`).
    pub fn with_scroll(mut self, duration: impl Into<String>) -> Self {
        self.parameters.insert(PARAM_SCROLL, duration.into());
        self
    }

    /// The currently selected body source.
    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    pub fn body(&self) -> &BodySource {
        &self.body
    }

    /// POST when a body is present, GET otherwise.
    pub fn method(&self) -> HttpMethod {
        if self.body.is_empty() {
            HttpMethod::Get
        } else {
            HttpMethod::Post
        }
    }

    /// The full request URL derived from the current state.
    pub fn url(&self) -> String {
        let mut url = self.endpoint.clone();

        if !self.target.is_empty() {
            url.push('/');
            url.extend(utf8_percent_encode(&self.target, SEGMENT));
        }

        match &self.identifier {
            Some(identifier) if !identifier.is_empty() => {
                url.push('/');
                url.extend(utf8_percent_encode(identifier, SEGMENT));
            }
            _ => url.push_str("/_search"),
        }

        let query = self.query_string();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        url
    }

    /// Parameters sorted by name, values form-encoded.
    fn query_string(&self) -> String {
        self.parameters
            .iter()
            .map(|(name, value)| {
                let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
                format!("{}={}", name, encoded)
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Send the request, decode the response and hydrate the destination.
    ///
    /// Engine errors and not-found responses are returned as `Ok` without
    /// touching the destination. Each call performs exactly one exchange.
    #[instrument(skip(self), fields(target = %self.target, subtype = ?self.subtype))]
    pub async fn execute(&mut self) -> Result<SearchResponse, SearchError> {
        let method = self.method();
        let url = self.url();

        debug!(method = %method, url = %url, "Sending search request");

        let response = self
            .transport
            .send(method, &url, self.body.bytes(), CONTENT_TYPE_JSON)
            .await
            .inspect_err(|e| error!(url = %url, error = %e, "Search request failed"))?;

        let envelope = decode(&response.body)?;
        debug!(status = response.status, hits = envelope.hits().len(), "Search response decoded");

        complete(envelope, self.destination.as_deref_mut())
    }
}

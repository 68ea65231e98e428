//! Request template cache.
//!
//! Templates are read once per key, kept for the lifetime of the store and
//! rendered with minijinja on every use.

mod file_source;

pub use file_source::FileTemplateSource;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::SearchError;
use crate::interfaces::TemplateSource;

static GLOBAL: LazyLock<Arc<TemplateStore>> =
    LazyLock::new(|| Arc::new(TemplateStore::new(Arc::new(FileTemplateSource::new()))));

/// Write-once cache of template sources keyed by `{path}/{name}`.
///
/// The lock covers both the existence check and the read, so concurrent
/// first use of a key performs exactly one read. Entries are never evicted
/// or replaced.
pub struct TemplateStore {
    source: Arc<dyn TemplateSource>,
    cache: Mutex<HashMap<String, Arc<[u8]>>>,
}

impl TemplateStore {
    /// Create an empty store backed by `source`.
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide store, reading templates from the filesystem.
    pub fn global() -> Arc<TemplateStore> {
        Arc::clone(&GLOBAL)
    }

    /// Build the cache key for a template.
    pub fn key(path: &str, name: &str) -> String {
        format!("{}/{}", path, name)
    }

    /// Return the cached template bytes, reading them on first use.
    ///
    /// `force_reload` does not bypass the cache: only an absent key
    /// triggers a read.
    pub fn load(&self, key: &str, force_reload: bool) -> Result<Arc<[u8]>, SearchError> {
        // Entries are write-once, so a poisoned map is still consistent.
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(bytes) = cache.get(key) {
            if force_reload {
                warn!(key = %key, "Forced template reload is not supported, using cached template");
            }
            return Ok(Arc::clone(bytes));
        }

        let bytes: Arc<[u8]> = self.source.read(key)?.into();
        cache.insert(key.to_string(), Arc::clone(&bytes));
        debug!(key = %key, bytes = bytes.len(), "Template cached");

        Ok(bytes)
    }

    /// Render the template `name` stored under `path` against `data`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u8>)` - The rendered request body
    /// * `Err(SearchError::TemplateError)` - If reading, parsing or rendering fails
    pub fn render<T: Serialize + ?Sized>(
        &self,
        path: &str,
        name: &str,
        data: &T,
        force_reload: bool,
    ) -> Result<Vec<u8>, SearchError> {
        let key = Self::key(path, name);
        let bytes = self.load(&key, force_reload)?;
        let source = std::str::from_utf8(&bytes)
            .map_err(|e| SearchError::template(format!("{}: template is not UTF-8: {}", key, e)))?;

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let template = env
            .template_from_named_str(name, source)
            .map_err(|e| SearchError::template(format!("{}: {}", key, e)))?;
        let rendered = template
            .render(data)
            .map_err(|e| SearchError::template(format!("{}: {}", key, e)))?;

        Ok(rendered.into_bytes())
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

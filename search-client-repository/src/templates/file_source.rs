//! Filesystem template source.

use std::path::PathBuf;

use crate::errors::SearchError;
use crate::interfaces::TemplateSource;

/// Reads templates from disk, resolving keys against an optional root.
#[derive(Debug, Clone, Default)]
pub struct FileTemplateSource {
    root: Option<PathBuf>,
}

impl FileTemplateSource {
    /// Resolve keys relative to the working directory.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Resolve keys relative to `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, key: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(key),
            None => PathBuf::from(key),
        }
    }
}

impl TemplateSource for FileTemplateSource {
    fn read(&self, key: &str) -> Result<Vec<u8>, SearchError> {
        let path = self.resolve(key);
        std::fs::read(&path)
            .map_err(|e| SearchError::template(format!("failed to read {}: {}", path.display(), e)))
    }
}

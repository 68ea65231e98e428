//! Template source trait definition.

use crate::errors::SearchError;

/// Reads raw template bytes by key.
///
/// Only consulted on a template cache miss. Keys have the form
/// `{path}/{name}`.
pub trait TemplateSource: Send + Sync {
    /// Read the template stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u8>)` - The template source
    /// * `Err(SearchError::TemplateError)` - If the template cannot be read
    fn read(&self, key: &str) -> Result<Vec<u8>, SearchError>;
}

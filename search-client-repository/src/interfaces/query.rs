//! Query object trait definition.

use serde::Serialize;
use serde_json::Value;

use crate::errors::SearchError;

/// Anything that can produce a request body.
///
/// Serialization happens when the query is handed to the request builder,
/// so failures surface there rather than at send time.
pub trait Query {
    /// Serialize the query into the request body.
    fn to_bytes(&self) -> Result<Vec<u8>, SearchError>;
}

impl Query for Value {
    fn to_bytes(&self) -> Result<Vec<u8>, SearchError> {
        serde_json::to_vec(self).map_err(|e| SearchError::serialization(e.to_string()))
    }
}

/// Adapter turning any serializable value into a [`Query`].
#[derive(Debug, Clone)]
pub struct JsonQuery<T>(pub T);

impl<T: Serialize> Query for JsonQuery<T> {
    fn to_bytes(&self) -> Result<Vec<u8>, SearchError> {
        serde_json::to_vec(&self.0).map_err(|e| SearchError::serialization(e.to_string()))
    }
}

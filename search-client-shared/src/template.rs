//! Template context wrapper.

use serde::Serialize;

/// Data handed to a request template.
///
/// Absent fields are omitted from the rendering context, so templates can
/// test for them with `{% if from is defined %}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchTemplate<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl<T> SearchTemplate<T> {
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            from: None,
            size: None,
        }
    }

    pub fn with_from(mut self, from: i64) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }
}

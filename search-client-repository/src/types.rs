//! Result types for bulk operations.

/// Result of a batch operation for a single item.
///
/// This struct represents the outcome of one action within a bulk request.
/// It indicates whether the action succeeded and includes the engine's
/// error details if it failed.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The document identifier.
    pub id: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// HTTP status reported for the item.
    pub status: u16,
    /// Error if the operation failed.
    pub error: Option<String>,
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// This struct provides a complete overview of a bulk operation, including the total
/// number of items processed, how many succeeded and failed, and detailed results for
/// each individual item in request order. This allows callers to handle partial
/// failures gracefully.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// Build a summary from per-item results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Results of the items that failed.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

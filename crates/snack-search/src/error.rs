//! Search error types for snack-search.

/// Errors from the mandatory search stages.
///
/// Best-effort stages (similarity, edit distance, metrics) never surface
/// here; they log and degrade to empty results instead.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A mandatory store read failed.
    #[error("store error: {0}")]
    Store(#[from] snack_db::error::DatabaseError),
}

//! Cross-cutting error types for snackbox.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `SearchError`) are defined in
//! their respective crates. The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any snackbox crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_carries_detail() {
        let err = CoreError::Validation("taste score must be between 1 and 5, got 9".into());
        assert_eq!(
            err.to_string(),
            "Validation error: taste score must be between 1 and 5, got 9"
        );
    }
}

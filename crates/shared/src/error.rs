//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Module-level errors (ledger, settlement, closing) convert into this type
/// at the boundary where the engine is embedded.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input, rejected before any mutation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// The storage collaborator failed; propagated unchanged, never retried
    /// by the engine.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for operator-facing reporting.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the failure stems from caller input rather than
    /// system state.
    #[must_use]
    pub const fn is_caller_fault(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::BusinessRule(String::new()).error_code(),
            "BUSINESS_RULE_VIOLATION"
        );
        assert_eq!(
            AppError::Storage(String::new()).error_code(),
            "STORAGE_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_caller_fault() {
        assert!(AppError::Validation(String::new()).is_caller_fault());
        assert!(AppError::NotFound(String::new()).is_caller_fault());
        assert!(!AppError::Storage(String::new()).is_caller_fault());
        assert!(!AppError::Internal(String::new()).is_caller_fault());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("amount must be positive".into()).to_string(),
            "Validation error: amount must be positive"
        );
        assert_eq!(
            AppError::Storage("write failed".into()).to_string(),
            "Storage error: write failed"
        );
    }
}

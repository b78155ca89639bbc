//! Engine-level error type.

use thiserror::Error;

use caixa_shared::AppError;

use crate::bills::BillError;
use crate::closing::ClosingError;
use crate::intake::IntakeError;
use crate::ledger::LedgerError;
use crate::settlement::SettlementError;
use crate::storage::StorageError;

/// Union of everything an engine operation can fail with.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input rejected before any mutation.
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Balance movement failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Settlement-date resolution failed.
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Bill registration or payment failed.
    #[error(transparent)]
    Bill(#[from] BillError),

    /// Closing rule violated.
    #[error(transparent)]
    Closing(#[from] ClosingError),

    /// Storage failed underneath the engine.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Intake(e) => Self::Validation(e.to_string()),
            EngineError::Bill(e @ BillError::NotFound(_)) => Self::NotFound(e.to_string()),
            EngineError::Bill(e @ (BillError::NonPositiveAmount(_) | BillError::EmptyDescription)) => {
                Self::Validation(e.to_string())
            }
            EngineError::Bill(e) => Self::BusinessRule(e.to_string()),
            EngineError::Closing(e) => Self::BusinessRule(e.to_string()),
            EngineError::Settlement(e) => Self::BusinessRule(e.to_string()),
            EngineError::Ledger(e @ LedgerError::UnknownAccount(_)) => {
                Self::NotFound(e.to_string())
            }
            EngineError::Ledger(LedgerError::Storage(e)) | EngineError::Storage(e) => {
                Self::Storage(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_intake_maps_to_validation() {
        let app: AppError = EngineError::from(IntakeError::NonPositiveAmount(dec!(-1))).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_closed_day_maps_to_business_rule() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let app: AppError = EngineError::from(ClosingError::DayAlreadyClosed(date)).into();
        assert_eq!(app.error_code(), "BUSINESS_RULE_VIOLATION");
    }

    #[test]
    fn test_storage_maps_to_storage() {
        let app: AppError =
            EngineError::from(StorageError::Backend("lock poisoned".into())).into();
        assert_eq!(app.error_code(), "STORAGE_ERROR");
    }
}

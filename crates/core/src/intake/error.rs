//! Intake validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

use caixa_shared::types::money::format_brl;

/// Errors rejected before any mutation; the caller must re-prompt.
#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    /// Sale or expense amount must be strictly positive.
    #[error("amount must be positive, got {}", format_brl(*.0))]
    NonPositiveAmount(Decimal),

    /// Credit/debit sales must carry a card brand.
    #[error("card sales require a card brand")]
    MissingCardBrand,

    /// Cash/PIX sales must not carry a card brand.
    #[error("card brand is only valid for credit/debit sales")]
    UnexpectedCardBrand,

    /// Expense description must be non-empty.
    #[error("description must not be empty")]
    EmptyDescription,
}

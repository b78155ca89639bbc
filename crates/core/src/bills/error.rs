//! Bill errors.

use rust_decimal::Decimal;
use thiserror::Error;

use caixa_shared::types::{BillId, format_brl};

/// Errors raised by bill registration and payment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillError {
    /// No bill with the given id exists.
    #[error("bill {0} not found")]
    NotFound(BillId),

    /// The bill is already fully paid.
    #[error("bill {0} is already paid")]
    AlreadyPaid(BillId),

    /// Payment and bill amounts must be strictly positive.
    #[error("amount must be positive, got {}", format_brl(*.0))]
    NonPositiveAmount(Decimal),

    /// A payment may not exceed what is still owed.
    #[error("payment of {} exceeds remaining {}", format_brl(*.payment), format_brl(*.remaining))]
    PaymentExceedsRemaining {
        /// Attempted payment.
        payment: Decimal,
        /// Remaining bill amount.
        remaining: Decimal,
    },

    /// The description cannot be blank.
    #[error("description cannot be empty")]
    EmptyDescription,
}

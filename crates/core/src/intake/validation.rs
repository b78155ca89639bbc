//! Input validation for sales and expenses.
//!
//! Validation runs before any record is persisted or any balance touched,
//! so a rejected input leaves the data model untouched.

use rust_decimal::Decimal;

use super::error::IntakeError;
use super::types::{NewExpense, NewSale};

/// Validates a sale input.
pub fn validate_sale(input: &NewSale) -> Result<(), IntakeError> {
    if input.amount <= Decimal::ZERO {
        return Err(IntakeError::NonPositiveAmount(input.amount));
    }
    match (input.method.is_card(), input.card_brand) {
        (true, None) => Err(IntakeError::MissingCardBrand),
        (false, Some(_)) => Err(IntakeError::UnexpectedCardBrand),
        _ => Ok(()),
    }
}

/// Validates an expense input.
pub fn validate_expense(input: &NewExpense) -> Result<(), IntakeError> {
    if input.amount <= Decimal::ZERO {
        return Err(IntakeError::NonPositiveAmount(input.amount));
    }
    if input.description.trim().is_empty() {
        return Err(IntakeError::EmptyDescription);
    }
    Ok(())
}

//! Settlement error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while scheduling a card settlement.
#[derive(Debug, Clone, Error)]
pub enum SettlementError {
    /// No business day was found within the search bound; the holiday
    /// calendar is pathological. Surfaced to the operator rather than
    /// silently falling back to an arbitrary date.
    #[error("no settlement date found within {attempts} days after {sale_date}")]
    DateUnresolved {
        /// The sale date the search started from.
        sale_date: NaiveDate,
        /// How many candidate days were examined.
        attempts: u32,
    },
}

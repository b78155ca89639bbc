//! Closing errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from the end-of-day closing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClosingError {
    /// The day has already been closed; running again would double-allocate.
    #[error("day {0} has already been closed")]
    DayAlreadyClosed(NaiveDate),
}

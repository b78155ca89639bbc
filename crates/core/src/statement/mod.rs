//! Statement reconstruction and daily summaries.
//!
//! Statements are derived entirely from the audit trail; nothing here
//! writes to storage.

pub mod service;
pub mod types;

pub use service::{build_statement, daily_summary};
pub use types::{AccountStatement, DailySummary, StatementLine};

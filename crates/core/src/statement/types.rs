//! Statement types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{AccountKind, LedgerEntry};

/// One statement row: an entry, its signed effect, and the balance after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementLine {
    /// The underlying audit entry.
    pub entry: LedgerEntry,
    /// Signed effect on the account. For balance adjustments this is the
    /// jump from the previous running balance to the new value.
    pub delta: Decimal,
    /// Running balance after this line.
    pub balance_after: Decimal,
}

/// Reconstructed movement history for one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountStatement {
    /// The account the statement covers.
    pub account: AccountKind,
    /// Lines in entry order.
    pub lines: Vec<StatementLine>,
    /// Balance after the last line (zero when no lines).
    pub closing_balance: Decimal,
}

/// One day's totals, computed from that day's sales and expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// The day summarized.
    pub date: NaiveDate,
    /// Gross sales across every payment method.
    pub total_sales: Decimal,
    /// Cash sales.
    pub cash_sales: Decimal,
    /// PIX sales.
    pub pix_sales: Decimal,
    /// Gross card sales (before fees).
    pub card_gross: Decimal,
    /// Net card proceeds (after fees), for card sales with a computed net.
    pub card_net: Decimal,
    /// Total expenses.
    pub total_expenses: Decimal,
    /// Gross sales minus expenses.
    pub net_result: Decimal,
}

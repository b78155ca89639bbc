//! Statement reconstruction from the audit trail.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::intake::{Expense, PaymentMethod, Sale};
use crate::ledger::{AccountKind, EntryCategory, LedgerEntry};

use super::types::{AccountStatement, DailySummary, StatementLine};

/// Rebuilds one account's movement history from the full entry log.
///
/// Entries not touching the account are skipped. Self-referencing entries
/// (same account on both sides) are signed by category: expenses flow out,
/// sales and card settlements flow in, and balance adjustments reset the
/// running balance to the entry amount.
#[must_use]
pub fn build_statement(account: AccountKind, entries: &[LedgerEntry]) -> AccountStatement {
    let mut running = Decimal::ZERO;
    let mut lines = Vec::new();

    for entry in entries {
        if entry.from_account != account && entry.to_account != account {
            continue;
        }

        let delta = if entry.category == EntryCategory::BalanceAdjustment {
            entry.amount - running
        } else if entry.from_account == entry.to_account {
            match entry.category {
                EntryCategory::Expense => -entry.amount,
                _ => entry.amount,
            }
        } else if entry.from_account == account {
            -entry.amount
        } else {
            entry.amount
        };

        running += delta;
        lines.push(StatementLine {
            entry: entry.clone(),
            delta,
            balance_after: running,
        });
    }

    AccountStatement {
        account,
        closing_balance: running,
        lines,
    }
}

/// Totals one day's sales and expenses.
///
/// The summary reads the intake records, not the audit trail, so card
/// sales appear at their gross value on the sale date even though the
/// money only lands on the settlement date.
#[must_use]
pub fn daily_summary(date: NaiveDate, sales: &[Sale], expenses: &[Expense]) -> DailySummary {
    let mut summary = DailySummary {
        date,
        total_sales: Decimal::ZERO,
        cash_sales: Decimal::ZERO,
        pix_sales: Decimal::ZERO,
        card_gross: Decimal::ZERO,
        card_net: Decimal::ZERO,
        total_expenses: Decimal::ZERO,
        net_result: Decimal::ZERO,
    };

    for sale in sales.iter().filter(|s| s.date == date) {
        summary.total_sales += sale.amount;
        match sale.method {
            PaymentMethod::Cash => summary.cash_sales += sale.amount,
            PaymentMethod::Pix => summary.pix_sales += sale.amount,
            PaymentMethod::Credit | PaymentMethod::Debit => {
                summary.card_gross += sale.amount;
                if let Some(net) = sale.net_amount {
                    summary.card_net += net;
                }
            }
        }
    }

    for expense in expenses.iter().filter(|e| e.date == date) {
        summary.total_expenses += expense.amount;
    }

    summary.net_result = summary.total_sales - summary.total_expenses;
    summary
}

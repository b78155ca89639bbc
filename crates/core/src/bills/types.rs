//! Bill domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caixa_shared::types::BillId;

use crate::ledger::AccountKind;

/// Direction of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillKind {
    /// Money the restaurant owes.
    Payable,
    /// Money owed to the restaurant.
    Receivable,
}

/// Persisted bill state. Overdue is derived at read time, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Some amount remains outstanding.
    Pending,
    /// Fully settled.
    Paid,
}

/// Status as shown to the user, with overdue derived from the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillDisplayStatus {
    /// Outstanding and not yet due.
    Pending,
    /// Outstanding and past its due date.
    Overdue,
    /// Fully settled.
    Paid,
}

/// Input for registering a bill.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBill {
    /// Payable or receivable.
    pub kind: BillKind,
    /// Full amount of the bill.
    pub amount: Decimal,
    /// What the bill is for.
    pub description: String,
    /// When it falls due.
    pub due_date: NaiveDate,
    /// Optional expense/revenue category.
    pub category: Option<String>,
    /// Supplier or customer name.
    pub counterparty: Option<String>,
}

/// A registered bill.
///
/// `amount` is the REMAINING amount; `paid_amount` accumulates across
/// partial payments so the original total is `amount + paid_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier.
    pub id: BillId,
    /// Payable or receivable.
    pub kind: BillKind,
    /// Remaining amount outstanding.
    pub amount: Decimal,
    /// What the bill is for.
    pub description: String,
    /// When it falls due.
    pub due_date: NaiveDate,
    /// Persisted state.
    pub status: BillStatus,
    /// Optional expense/revenue category.
    pub category: Option<String>,
    /// Supplier or customer name.
    pub counterparty: Option<String>,
    /// Date of the most recent payment.
    pub paid_date: Option<NaiveDate>,
    /// Account the most recent payment moved through.
    pub paid_account: Option<AccountKind>,
    /// Cumulative amount paid so far.
    pub paid_amount: Decimal,
}

impl Bill {
    /// Builds a bill from validated input.
    #[must_use]
    pub fn from_input(input: NewBill) -> Self {
        Self {
            id: BillId::new(),
            kind: input.kind,
            amount: input.amount,
            description: input.description,
            due_date: input.due_date,
            status: BillStatus::Pending,
            category: input.category,
            counterparty: input.counterparty,
            paid_date: None,
            paid_account: None,
            paid_amount: Decimal::ZERO,
        }
    }

    /// Whether any amount remains outstanding.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == BillStatus::Pending
    }
}

//! Ledger domain types: accounts and the audit entry log.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use caixa_shared::types::EntryId;

/// The five fixed internal accounts.
///
/// Accounts are created once at initialization and never added or removed;
/// a closed enum makes an unknown account identifier unrepresentable in
/// engine code (storage backends can still surface a missing row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Physical cash drawer.
    Cash,
    /// Instant-transfer (PIX) account, also the card-settlement target.
    Pix,
    /// Investment reserve (funded by the 20% allocation).
    Investment,
    /// Debt-payoff reserve (funded by the 10% allocation).
    DebtPayoff,
    /// Payroll reserve (funded by the fixed daily amount).
    PayrollReserve,
}

impl AccountKind {
    /// All five accounts, in display order.
    pub const ALL: [Self; 5] = [
        Self::Cash,
        Self::Pix,
        Self::Investment,
        Self::DebtPayoff,
        Self::PayrollReserve,
    ];

    /// Operator-facing account name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cash => "Caixa Dinheiro",
            Self::Pix => "Caixa PIX",
            Self::Investment => "Investimento (20%)",
            Self::DebtPayoff => "Quitação de Dívidas (10%)",
            Self::PayrollReserve => "Reserva de Folha",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An internal account with its current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Which of the five fixed accounts this is.
    pub kind: AccountKind,
    /// Operator-facing name.
    pub name: String,
    /// Current balance in centavos precision.
    pub balance: Decimal,
}

impl Account {
    /// Creates an account row with a zero balance.
    #[must_use]
    pub fn new(kind: AccountKind) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            balance: Decimal::ZERO,
        }
    }
}

/// Category tag of an audit entry.
///
/// Closed enumeration; statement reconstruction matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryCategory {
    /// 20% end-of-day allocation into the investment account.
    Allocation20,
    /// 10% end-of-day allocation into the debt-payoff account.
    Allocation10,
    /// Fixed daily transfer into the payroll reserve.
    PayrollReserve,
    /// Gross credit of a matured card settlement.
    CardSettlement,
    /// Expense debit (self-referencing: an expense has no destination).
    Expense,
    /// Immediate sale credit (cash/PIX) or bill receipt.
    Sale,
    /// Administrative absolute balance override.
    BalanceAdjustment,
}

/// Append-only audit record of a money movement between accounts.
///
/// This is the system of record for reconstructing account statements;
/// entries are write-once and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier.
    pub id: EntryId,
    /// Calendar day of the movement.
    pub date: NaiveDate,
    /// Source account.
    pub from_account: AccountKind,
    /// Destination account (equal to the source for self-referencing
    /// categories such as expenses).
    pub to_account: AccountKind,
    /// Moved amount (always positive; direction comes from the accounts).
    pub amount: Decimal,
    /// Category tag.
    pub category: EntryCategory,
    /// Human-readable description.
    pub description: String,
    /// Optional reference to the record that caused the movement
    /// (sale, expense, or bill id).
    pub reference: Option<Uuid>,
}

impl LedgerEntry {
    /// Creates a new entry with a fresh id.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        from_account: AccountKind,
        to_account: AccountKind,
        amount: Decimal,
        category: EntryCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            date,
            from_account,
            to_account,
            amount,
            category,
            description: description.into(),
            reference: None,
        }
    }

    /// Attaches a reference to the causing record.
    #[must_use]
    pub fn with_reference(mut self, reference: Uuid) -> Self {
        self.reference = Some(reference);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_kind_display_names() {
        assert_eq!(AccountKind::Cash.display_name(), "Caixa Dinheiro");
        assert_eq!(AccountKind::Pix.display_name(), "Caixa PIX");
        assert_eq!(AccountKind::ALL.len(), 5);
    }

    #[test]
    fn test_account_new_starts_at_zero() {
        let account = Account::new(AccountKind::Investment);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.name, "Investimento (20%)");
    }

    #[test]
    fn test_account_kind_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&AccountKind::PayrollReserve).unwrap(),
            "\"payroll_reserve\""
        );
        let kind: AccountKind = serde_json::from_str("\"debt_payoff\"").unwrap();
        assert_eq!(kind, AccountKind::DebtPayoff);
    }

    #[test]
    fn test_entry_with_reference() {
        let sale_ref = Uuid::now_v7();
        let entry = LedgerEntry::new(
            NaiveDate::from_ymd_opt(2026, 1, 7).unwrap(),
            AccountKind::Pix,
            AccountKind::Pix,
            dec!(50),
            EntryCategory::Sale,
            "Venda PIX",
        )
        .with_reference(sale_ref);
        assert_eq!(entry.reference, Some(sale_ref));
        assert_eq!(entry.from_account, entry.to_account);
    }
}

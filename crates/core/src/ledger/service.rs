//! Balance movements over a [`LedgerStore`].
//!
//! `AccountLedger` is a thin view that turns the store's `Option`-shaped
//! answers into errors and pairs every movement with its audit entry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::storage::LedgerStore;

use super::error::LedgerError;
use super::types::{AccountKind, EntryCategory, LedgerEntry};

/// Ledger operations bound to one store.
pub struct AccountLedger<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> AccountLedger<'a, S> {
    /// Binds the ledger to a store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Current balance of an account.
    pub fn balance(&self, kind: AccountKind) -> Result<Decimal, LedgerError> {
        self.store
            .balance(kind)?
            .ok_or(LedgerError::UnknownAccount(kind))
    }

    /// Atomically applies a signed delta, returning the new balance.
    pub fn apply_delta(&self, kind: AccountKind, delta: Decimal) -> Result<Decimal, LedgerError> {
        self.store
            .apply_balance_delta(kind, delta)?
            .ok_or(LedgerError::UnknownAccount(kind))
    }

    /// Overwrites a balance and records a balance-adjustment entry.
    ///
    /// Adjustment entries are self-referencing and carry the NEW value as
    /// their amount; the statement treats them as balance resets.
    pub fn set_balance(
        &self,
        kind: AccountKind,
        value: Decimal,
        date: NaiveDate,
    ) -> Result<(), LedgerError> {
        if !self.store.set_balance(kind, value)? {
            return Err(LedgerError::UnknownAccount(kind));
        }
        self.store.append_entry(LedgerEntry::new(
            date,
            kind,
            kind,
            value,
            EntryCategory::BalanceAdjustment,
            format!("Ajuste manual de saldo: {}", kind.display_name()),
        ))?;
        Ok(())
    }

    /// Moves `amount` between two accounts and records the audit entry.
    pub fn transfer(
        &self,
        date: NaiveDate,
        from: AccountKind,
        to: AccountKind,
        amount: Decimal,
        category: EntryCategory,
        description: impl Into<String>,
        reference: Option<Uuid>,
    ) -> Result<(), LedgerError> {
        self.apply_delta(from, -amount)?;
        self.apply_delta(to, amount)?;
        let mut entry = LedgerEntry::new(date, from, to, amount, category, description);
        if let Some(reference) = reference {
            entry = entry.with_reference(reference);
        }
        self.store.append_entry(entry)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[test]
    fn test_transfer_moves_both_balances_and_writes_entry() {
        let store = MemoryStore::new();
        store
            .apply_balance_delta(AccountKind::Pix, dec!(500))
            .unwrap();

        let ledger = AccountLedger::new(&store);
        ledger
            .transfer(
                day(),
                AccountKind::Pix,
                AccountKind::Investment,
                dec!(200),
                EntryCategory::Allocation20,
                "Alocação 20% investimento",
                None,
            )
            .unwrap();

        assert_eq!(ledger.balance(AccountKind::Pix).unwrap(), dec!(300));
        assert_eq!(ledger.balance(AccountKind::Investment).unwrap(), dec!(200));

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, EntryCategory::Allocation20);
        assert_eq!(entries[0].amount, dec!(200));
    }

    #[test]
    fn test_set_balance_writes_adjustment_entry() {
        let store = MemoryStore::new();
        let ledger = AccountLedger::new(&store);
        ledger
            .set_balance(AccountKind::Cash, dec!(342.80), day())
            .unwrap();

        assert_eq!(ledger.balance(AccountKind::Cash).unwrap(), dec!(342.80));
        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, EntryCategory::BalanceAdjustment);
        assert_eq!(entries[0].amount, dec!(342.80));
        assert_eq!(entries[0].from_account, entries[0].to_account);
    }
}

//! In-memory [`LedgerStore`] backed by a single mutex.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use caixa_shared::types::{BillId, EntryId, ExpenseId, LiquidationId, PendingId, SaleId};

use crate::bills::Bill;
use crate::closing::{DayClosing, Pending};
use crate::intake::{Expense, Sale};
use crate::ledger::{Account, AccountKind, LedgerEntry};
use crate::settlement::CardLiquidation;

use super::{LedgerStore, StorageError};

#[derive(Debug, Default)]
struct Inner {
    balances: BTreeMap<AccountKind, Decimal>,
    sales: Vec<Sale>,
    expenses: Vec<Expense>,
    entries: Vec<LedgerEntry>,
    bills: Vec<Bill>,
    liquidations: Vec<CardLiquidation>,
    pendings: Vec<Pending>,
    closings: BTreeMap<NaiveDate, DayClosing>,
}

/// Mutex-guarded in-memory store with all five accounts seeded at zero.
///
/// The single lock makes every trait method atomic; operations that span
/// several method calls rely on the engine's compensating writes instead
/// of cross-call transactions.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a store with every account at a zero balance.
    #[must_use]
    pub fn new() -> Self {
        let balances = AccountKind::ALL
            .into_iter()
            .map(|kind| (kind, Decimal::ZERO))
            .collect();
        Self {
            inner: Mutex::new(Inner {
                balances,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StorageError> {
        self.inner
            .lock()
            .map_err(|e| StorageError::Backend(format!("poisoned store lock: {e}")))
    }
}

impl LedgerStore for MemoryStore {
    fn accounts(&self) -> Result<Vec<Account>, StorageError> {
        let inner = self.lock()?;
        Ok(inner
            .balances
            .iter()
            .map(|(&kind, &balance)| Account {
                kind,
                name: kind.display_name().to_owned(),
                balance,
            })
            .collect())
    }

    fn balance(&self, kind: AccountKind) -> Result<Option<Decimal>, StorageError> {
        Ok(self.lock()?.balances.get(&kind).copied())
    }

    fn apply_balance_delta(
        &self,
        kind: AccountKind,
        delta: Decimal,
    ) -> Result<Option<Decimal>, StorageError> {
        let mut inner = self.lock()?;
        Ok(inner.balances.get_mut(&kind).map(|balance| {
            *balance += delta;
            *balance
        }))
    }

    fn set_balance(&self, kind: AccountKind, value: Decimal) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        match inner.balances.get_mut(&kind) {
            Some(balance) => {
                *balance = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn insert_sale(&self, sale: Sale) -> Result<(), StorageError> {
        self.lock()?.sales.push(sale);
        Ok(())
    }

    fn sales_on(&self, date: NaiveDate) -> Result<Vec<Sale>, StorageError> {
        let inner = self.lock()?;
        Ok(inner
            .sales
            .iter()
            .filter(|s| s.date == date)
            .cloned()
            .collect())
    }

    fn mark_sale_liquidated(&self, id: SaleId, date: NaiveDate) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        match inner.sales.iter_mut().find(|s| s.id == id) {
            Some(sale) => {
                sale.liquidated = true;
                sale.liquidation_date = Some(date);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_sale(&self, id: SaleId) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        let before = inner.sales.len();
        inner.sales.retain(|s| s.id != id);
        Ok(inner.sales.len() < before)
    }

    fn insert_expense(&self, expense: Expense) -> Result<(), StorageError> {
        self.lock()?.expenses.push(expense);
        Ok(())
    }

    fn expenses_on(&self, date: NaiveDate) -> Result<Vec<Expense>, StorageError> {
        let inner = self.lock()?;
        Ok(inner
            .expenses
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect())
    }

    fn delete_expense(&self, id: ExpenseId) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        let before = inner.expenses.len();
        inner.expenses.retain(|e| e.id != id);
        Ok(inner.expenses.len() < before)
    }

    fn append_entry(&self, entry: LedgerEntry) -> Result<(), StorageError> {
        self.lock()?.entries.push(entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LedgerEntry>, StorageError> {
        Ok(self.lock()?.entries.clone())
    }

    fn remove_entry(&self, id: EntryId) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        Ok(inner.entries.len() < before)
    }

    fn insert_bill(&self, bill: Bill) -> Result<(), StorageError> {
        self.lock()?.bills.push(bill);
        Ok(())
    }

    fn bills(&self) -> Result<Vec<Bill>, StorageError> {
        Ok(self.lock()?.bills.clone())
    }

    fn bill(&self, id: BillId) -> Result<Option<Bill>, StorageError> {
        let inner = self.lock()?;
        Ok(inner.bills.iter().find(|b| b.id == id).cloned())
    }

    fn update_bill(&self, bill: Bill) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        match inner.bills.iter_mut().find(|b| b.id == bill.id) {
            Some(stored) => {
                *stored = bill;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn insert_liquidation(&self, liquidation: CardLiquidation) -> Result<(), StorageError> {
        self.lock()?.liquidations.push(liquidation);
        Ok(())
    }

    fn liquidations(&self) -> Result<Vec<CardLiquidation>, StorageError> {
        Ok(self.lock()?.liquidations.clone())
    }

    fn liquidations_due_through(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<CardLiquidation>, StorageError> {
        let inner = self.lock()?;
        Ok(inner
            .liquidations
            .iter()
            .filter(|l| !l.liquidated && l.settlement_date <= date)
            .cloned()
            .collect())
    }

    fn mark_liquidation_settled(&self, id: LiquidationId) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        match inner.liquidations.iter_mut().find(|l| l.id == id) {
            Some(liquidation) => {
                liquidation.liquidated = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn insert_pending(&self, pending: Pending) -> Result<(), StorageError> {
        self.lock()?.pendings.push(pending);
        Ok(())
    }

    fn pendings(&self) -> Result<Vec<Pending>, StorageError> {
        Ok(self.lock()?.pendings.clone())
    }

    fn delete_pending(&self, id: PendingId) -> Result<bool, StorageError> {
        let mut inner = self.lock()?;
        let before = inner.pendings.len();
        inner.pendings.retain(|p| p.id != id);
        Ok(inner.pendings.len() < before)
    }

    fn closing_for(&self, date: NaiveDate) -> Result<Option<DayClosing>, StorageError> {
        Ok(self.lock()?.closings.get(&date).cloned())
    }

    fn insert_closing(&self, closing: DayClosing) -> Result<(), StorageError> {
        self.lock()?.closings.insert(closing.date, closing);
        Ok(())
    }
}

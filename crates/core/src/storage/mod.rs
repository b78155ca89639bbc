//! Storage abstraction for the engine.
//!
//! The engine only talks to a [`LedgerStore`]; the in-memory implementation
//! in [`memory`] backs tests and single-process deployments. All operations
//! are synchronous and each method call is atomic with respect to the
//! others, which is what makes `apply_balance_delta` safe to use as the
//! single write path for account balances.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use caixa_shared::types::{BillId, EntryId, ExpenseId, LiquidationId, PendingId, SaleId};

use crate::bills::Bill;
use crate::closing::{DayClosing, Pending};
use crate::intake::{Expense, Sale};
use crate::ledger::{Account, AccountKind, LedgerEntry};
use crate::settlement::CardLiquidation;

pub mod memory;

pub use memory::MemoryStore;

/// Errors from the storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed (poisoned lock, I/O, connection loss).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistence boundary for all engine state.
///
/// Balance mutation goes through [`apply_balance_delta`] so concurrent
/// operations compose: each delta is applied atomically against the stored
/// value rather than read-modify-written by the caller.
///
/// [`apply_balance_delta`]: LedgerStore::apply_balance_delta
pub trait LedgerStore: Send + Sync {
    /// All accounts with their current balances, in a stable order.
    fn accounts(&self) -> Result<Vec<Account>, StorageError>;

    /// Current balance of one account, `None` if unknown.
    fn balance(&self, kind: AccountKind) -> Result<Option<Decimal>, StorageError>;

    /// Atomically adds `delta` (may be negative) to an account balance.
    ///
    /// Returns the new balance, or `None` if the account is unknown.
    fn apply_balance_delta(
        &self,
        kind: AccountKind,
        delta: Decimal,
    ) -> Result<Option<Decimal>, StorageError>;

    /// Overwrites an account balance. Returns `false` if unknown.
    fn set_balance(&self, kind: AccountKind, value: Decimal) -> Result<bool, StorageError>;

    /// Persists a sale.
    fn insert_sale(&self, sale: Sale) -> Result<(), StorageError>;

    /// All sales dated exactly `date`.
    fn sales_on(&self, date: NaiveDate) -> Result<Vec<Sale>, StorageError>;

    /// Marks a card sale as liquidated on `date`. Returns `false` if unknown.
    fn mark_sale_liquidated(&self, id: SaleId, date: NaiveDate) -> Result<bool, StorageError>;

    /// Removes a sale. Returns `false` if unknown.
    fn delete_sale(&self, id: SaleId) -> Result<bool, StorageError>;

    /// Persists an expense.
    fn insert_expense(&self, expense: Expense) -> Result<(), StorageError>;

    /// All expenses dated exactly `date`.
    fn expenses_on(&self, date: NaiveDate) -> Result<Vec<Expense>, StorageError>;

    /// Removes an expense. Returns `false` if unknown.
    fn delete_expense(&self, id: ExpenseId) -> Result<bool, StorageError>;

    /// Appends an audit entry.
    fn append_entry(&self, entry: LedgerEntry) -> Result<(), StorageError>;

    /// All audit entries in insertion order.
    fn entries(&self) -> Result<Vec<LedgerEntry>, StorageError>;

    /// Takes back an entry written by a failed multi-step operation.
    /// Returns `false` if unknown.
    ///
    /// Only compensating rollbacks call this; a completed operation never
    /// removes entries from the log.
    fn remove_entry(&self, id: EntryId) -> Result<bool, StorageError>;

    /// Persists a bill.
    fn insert_bill(&self, bill: Bill) -> Result<(), StorageError>;

    /// All bills.
    fn bills(&self) -> Result<Vec<Bill>, StorageError>;

    /// One bill by id.
    fn bill(&self, id: BillId) -> Result<Option<Bill>, StorageError>;

    /// Replaces a stored bill. Returns `false` if unknown.
    fn update_bill(&self, bill: Bill) -> Result<bool, StorageError>;

    /// Persists a card liquidation schedule entry.
    fn insert_liquidation(&self, liquidation: CardLiquidation) -> Result<(), StorageError>;

    /// All liquidations.
    fn liquidations(&self) -> Result<Vec<CardLiquidation>, StorageError>;

    /// Unliquidated entries whose settlement date is on or before `date`.
    fn liquidations_due_through(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<CardLiquidation>, StorageError>;

    /// Marks a liquidation as settled. Returns `false` if unknown.
    fn mark_liquidation_settled(&self, id: LiquidationId) -> Result<bool, StorageError>;

    /// Persists a pending allocation shortfall.
    fn insert_pending(&self, pending: Pending) -> Result<(), StorageError>;

    /// All open pendings.
    fn pendings(&self) -> Result<Vec<Pending>, StorageError>;

    /// Removes a retired pending. Returns `false` if unknown.
    fn delete_pending(&self, id: PendingId) -> Result<bool, StorageError>;

    /// The closing marker for `date`, if the day was already closed.
    fn closing_for(&self, date: NaiveDate) -> Result<Option<DayClosing>, StorageError>;

    /// Persists a closing marker.
    fn insert_closing(&self, closing: DayClosing) -> Result<(), StorageError>;
}

//! Core business logic for Caixa.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, ledger rules, and calculations live here;
//! persistence, wall-clock time, and the holiday calendar are injected
//! collaborators.
//!
//! # Modules
//!
//! - `calendar` - Local-date arithmetic, business days, clock and holiday traits
//! - `ledger` - The five fixed accounts and the append-only audit entry log
//! - `settlement` - Card fee table, settlement scheduling, liquidation records
//! - `intake` - Sales and expenses
//! - `closing` - End-of-day revenue allocation and pending compensation
//! - `bills` - Accounts payable/receivable with partial payments
//! - `statement` - Account statements and daily summaries from the entry log
//! - `storage` - The storage collaborator contract and in-memory reference store
//! - `engine` - The facade wiring the collaborators into the public operations

pub mod bills;
pub mod calendar;
pub mod closing;
pub mod engine;
pub mod error;
pub mod intake;
pub mod ledger;
pub mod settlement;
pub mod statement;
pub mod storage;

pub use engine::{Engine, LiquidationRun};
pub use error::EngineError;

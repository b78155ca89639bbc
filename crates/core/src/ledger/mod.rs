//! The account ledger.
//!
//! This module implements the core ledger surface:
//! - The five fixed internal accounts
//! - The append-only audit entry log
//! - Balance reads and signed-delta application
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;

pub use error::LedgerError;
pub use service::AccountLedger;
pub use types::{Account, AccountKind, EntryCategory, LedgerEntry};

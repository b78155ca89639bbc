//! Ledger errors.

use thiserror::Error;

use crate::storage::StorageError;

use super::types::AccountKind;

/// Errors from balance reads and movements.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The storage backend does not know this account.
    #[error("unknown account: {0}")]
    UnknownAccount(AccountKind),

    /// Storage failed underneath the ledger.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

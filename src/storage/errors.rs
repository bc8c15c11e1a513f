use std::io;

use thiserror::Error;

use crate::types::AccountId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: account [{0}] does not exist")]
    AccountNotFound(AccountId),
    #[error("Storage error: account [{0}] already exists")]
    DuplicateAccount(AccountId),
    #[error("Storage error: account [{account_id}] is at version [{found}], commit expected [{expected}]")]
    VersionConflict {
        account_id: AccountId,
        expected: u64,
        found: u64
    },
    #[error("Storage error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Storage error: {0}")]
    Io(#[from] io::Error)
}

mod account_store;
mod commit;
mod csv_journal;
mod errors;
mod memory_storage;
mod mirrored_storage;
mod transaction_log;

use std::future::Future;

use crate::models::{Account, Transaction};

pub use account_store::AccountStore;
pub use commit::Commit;
pub use csv_journal::CsvJournal;
pub use errors::StorageError;
pub use memory_storage::MemoryStorage;
pub use mirrored_storage::MirroredStorage;
pub use transaction_log::TransactionLog;

/// The port through which the ledger engine reads and writes its state.
///
/// `commit` must apply a whole [`Commit`] or none of it. `prepare` runs the same
/// checks without applying anything, so a caller can coordinate with another system
/// before committing.
pub trait Storage: Send + Sync + 'static {
    fn read_account(&self, account_id: &str) -> impl Future<Output = Result<Option<Account>, StorageError>> + Send;
    /// All accounts, ordered by id.
    fn read_accounts(&self) -> impl Future<Output = Result<Vec<Account>, StorageError>> + Send;
    /// The log newest first, optionally restricted to one account.
    fn read_transactions(&self, account_id: Option<&str>) -> impl Future<Output = Result<Vec<Transaction>, StorageError>> + Send;
    fn prepare(&self, commit: &Commit) -> impl Future<Output = Result<(), StorageError>> + Send;
    fn commit(&self, commit: Commit) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// An external system every commit is published to before it is applied locally.
pub trait Mirror: Send + Sync + 'static {
    fn publish(&self, commit: &Commit) -> impl Future<Output = Result<(), StorageError>> + Send;
}

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::models::{Account, Transaction};
use crate::storage::{Commit, Mirror, Storage, StorageError};

/// Storage adapter that publishes every commit to a [`Mirror`] before applying it
/// to the primary storage.
///
/// Commits are serialized through a gate so that the primary cannot change between
/// the `prepare` check and the local `commit`. A commit the mirror refuses is never
/// applied locally.
pub struct MirroredStorage<S: Storage, M: Mirror> {
    primary: S,
    mirror: M,
    gate: Mutex<()>
}

impl<S: Storage, M: Mirror> MirroredStorage<S, M> {
    pub fn new(primary: S, mirror: M) -> Self {
        Self {
            primary,
            mirror,
            gate: Mutex::new(())
        }
    }
}

impl<S: Storage, M: Mirror> Storage for MirroredStorage<S, M> {
    async fn read_account(&self, account_id: &str) -> Result<Option<Account>, StorageError> {
        self.primary.read_account(account_id).await
    }

    async fn read_accounts(&self) -> Result<Vec<Account>, StorageError> {
        self.primary.read_accounts().await
    }

    async fn read_transactions(&self, account_id: Option<&str>) -> Result<Vec<Transaction>, StorageError> {
        self.primary.read_transactions(account_id).await
    }

    async fn prepare(&self, commit: &Commit) -> Result<(), StorageError> {
        self.primary.prepare(commit).await
    }

    async fn commit(&self, commit: Commit) -> Result<(), StorageError> {
        let _gate = self.gate.lock().await;

        self.primary.prepare(&commit).await?;
        self.mirror.publish(&commit).await?;
        debug!("Commit with [{}] transactions published to mirror", commit.transactions.len());

        //NOTE: The mirror already holds this commit, a local failure here leaves the two diverged
        self.primary.commit(commit).await.inspect_err(|error| {
            error!("Local commit failed after the mirror accepted it: {error}");
        })
    }
}

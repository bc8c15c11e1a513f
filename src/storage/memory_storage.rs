use tokio::sync::RwLock;
use tracing::trace;

use crate::models::{Account, Transaction};
use crate::storage::{AccountStore, Commit, Storage, StorageError, TransactionLog};

#[derive(Debug)]
struct State {
    accounts: AccountStore,
    log: TransactionLog
}

impl State {
    fn new() -> Self {
        Self {
            accounts: AccountStore::new(),
            log: TransactionLog::new()
        }
    }

    fn verify(&self, commit: &Commit) -> Result<(), StorageError> {
        for update in &commit.balances {
            self.accounts.check_version(&update.account_id, update.expected_version)?;
        }

        for (index, account) in commit.opened.iter().enumerate() {
            let repeated = commit.opened[..index].iter().any(|earlier| earlier.id == account.id);

            if repeated || self.accounts.get(&account.id).is_some() {
                return Err(StorageError::DuplicateAccount(account.id.clone()));
            }
        }

        for transaction in &commit.transactions {
            let known = self.accounts.get(&transaction.account_id).is_some()
                || commit.opened.iter().any(|account| account.id == transaction.account_id);

            if !known {
                return Err(StorageError::AccountNotFound(transaction.account_id.clone()));
            }
        }

        Ok(())
    }
}

/// Volatile storage holding the account store and transaction log behind one lock.
pub struct MemoryStorage {
    state: RwLock<State>
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::new())
        }
    }
}

impl Storage for MemoryStorage {
    async fn read_account(&self, account_id: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.state.read().await.accounts.get(account_id).cloned())
    }

    async fn read_accounts(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self.state.read().await.accounts.iter().cloned().collect())
    }

    async fn read_transactions(&self, account_id: Option<&str>) -> Result<Vec<Transaction>, StorageError> {
        let state = self.state.read().await;

        Ok(match account_id {
            Some(account_id) => state.log.by_account(account_id),
            None => state.log.iter().cloned().collect()
        })
    }

    async fn prepare(&self, commit: &Commit) -> Result<(), StorageError> {
        self.state.read().await.verify(commit)
    }

    async fn commit(&self, commit: Commit) -> Result<(), StorageError> {
        let mut state = self.state.write().await;

        //NOTE: Everything that can fail is checked before the first write, so a rejected commit leaves no trace
        state.verify(&commit)?;

        for account in commit.opened {
            state.accounts.add(account)?;
        }

        for update in commit.balances {
            state.accounts.update_balance(&update.account_id, update.balance)?;
        }

        for transaction in commit.transactions {
            state.log.append(transaction);
        }

        trace!("Commit applied, log now holds [{}] transactions", state.log.len());

        Ok(())
    }
}

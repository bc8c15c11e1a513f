use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::types::AccountId;

/// Guards held for the duration of one ledger operation.
pub struct LockSet {
    _guards: Vec<OwnedMutexGuard<()>>
}

/// Per-account async mutexes that serialize every mutation touching an account.
///
/// Entries are never evicted. The engine only locks registered accounts and the one being registered.
#[derive(Default)]
pub struct AccountLocks {
    locks: DashMap<AccountId, Arc<Mutex<()>>>
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks every listed account, always in ascending id order so that two operations
    /// over the same pair of accounts cannot deadlock. Duplicate ids are locked once.
    pub async fn acquire(&self, account_ids: &[&str]) -> LockSet {
        let mut account_ids = account_ids.to_vec();
        account_ids.sort_unstable();
        account_ids.dedup();

        let mut guards = Vec::with_capacity(account_ids.len());

        for account_id in account_ids {
            //NOTE: The map shard guard must be released before awaiting the account lock
            let lock = self.locks.entry(account_id.to_string()).or_default().clone();
            guards.push(lock.lock_owned().await);
        }

        LockSet { _guards: guards }
    }

    #[cfg(test)]
    pub fn tracked_accounts(&self) -> usize {
        self.locks.len()
    }
}

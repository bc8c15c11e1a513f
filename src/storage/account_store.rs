use std::collections::btree_map::Values;
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::Account;
use crate::storage::StorageError;
use crate::types::AccountId;

/// Mapping of account id to account state, ordered by id.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: BTreeMap<AccountId, Account>
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, account_id: &str) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    /// Replaces the balance of an existing account and bumps its version.
    pub fn update_balance(&mut self, account_id: &str, balance: Decimal) -> Result<(), StorageError> {
        let account = self.accounts.get_mut(account_id)
            .ok_or_else(|| StorageError::AccountNotFound(account_id.to_string()))?;

        account.balance = balance;
        account.version += 1;

        Ok(())
    }

    pub fn add(&mut self, account: Account) -> Result<(), StorageError> {
        if self.accounts.contains_key(&account.id) {
            return Err(StorageError::DuplicateAccount(account.id));
        }

        self.accounts.insert(account.id.clone(), account);

        Ok(())
    }

    pub fn check_version(&self, account_id: &str, expected: u64) -> Result<(), StorageError> {
        let account = self.get(account_id)
            .ok_or_else(|| StorageError::AccountNotFound(account_id.to_string()))?;

        if account.version != expected {
            return Err(StorageError::VersionConflict {
                account_id: account_id.to_string(),
                expected,
                found: account.version
            });
        }

        Ok(())
    }

    pub fn iter(&self) -> Values<'_, AccountId, Account> {
        self.accounts.values()
    }
}

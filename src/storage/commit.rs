use rust_decimal::Decimal;

use crate::models::{Account, NewTransaction, Transaction};
use crate::types::AccountId;

/// A balance replacement guarded by the version the engine validated against.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceUpdate {
    pub account_id: AccountId,
    pub expected_version: u64,
    pub balance: Decimal
}

/// Everything one ledger operation writes, applied by storage as a single unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Commit {
    pub balances: Vec<BalanceUpdate>,
    pub opened: Vec<Account>,
    pub transactions: Vec<Transaction>
}

impl Commit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(mut self, account: &Account, balance: Decimal) -> Self {
        self.balances.push(BalanceUpdate {
            account_id: account.id.clone(),
            expected_version: account.version,
            balance
        });
        self
    }

    pub fn open(mut self, account: Account) -> Self {
        self.opened.push(account);
        self
    }

    pub fn record(mut self, transaction: NewTransaction) -> Self {
        self.transactions.push(transaction.into_transaction());
        self
    }
}

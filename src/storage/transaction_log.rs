use std::collections::vec_deque::Iter;
use std::collections::VecDeque;

use crate::models::Transaction;

/// Append-only transaction history, kept newest first.
#[derive(Debug, Default)]
pub struct TransactionLog {
    entries: VecDeque<Transaction>
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a staged transaction at the head of the log.
    pub fn append(&mut self, transaction: Transaction) {
        self.entries.push_front(transaction);
    }

    pub fn by_account(&self, account_id: &str) -> Vec<Transaction> {
        self.entries.iter()
            .filter(|transaction| transaction.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

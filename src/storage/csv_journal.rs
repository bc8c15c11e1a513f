use std::fs::{File, OpenOptions};
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::{Writer, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::models::{Category, Transaction, TransactionKind, TransactionStatus};
use crate::storage::{Commit, Mirror, StorageError};
use crate::types::{AccountId, TransactionId};

/// One journal line per committed transaction.
#[derive(Debug, Serialize)]
struct JournalRow<'a> {
    transaction_id: TransactionId,
    account_id: &'a AccountId,
    date: DateTime<Utc>,
    amount: Decimal,
    kind: TransactionKind,
    category: Category,
    description: &'a str,
    merchant: Option<&'a str>,
    status: TransactionStatus
}

impl<'a> From<&'a Transaction> for JournalRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            transaction_id: transaction.id,
            account_id: &transaction.account_id,
            date: transaction.date,
            amount: transaction.amount,
            kind: transaction.kind(),
            category: transaction.category,
            description: &transaction.description,
            merchant: transaction.merchant.as_deref(),
            status: transaction.status
        }
    }
}

/// A [`Mirror`] that appends committed transactions to a CSV file.
pub struct CsvJournal {
    writer: Mutex<Writer<File>>
}

impl CsvJournal {
    /// Opens `path` for appending. A header row is written only when the file is new or empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;

        let writer = WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        Ok(Self {
            writer: Mutex::new(writer)
        })
    }
}

impl Mirror for CsvJournal {
    async fn publish(&self, commit: &Commit) -> Result<(), StorageError> {
        let mut writer = self.writer.lock().await;

        for transaction in &commit.transactions {
            writer.serialize(JournalRow::from(transaction))?;
        }

        writer.flush()?;

        Ok(())
    }
}

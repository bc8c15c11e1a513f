use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Category, TransactionKind, TransactionStatus};
use crate::types::{AccountId, TransactionId};

/// A transaction staged by the engine that has not been given an identity yet.
///
/// Amounts are signed: negative for money leaving the account, positive for money
/// arriving. Constructors take the magnitude and apply the sign themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: Category,
    pub amount: Decimal,
    pub merchant: Option<String>,
    pub status: TransactionStatus
}

impl NewTransaction {
    pub fn expense(account_id: &str, date: DateTime<Utc>, magnitude: Decimal, description: impl Into<String>, category: Category) -> Self {
        Self::signed(account_id, date, -magnitude, description.into(), category)
    }

    pub fn income(account_id: &str, date: DateTime<Utc>, magnitude: Decimal, description: impl Into<String>, category: Category) -> Self {
        Self::signed(account_id, date, magnitude, description.into(), category)
    }

    pub fn with_merchant(mut self, merchant: Option<String>) -> Self {
        self.merchant = merchant;
        self
    }

    /// Assigns a time-ordered unique id, producing the immutable record.
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: Uuid::now_v7(),
            account_id: self.account_id,
            date: self.date,
            description: self.description,
            category: self.category,
            amount: self.amount,
            merchant: self.merchant,
            status: self.status
        }
    }

    fn signed(account_id: &str, date: DateTime<Utc>, amount: Decimal, description: String, category: Category) -> Self {
        Self {
            account_id: account_id.to_string(),
            date,
            description,
            category,
            amount,
            merchant: None,
            status: TransactionStatus::Completed
        }
    }
}

/// An appended, immutable entry of the transaction log.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    /// The owning account.
    pub account_id: AccountId,
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: Category,
    /// Signed amount in the owning account's currency.
    pub amount: Decimal,
    pub merchant: Option<String>,
    pub status: TransactionStatus
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        if self.amount.is_sign_negative() {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }
}

mod account;
mod errors;
mod rates;
#[cfg(test)]
mod tests;
mod transaction;

use serde::{Deserialize, Serialize};

pub use account::Account;
pub use errors::LedgerError;
pub use rates::ExchangeRates;
pub use transaction::{NewTransaction, Transaction};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Current,
    Savings,
    Deposit,
    Credit
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salary,
    Transfer,
    Shopping,
    Groceries,
    Transport,
    Entertainment,
    Utilities,
    Healthcare,
    Restaurants,
    Education,
    Investments,
    Other
}

/// Direction of a transaction, derived from the sign of its amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed
}

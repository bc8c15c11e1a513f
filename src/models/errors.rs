use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Account;
use crate::storage::StorageError;
use crate::types::{AccountId, Currency};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Account [{account_id}] was not found")]
    AccountNotFound {
        account_id: AccountId
    },
    #[error("Insufficient funds in account [{account_id}]: balance [{balance}], requested [{requested}]")]
    InsufficientFunds {
        account_id: AccountId,
        balance: Decimal,
        requested: Decimal
    },
    #[error("Amount [{amount}] must be positive with at most two decimal places")]
    InvalidAmount {
        amount: Decimal
    },
    #[error("Source and destination are the same account [{account_id}]")]
    SameAccount {
        account_id: AccountId
    },
    #[error("Currency mismatch between [{from}]:[{from_currency}] and [{to}]:[{to_currency}]")]
    CurrencyMismatch {
        from: AccountId,
        from_currency: Currency,
        to: AccountId,
        to_currency: Currency
    },
    #[error("No exchange rate is quoted for [{from}] -> [{to}]")]
    UnsupportedCurrencyPair {
        from: Currency,
        to: Currency
    },
    #[error("Exchange of [{from_amount}] [{from}] -> [{to}] should credit [{expected}], got [{offered}]")]
    RateMismatch {
        from: Currency,
        to: Currency,
        from_amount: Decimal,
        expected: Decimal,
        offered: Decimal
    },
    #[error("Annual rate [{rate}] must be between 0 and 100 percent")]
    InvalidRate {
        rate: Decimal
    },
    #[error("Numeric overflow occurred on account [{account_id}]")]
    Overflow {
        account_id: AccountId
    },
    #[error(transparent)]
    Storage(#[from] StorageError)
}

impl LedgerError {
    pub fn account_not_found(account_id: &str) -> Self {
        Self::AccountNotFound { account_id: account_id.to_string() }
    }

    pub fn insufficient_funds(account: &Account, requested: Decimal) -> Self {
        Self::InsufficientFunds {
            account_id: account.id.clone(),
            balance: account.balance,
            requested
        }
    }

    pub fn invalid_amount(amount: Decimal) -> Self {
        Self::InvalidAmount { amount }
    }

    pub fn same_account(account_id: &str) -> Self {
        Self::SameAccount { account_id: account_id.to_string() }
    }

    pub fn currency_mismatch(from: &Account, to: &Account) -> Self {
        Self::CurrencyMismatch {
            from: from.id.clone(),
            from_currency: from.currency,
            to: to.id.clone(),
            to_currency: to.currency
        }
    }

    pub fn unsupported_pair(from: Currency, to: Currency) -> Self {
        Self::UnsupportedCurrencyPair { from, to }
    }

    pub fn invalid_rate(rate: Decimal) -> Self {
        Self::InvalidRate { rate }
    }

    pub fn overflow(account: &Account) -> Self {
        Self::Overflow { account_id: account.id.clone() }
    }
}

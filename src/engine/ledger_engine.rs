use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use crate::engine::Operation;
use crate::locks::AccountLocks;
use crate::models::{Account, Category, ExchangeRates, LedgerError, NewTransaction, Transaction};
use crate::storage::{Commit, Storage};
use crate::types::{fits_minor_units, is_valid_amount, is_valid_rate, AccountId};

/// The transactions an applied operation appended, and the account it opened, if any.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub transactions: Vec<Transaction>,
    pub opened_account: Option<AccountId>
}

/// Validates and applies balance-affecting operations against a [`Storage`].
///
/// Every operation locks the accounts it touches, validates against the state read
/// under those locks, and hands a single [`Commit`] to storage. An operation is either
/// applied in full or rejected with nothing written.
pub struct LedgerEngine<S: Storage> {
    storage: Arc<S>,
    pub(super) locks: AccountLocks,
    rates: ExchangeRates,
    rate_tolerance: Decimal
}

impl<S: Storage> LedgerEngine<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            locks: AccountLocks::new(),
            rates: ExchangeRates::default(),
            rate_tolerance: Decimal::new(1, 2)
        }
    }

    pub fn with_rates(mut self, rates: ExchangeRates) -> Self {
        self.rates = rates;
        self
    }

    /// Largest accepted difference between an offered exchange credit and the quoted one.
    pub fn with_rate_tolerance(mut self, tolerance: Decimal) -> Self {
        self.rate_tolerance = tolerance;
        self
    }

    pub fn rates(&self) -> &ExchangeRates {
        &self.rates
    }

    /// Dispatches a parsed operation to the matching ledger operation.
    pub async fn apply(&self, operation: &Operation) -> Result<Receipt, LedgerError> {
        match operation {
            Operation::Transfer { from, to, amount, description } => {
                self.transfer(from, to, *amount, description).await
            },
            Operation::Payment { account, amount, description, category, merchant } => {
                self.payment(account, *amount, description, *category, merchant.clone()).await
            },
            Operation::Exchange { from, to, from_amount, to_amount } => {
                self.exchange_currency(from, to, *from_amount, *to_amount).await
            },
            Operation::OpenDeposit { source, amount, name, annual_rate } => {
                self.open_deposit(source, *amount, name, *annual_rate).await
            }
        }
    }

    /// Adds an existing account to the store, e.g. when loading the account catalog.
    pub async fn register_account(&self, account: Account) -> Result<(), LedgerError> {
        if account.balance < Decimal::ZERO || !fits_minor_units(account.balance) {
            return Err(LedgerError::invalid_amount(account.balance));
        }

        if let Some(rate) = account.annual_rate.filter(|rate| !is_valid_rate(*rate)) {
            return Err(LedgerError::invalid_rate(rate));
        }

        let _locks = self.locks.acquire(&[account.id.as_str()]).await;
        let account_id = account.id.clone();

        self.storage.commit(Commit::new().open(account)).await?;
        debug!("Account [{account_id}] registered");

        Ok(())
    }

    /// Moves `amount` between two accounts of the same currency.
    pub async fn transfer(&self, from_id: &str, to_id: &str, amount: Decimal, description: &str) -> Result<Receipt, LedgerError> {
        self.ensure_known(&[from_id, to_id]).await?;
        let _locks = self.locks.acquire(&[from_id, to_id]).await;
        let from = self.load(from_id).await?;
        let to = self.load(to_id).await?;

        if from.id == to.id {
            return Err(LedgerError::same_account(from_id));
        }

        ensure_valid_amount(amount)?;

        if from.currency != to.currency {
            return Err(LedgerError::currency_mismatch(&from, &to));
        }

        let from_balance = debit(&from, amount)?;
        let to_balance = credit(&to, amount)?;
        let now = Utc::now();

        let commit = Commit::new()
            .update(&from, from_balance)
            .update(&to, to_balance)
            .record(NewTransaction::expense(&from.id, now, amount, format!("{description} (to {})", to.name), Category::Transfer)
                .with_merchant(Some(to.name.clone())))
            .record(NewTransaction::income(&to.id, now, amount, format!("{description} (from {})", from.name), Category::Transfer)
                .with_merchant(Some(from.name.clone())));

        let receipt = self.commit(commit, None).await?;
        debug!("Transfer of [{amount}] [{}] from [{from_id}] to [{to_id}] applied", from.currency);

        Ok(receipt)
    }

    /// Pays `amount` out of an account to an outside party.
    pub async fn payment(&self, account_id: &str, amount: Decimal, description: &str, category: Category, merchant: Option<String>) -> Result<Receipt, LedgerError> {
        self.ensure_known(&[account_id]).await?;
        let _locks = self.locks.acquire(&[account_id]).await;
        let account = self.load(account_id).await?;

        ensure_valid_amount(amount)?;

        let balance = debit(&account, amount)?;

        let commit = Commit::new()
            .update(&account, balance)
            .record(NewTransaction::expense(&account.id, Utc::now(), amount, description, category)
                .with_merchant(merchant));

        let receipt = self.commit(commit, None).await?;
        debug!("Payment of [{amount}] [{}] from [{account_id}] applied", account.currency);

        Ok(receipt)
    }

    /// Debits `from_amount` from one account and credits `to_amount` to another.
    ///
    /// The caller computes `to_amount` from the displayed rate. The engine checks it
    /// against its own rate table and rejects credits that drift further than the
    /// configured tolerance.
    pub async fn exchange_currency(&self, from_id: &str, to_id: &str, from_amount: Decimal, to_amount: Decimal) -> Result<Receipt, LedgerError> {
        self.ensure_known(&[from_id, to_id]).await?;
        let _locks = self.locks.acquire(&[from_id, to_id]).await;
        let from = self.load(from_id).await?;
        let to = self.load(to_id).await?;

        if from.id == to.id {
            return Err(LedgerError::same_account(from_id));
        }

        ensure_valid_amount(from_amount)?;
        ensure_valid_amount(to_amount)?;
        self.check_rate(&from, &to, from_amount, to_amount)?;

        let from_balance = debit(&from, from_amount)?;
        let to_balance = credit(&to, to_amount)?;
        let now = Utc::now();
        let description = format!("Exchange {} -> {}", from.currency, to.currency);

        let commit = Commit::new()
            .update(&from, from_balance)
            .update(&to, to_balance)
            .record(NewTransaction::expense(&from.id, now, from_amount, description.as_str(), Category::Other))
            .record(NewTransaction::income(&to.id, now, to_amount, description, Category::Other));

        let receipt = self.commit(commit, None).await?;
        debug!("Exchange of [{from_amount}] [{}] into [{to_amount}] [{}] applied", from.currency, to.currency);

        Ok(receipt)
    }

    /// Opens a deposit account funded from `source_id`. The deposit is a new account of
    /// kind deposit in the source's currency; the rate is stored for display only.
    pub async fn open_deposit(&self, source_id: &str, amount: Decimal, name: &str, annual_rate: Decimal) -> Result<Receipt, LedgerError> {
        self.ensure_known(&[source_id]).await?;
        let _locks = self.locks.acquire(&[source_id]).await;
        let source = self.load(source_id).await?;

        ensure_valid_amount(amount)?;

        if !is_valid_rate(annual_rate) {
            return Err(LedgerError::invalid_rate(annual_rate));
        }

        let balance = debit(&source, amount)?;
        let deposit = Account::deposit(name, source.currency, amount, annual_rate);
        let deposit_id = deposit.id.clone();
        let now = Utc::now();

        let commit = Commit::new()
            .update(&source, balance)
            .record(NewTransaction::expense(&source.id, now, amount, format!("Opening deposit \"{name}\""), Category::Investments))
            .record(NewTransaction::income(&deposit.id, now, amount, format!("Deposit \"{name}\" funded from {}", source.name), Category::Investments))
            .open(deposit);

        let receipt = self.commit(commit, Some(deposit_id.clone())).await?;
        debug!("Deposit [{deposit_id}] of [{amount}] [{}] opened from [{source_id}] at [{annual_rate}]%", source.currency);

        Ok(receipt)
    }

    pub async fn get_account(&self, account_id: &str) -> Result<Account, LedgerError> {
        self.load(account_id).await
    }

    /// Snapshot of every account, ordered by id.
    pub async fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.storage.read_accounts().await?)
    }

    /// Snapshot of the whole log, newest first.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.storage.read_transactions(None).await?)
    }

    pub async fn transactions_by_account(&self, account_id: &str) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.storage.read_transactions(Some(account_id)).await?)
    }

    //NOTE: Accounts are never removed, so ids checked here still exist once locked and unknown ids never enter the lock table
    async fn ensure_known(&self, account_ids: &[&str]) -> Result<(), LedgerError> {
        for account_id in account_ids {
            if self.storage.read_account(account_id).await?.is_none() {
                return Err(LedgerError::account_not_found(account_id));
            }
        }

        Ok(())
    }

    async fn load(&self, account_id: &str) -> Result<Account, LedgerError> {
        self.storage.read_account(account_id).await?
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }

    async fn commit(&self, commit: Commit, opened_account: Option<AccountId>) -> Result<Receipt, LedgerError> {
        let transactions = commit.transactions.clone();
        self.storage.commit(commit).await?;

        Ok(Receipt { transactions, opened_account })
    }

    fn check_rate(&self, from: &Account, to: &Account, from_amount: Decimal, to_amount: Decimal) -> Result<(), LedgerError> {
        if self.rates.rate(from.currency, to.currency).is_none() {
            return Err(LedgerError::unsupported_pair(from.currency, to.currency));
        }

        let expected = self.rates.convert(from_amount, from.currency, to.currency)
            .ok_or_else(|| LedgerError::overflow(from))?;

        if (to_amount - expected).abs() > self.rate_tolerance {
            return Err(LedgerError::RateMismatch {
                from: from.currency,
                to: to.currency,
                from_amount,
                expected,
                offered: to_amount
            });
        }

        Ok(())
    }
}

fn ensure_valid_amount(amount: Decimal) -> Result<(), LedgerError> {
    if !is_valid_amount(amount) {
        return Err(LedgerError::invalid_amount(amount));
    }

    Ok(())
}

fn debit(account: &Account, amount: Decimal) -> Result<Decimal, LedgerError> {
    if !account.covers(amount) {
        return Err(LedgerError::insufficient_funds(account, amount));
    }

    account.balance.checked_sub(amount).ok_or_else(|| LedgerError::overflow(account))
}

fn credit(account: &Account, amount: Decimal) -> Result<Decimal, LedgerError> {
    account.balance.checked_add(amount).ok_or_else(|| LedgerError::overflow(account))
}

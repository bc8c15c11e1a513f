use super::{Account, AccountKind, Category, ExchangeRates, LedgerError, NewTransaction, TransactionKind, TransactionStatus};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::types::Currency;

#[test]
fn test_new_account_is_active_with_synthesized_number() {
    let account = Account::new("acc-1", "Main", AccountKind::Current, Currency::Rub, Decimal::from(1000));

    assert!(account.active);
    assert_eq!(account.version, 0);
    assert_eq!(account.annual_rate, None);
    assert_eq!(account.number.len(), 24);
    assert!(account.number.starts_with("4081 "));
    assert_eq!(account.number.split(' ').count(), 5);
}

#[test]
fn test_synthesized_number_is_stable_per_id() {
    let first = Account::new("acc-1", "Main", AccountKind::Current, Currency::Rub, Decimal::ZERO);
    let second = Account::new("acc-1", "Renamed", AccountKind::Savings, Currency::Usd, Decimal::ONE);
    let other = Account::new("acc-2", "Main", AccountKind::Current, Currency::Rub, Decimal::ZERO);

    assert_eq!(first.number, second.number);
    assert_ne!(first.number, other.number);
}

#[test]
fn test_deposit_account_carries_rate_and_unique_id() -> Result<()> {
    let rate = Decimal::from_str("12.5")?;
    let first = Account::deposit("My Deposit", Currency::Eur, Decimal::from(500), rate);
    let second = Account::deposit("My Deposit", Currency::Eur, Decimal::from(500), rate);

    assert_eq!(first.kind, AccountKind::Deposit);
    assert_eq!(first.currency, Currency::Eur);
    assert_eq!(first.balance, Decimal::from(500));
    assert_eq!(first.annual_rate, Some(rate));
    assert!(first.id.starts_with("dep-"));
    assert_ne!(first.id, second.id);

    Ok(())
}

#[test]
fn test_account_covers_exact_balance() {
    let account = Account::new("acc-1", "Main", AccountKind::Current, Currency::Rub, Decimal::from(100));

    assert!(account.covers(Decimal::from(100)));
    assert!(!account.covers(Decimal::new(10001, 2)));
}

#[test]
fn test_expense_and_income_apply_sign_and_derive_kind() {
    let now = Utc::now();
    let expense = NewTransaction::expense("a", now, Decimal::from(300), "rent", Category::Transfer).into_transaction();
    let income = NewTransaction::income("b", now, Decimal::from(300), "rent", Category::Transfer).into_transaction();

    assert_eq!(expense.amount, Decimal::from(-300));
    assert_eq!(expense.kind(), TransactionKind::Expense);
    assert_eq!(income.amount, Decimal::from(300));
    assert_eq!(income.kind(), TransactionKind::Income);
    assert_eq!(expense.status, TransactionStatus::Completed);
    assert!(income.is_completed());
    assert_eq!(expense.date, income.date);
    assert_ne!(expense.id, income.id);
}

#[test]
fn test_merchant_is_optional_and_preserved() {
    let transaction = NewTransaction::expense("a", Utc::now(), Decimal::ONE, "coffee", Category::Restaurants)
        .with_merchant(Some("Cafe".to_string()))
        .into_transaction();

    assert_eq!(transaction.merchant.as_deref(), Some("Cafe"));
}

#[test]
fn test_rates_convert_with_minor_unit_rounding() -> Result<()> {
    let rates = ExchangeRates::default();
    let converted = rates.convert(Decimal::from(100), Currency::Usd, Currency::Rub)
        .ok_or_else(|| anyhow!("USD -> RUB should be quoted"))?;

    assert_eq!(converted, Decimal::from(9250));

    let converted = rates.convert(Decimal::from_str("33.33")?, Currency::Rub, Currency::Usd)
        .ok_or_else(|| anyhow!("RUB -> USD should be quoted"))?;

    assert_eq!(converted, Decimal::from_str("0.36")?);

    Ok(())
}

#[test]
fn test_rates_same_currency_is_identity() -> Result<()> {
    let rates = ExchangeRates::empty();
    let rate = rates.rate(Currency::Eur, Currency::Eur).ok_or_else(|| anyhow!("identity rate missing"))?;

    assert_eq!(rate.value, Decimal::ONE);
    assert!(rate.change.is_zero());

    Ok(())
}

#[test]
fn test_rates_missing_pair_is_none() {
    let rates = ExchangeRates::empty().with_rate(Currency::Usd, Currency::Eur, Decimal::ONE, Decimal::ZERO);

    assert!(rates.rate(Currency::Usd, Currency::Eur).is_some());
    assert!(rates.rate(Currency::Eur, Currency::Usd).is_none());
    assert!(rates.convert(Decimal::ONE, Currency::Eur, Currency::Usd).is_none());
}

#[test]
fn test_ledger_error_messages_name_the_account() {
    let account = Account::new("acc-1", "Main", AccountKind::Current, Currency::Rub, Decimal::from(700));

    let error = LedgerError::insufficient_funds(&account, Decimal::from(9999));
    assert_eq!(error.to_string(), "Insufficient funds in account [acc-1]: balance [700], requested [9999]");

    let error = LedgerError::account_not_found("ghost");
    assert_eq!(error.to_string(), "Account [ghost] was not found");
}

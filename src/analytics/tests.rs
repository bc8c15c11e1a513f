use super::{category_breakdown, monthly_expense, monthly_income, monthly_summary, projected_interest, total_balance, CategoryShare};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{Account, AccountKind, Category, NewTransaction, Transaction, TransactionStatus};
use crate::types::Currency;

fn create_transaction(account_id: &str, amount: i64, category: Category, year: i32, month: u32) -> Result<Transaction> {
    let date = Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).single()
        .ok_or_else(|| anyhow!("Invalid test date"))?;

    let magnitude = Decimal::from(amount.abs());
    let transaction = if amount < 0 {
        NewTransaction::expense(account_id, date, magnitude, "test", category)
    } else {
        NewTransaction::income(account_id, date, magnitude, "test", category)
    };

    Ok(transaction.into_transaction())
}

fn create_history() -> Result<Vec<Transaction>> {
    Ok(vec![
        create_transaction("a", 5000, Category::Salary, 2026, 3)?,
        create_transaction("a", -1200, Category::Groceries, 2026, 3)?,
        create_transaction("a", -300, Category::Transport, 2026, 3)?,
        create_transaction("a", -500, Category::Groceries, 2026, 4)?,
        create_transaction("a", 2000, Category::Salary, 2026, 4)?,
        create_transaction("a", 9999, Category::Salary, 2025, 3)?
    ])
}

#[test]
fn test_total_balance_only_counts_matching_currency() {
    let accounts = vec![
        Account::new("a", "A", AccountKind::Current, Currency::Rub, Decimal::from(1000)),
        Account::new("b", "B", AccountKind::Savings, Currency::Rub, Decimal::from(250)),
        Account::new("c", "C", AccountKind::Current, Currency::Usd, Decimal::from(70))
    ];

    assert_eq!(total_balance(&accounts, Currency::Rub), Some(Decimal::from(1250)));
    assert_eq!(total_balance(&accounts, Currency::Usd), Some(Decimal::from(70)));
    assert_eq!(total_balance(&accounts, Currency::Eur), Some(Decimal::ZERO));
}

#[test]
fn test_total_balance_reports_overflow() {
    let accounts = vec![
        Account::new("a", "A", AccountKind::Deposit, Currency::Rub, Decimal::MAX),
        Account::new("b", "B", AccountKind::Current, Currency::Rub, Decimal::ONE)
    ];

    assert_eq!(total_balance(&accounts, Currency::Rub), None);
}

#[test]
fn test_monthly_totals_filter_by_period_and_kind() -> Result<()> {
    let history = create_history()?;

    assert_eq!(monthly_income(&history, 3, 2026), Decimal::from(5000));
    assert_eq!(monthly_expense(&history, 3, 2026), Decimal::from(1500));
    assert_eq!(monthly_income(&history, 4, 2026), Decimal::from(2000));
    assert_eq!(monthly_expense(&history, 4, 2026), Decimal::from(500));
    assert_eq!(monthly_income(&history, 3, 2025), Decimal::from(9999));
    assert!(monthly_expense(&history, 5, 2026).is_zero());

    Ok(())
}

#[test]
fn test_monthly_totals_ignore_incomplete_transactions() -> Result<()> {
    let mut pending = create_transaction("a", -700, Category::Shopping, 2026, 3)?;
    pending.status = TransactionStatus::Pending;

    let mut failed = create_transaction("a", 700, Category::Salary, 2026, 3)?;
    failed.status = TransactionStatus::Failed;

    let history = vec![pending, failed];

    assert!(monthly_expense(&history, 3, 2026).is_zero());
    assert!(monthly_income(&history, 3, 2026).is_zero());
    assert!(category_breakdown(&history).is_empty());

    Ok(())
}

#[test]
fn test_monthly_summary_covers_every_month() -> Result<()> {
    let summary = monthly_summary(&create_history()?, 2026);

    assert_eq!(summary.len(), 12);
    assert_eq!(summary[0].month, 1);
    assert_eq!(summary[2].income, Decimal::from(5000));
    assert_eq!(summary[2].expense, Decimal::from(1500));
    assert_eq!(summary[3].expense, Decimal::from(500));
    assert!(summary[11].income.is_zero());

    Ok(())
}

#[test]
fn test_category_breakdown_sums_expenses_with_percentages() -> Result<()> {
    let breakdown = category_breakdown(&create_history()?);

    assert_eq!(breakdown, vec![
        CategoryShare {
            category: Category::Groceries,
            total: Decimal::from(1700),
            percentage: Decimal::from_str("85.00")?
        },
        CategoryShare {
            category: Category::Transport,
            total: Decimal::from(300),
            percentage: Decimal::from_str("15.00")?
        }
    ]);

    Ok(())
}

#[test]
fn test_category_breakdown_of_empty_history_is_empty() {
    assert!(category_breakdown(&[]).is_empty());
}

#[test]
fn test_projected_interest_uses_simple_interest() -> Result<()> {
    assert_eq!(projected_interest(Decimal::from(500), Decimal::from_str("12.5")?, 12), Some(Decimal::from_str("62.50")?));
    assert_eq!(projected_interest(Decimal::from(100_000), Decimal::from(8), 6), Some(Decimal::from(4000)));
    assert_eq!(projected_interest(Decimal::from(1000), Decimal::ZERO, 12), Some(Decimal::ZERO));

    Ok(())
}

#[test]
fn test_projected_interest_reports_overflow_instead_of_panicking() -> Result<()> {
    let amount = Decimal::from(1_000_000_000);
    let rate = Decimal::from_str("100000000000000000000")?;

    assert_eq!(projected_interest(amount, rate, 12), None);
    assert_eq!(projected_interest(Decimal::MAX, Decimal::ONE_HUNDRED, 12), None);

    Ok(())
}

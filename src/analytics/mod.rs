//! Pure aggregations over account and transaction snapshots.
//!
//! Nothing here mutates state, so results can be recomputed from a fresh snapshot at
//! any time. Only completed transactions count towards income and expense figures.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{Account, Category, Transaction, TransactionKind};
use crate::types::{round_minor, Currency};

/// Total spent in one category and its share of all spending.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub total: Decimal,
    /// Percentage of total spending, rounded to two decimal places.
    pub percentage: Decimal
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// Calendar month, 1 to 12.
    pub month: u32,
    pub income: Decimal,
    /// Magnitude of the month's spending.
    pub expense: Decimal
}

/// Sum of balances of the accounts held in `currency`, or `None` if it overflows.
pub fn total_balance(accounts: &[Account], currency: Currency) -> Option<Decimal> {
    accounts.iter()
        .filter(|account| account.currency == currency)
        .try_fold(Decimal::ZERO, |total, account| total.checked_add(account.balance))
}

pub fn monthly_income(transactions: &[Transaction], month: u32, year: i32) -> Decimal {
    period_total(transactions, TransactionKind::Income, month, year)
}

/// Spending in the month, reported as a positive magnitude.
pub fn monthly_expense(transactions: &[Transaction], month: u32, year: i32) -> Decimal {
    period_total(transactions, TransactionKind::Expense, month, year)
}

/// Income and expense for each month of `year`, January first.
pub fn monthly_summary(transactions: &[Transaction], year: i32) -> Vec<MonthlySummary> {
    (1..=12)
        .map(|month| MonthlySummary {
            month,
            income: monthly_income(transactions, month, year),
            expense: monthly_expense(transactions, month, year)
        })
        .collect()
}

/// Spending per category, largest first. Categories without spending are omitted.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut totals = BTreeMap::<Category, Decimal>::new();

    for transaction in transactions.iter().filter(|transaction| counts_as(transaction, TransactionKind::Expense)) {
        *totals.entry(transaction.category).or_default() += transaction.amount.abs();
    }

    let overall: Decimal = totals.values().copied().sum();

    let mut shares: Vec<CategoryShare> = totals.into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            percentage: percentage_of(total, overall)
        })
        .collect();

    shares.sort_by(|left, right| right.total.cmp(&left.total).then(left.category.cmp(&right.category)));
    shares
}

/// Simple interest earned by a deposit over `term_months`, without compounding.
/// Returns `None` when the projection does not fit in a `Decimal`.
pub fn projected_interest(amount: Decimal, annual_rate: Decimal, term_months: u32) -> Option<Decimal> {
    //NOTE: Dividing last keeps the result exact for the usual two-place rates
    amount.checked_mul(annual_rate)?
        .checked_mul(Decimal::from(term_months))?
        .checked_div(Decimal::from(1200))
        .map(round_minor)
}

fn period_total(transactions: &[Transaction], kind: TransactionKind, month: u32, year: i32) -> Decimal {
    transactions.iter()
        .filter(|transaction| counts_as(transaction, kind))
        .filter(|transaction| transaction.date.month() == month && transaction.date.year() == year)
        .map(|transaction| transaction.amount.abs())
        .sum()
}

fn counts_as(transaction: &Transaction, kind: TransactionKind) -> bool {
    transaction.is_completed() && transaction.kind() == kind
}

fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }

    (part / whole * Decimal::ONE_HUNDRED).round_dp(2)
}

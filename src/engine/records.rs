use rust_decimal::Decimal;
use serde::Deserialize;

use crate::engine::Operation;
use crate::models::{Account, AccountKind, Category};
use crate::types::{AccountId, Currency, RecordError};

/// A row of the account catalog CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub name: String,
    pub kind: AccountKind,
    pub currency: Currency,
    pub balance: Decimal,
    pub number: Option<String>,
    pub active: Option<bool>,
    pub annual_rate: Option<Decimal>
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        let mut account = Account::new(record.id, record.name, record.kind, record.currency, record.balance);

        if let Some(number) = record.number {
            account = account.with_number(number);
        }

        account.active = record.active.unwrap_or(true);
        account.annual_rate = record.annual_rate;
        account
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OperationKind {
    Transfer,
    Payment,
    Exchange,
    Deposit
}

/// A row of the operations CSV.
///
/// Columns are shared between operation kinds: a payment debits `from`, and a deposit
/// takes its name from `description` and its annual rate from `rate`.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationRecord {
    op: OperationKind,
    from: Option<AccountId>,
    to: Option<AccountId>,
    amount: Option<Decimal>,
    to_amount: Option<Decimal>,
    description: Option<String>,
    category: Option<Category>,
    merchant: Option<String>,
    rate: Option<Decimal>
}

impl TryFrom<OperationRecord> for Operation {
    type Error = RecordError;

    fn try_from(record: OperationRecord) -> Result<Self, Self::Error> {
        let operation = match record.op {
            OperationKind::Transfer => Operation::Transfer {
                from: required(record.from, "transfer", "from")?,
                to: required(record.to, "transfer", "to")?,
                amount: required(record.amount, "transfer", "amount")?,
                description: record.description.unwrap_or_else(|| "Transfer".to_string())
            },
            OperationKind::Payment => Operation::Payment {
                account: required(record.from, "payment", "from")?,
                amount: required(record.amount, "payment", "amount")?,
                description: record.description.unwrap_or_else(|| "Payment".to_string()),
                category: record.category.unwrap_or(Category::Other),
                merchant: record.merchant
            },
            OperationKind::Exchange => Operation::Exchange {
                from: required(record.from, "exchange", "from")?,
                to: required(record.to, "exchange", "to")?,
                from_amount: required(record.amount, "exchange", "amount")?,
                to_amount: required(record.to_amount, "exchange", "to_amount")?
            },
            OperationKind::Deposit => Operation::OpenDeposit {
                source: required(record.from, "deposit", "from")?,
                amount: required(record.amount, "deposit", "amount")?,
                name: required(record.description, "deposit", "description")?,
                annual_rate: required(record.rate, "deposit", "rate")?
            }
        };

        Ok(operation)
    }
}

fn required<T>(value: Option<T>, operation: &'static str, field: &'static str) -> Result<T, RecordError> {
    value.ok_or_else(|| RecordError::missing_field(operation, field))
}

use rust_decimal::Decimal;

use crate::models::Category;
use crate::types::AccountId;

/// A ledger operation requested by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        description: String
    },
    Payment {
        account: AccountId,
        amount: Decimal,
        description: String,
        category: Category,
        merchant: Option<String>
    },
    Exchange {
        from: AccountId,
        to: AccountId,
        from_amount: Decimal,
        to_amount: Decimal
    },
    OpenDeposit {
        source: AccountId,
        amount: Decimal,
        name: String,
        annual_rate: Decimal
    }
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Transfer { .. } => "transfer",
            Operation::Payment { .. } => "payment",
            Operation::Exchange { .. } => "exchange",
            Operation::OpenDeposit { .. } => "deposit"
        }
    }
}

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::AccountKind;
use crate::types::{AccountId, Currency};

/// A customer account as held by the account store.
///
/// The balance is always expressed in the account's own currency. The store never
/// converts between currencies; cross-currency movements go through an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Opaque identifier, unique within the store.
    pub id: AccountId,
    pub name: String,
    pub kind: AccountKind,
    pub currency: Currency,
    /// Never negative once committed.
    pub balance: Decimal,
    /// Display-only account number, never used for lookup.
    pub number: String,
    pub active: bool,
    /// Annual interest rate in percent, kept for display on deposit accounts.
    pub annual_rate: Option<Decimal>,
    /// Bumped on every committed balance change.
    pub version: u64
}

impl Account {
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>, kind: AccountKind, currency: Currency, balance: Decimal) -> Self {
        let id = id.into();

        Self {
            number: synthesize_number(&id),
            id,
            name: name.into(),
            kind,
            currency,
            balance,
            active: true,
            annual_rate: None,
            version: 0
        }
    }

    /// Mints a fresh deposit account funded with `amount`.
    pub fn deposit(name: impl Into<String>, currency: Currency, amount: Decimal, annual_rate: Decimal) -> Self {
        let id = format!("dep-{}", Uuid::now_v7().simple());
        let mut account = Self::new(id, name, AccountKind::Deposit, currency, amount);
        account.annual_rate = Some(annual_rate);
        account
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn covers(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}

/// Builds a 20 digit display number grouped in fours, stable for a given id.
fn synthesize_number(id: &str) -> String {
    //NOTE: FNV-1a keeps the number stable across runs, unlike the std hasher
    let hash = id.bytes().fold(0xcbf2_9ce4_8422_2325u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    });

    let digits = format!("4081{:016}", hash % 10u64.pow(16));

    digits.as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

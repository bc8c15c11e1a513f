use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::types::{round_minor, Currency};

/// A quoted conversion rate for one currency pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate {
    /// Units of the target currency per one unit of the source currency.
    pub value: Decimal,
    /// Day-over-day movement, kept for display only.
    pub change: Decimal
}

/// Static rate table keyed by `(from, to)` currency pair.
#[derive(Debug, Clone)]
pub struct ExchangeRates {
    rates: HashMap<(Currency, Currency), Rate>
}

impl ExchangeRates {
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new()
        }
    }

    pub fn with_rate(mut self, from: Currency, to: Currency, value: Decimal, change: Decimal) -> Self {
        self.rates.insert((from, to), Rate { value, change });
        self
    }

    /// Looks up the quote for a pair. Converting a currency to itself is always 1.
    pub fn rate(&self, from: Currency, to: Currency) -> Option<Rate> {
        if from == to {
            return Some(Rate { value: Decimal::ONE, change: Decimal::ZERO });
        }

        self.rates.get(&(from, to)).copied()
    }

    /// The amount `to` should receive for `amount` of `from`, rounded to minor units.
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Option<Decimal> {
        let rate = self.rate(from, to)?;
        amount.checked_mul(rate.value).map(round_minor)
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::empty()
            .with_rate(Currency::Usd, Currency::Rub, Decimal::new(9250, 2), Decimal::new(35, 2))
            .with_rate(Currency::Eur, Currency::Rub, Decimal::new(10020, 2), Decimal::new(-12, 2))
            .with_rate(Currency::Eur, Currency::Usd, Decimal::new(108, 2), Decimal::new(1, 3))
            .with_rate(Currency::Rub, Currency::Usd, Decimal::new(108, 4), Decimal::new(-1, 5))
            .with_rate(Currency::Rub, Currency::Eur, Decimal::new(998, 5), Decimal::new(1, 5))
            .with_rate(Currency::Usd, Currency::Eur, Decimal::new(9259, 4), Decimal::new(-8, 4))
    }
}

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits carried by every supported currency.
pub const MINOR_UNITS: u32 = 2;

/// Highest annual rate, in percent, a deposit may carry.
pub const MAX_ANNUAL_RATE: Decimal = Decimal::ONE_HUNDRED;

/// An amount the ledger accepts: strictly positive and expressible in minor units.
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO && fits_minor_units(amount)
}

/// Whether `amount` has no digits below the currency's minor unit.
pub fn fits_minor_units(amount: Decimal) -> bool {
    amount.normalize().scale() <= MINOR_UNITS
}

pub fn is_valid_rate(annual_rate: Decimal) -> bool {
    annual_rate >= Decimal::ZERO && annual_rate <= MAX_ANNUAL_RATE
}

/// Rounds half away from zero to the currency's minor units.
pub fn round_minor(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNITS, RoundingStrategy::MidpointAwayFromZero)
}

mod currency;
mod errors;
mod money;
#[cfg(test)]
mod tests;

pub use currency::Currency;
pub use errors::RecordError;
pub use money::{fits_minor_units, is_valid_amount, is_valid_rate, round_minor};

pub type AccountId = String;
pub type TransactionId = uuid::Uuid;

use super::{fits_minor_units, is_valid_amount, is_valid_rate, round_minor, Currency};
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_valid_amounts_are_positive_with_at_most_two_decimal_places() -> Result<()> {
    let valid = vec!["0.01", "1", "1.5", "1.50", "1.500", "100000.99"];

    for input in valid {
        assert!(is_valid_amount(Decimal::from_str(input)?), "{input} should be valid");
    }

    Ok(())
}

#[test]
fn test_invalid_amounts_are_rejected() -> Result<()> {
    let invalid = vec!["0", "0.00", "-1", "-0.01", "0.001", "1.999"];

    for input in invalid {
        assert!(!is_valid_amount(Decimal::from_str(input)?), "{input} should be invalid");
    }

    Ok(())
}

#[test]
fn test_balances_must_fit_minor_units() -> Result<()> {
    assert!(fits_minor_units(Decimal::ZERO));
    assert!(fits_minor_units(Decimal::from_str("-12.30")?));
    assert!(fits_minor_units(Decimal::from_str("0.010")?));
    assert!(!fits_minor_units(Decimal::from_str("0.005")?));

    Ok(())
}

#[test]
fn test_annual_rates_are_bounded_percentages() -> Result<()> {
    assert!(is_valid_rate(Decimal::ZERO));
    assert!(is_valid_rate(Decimal::from_str("12.5")?));
    assert!(is_valid_rate(Decimal::ONE_HUNDRED));
    assert!(!is_valid_rate(Decimal::from_str("-0.01")?));
    assert!(!is_valid_rate(Decimal::from_str("100.01")?));
    assert!(!is_valid_rate(Decimal::from_str("100000000000000000000")?));

    Ok(())
}

#[test]
fn test_round_minor_rounds_midpoint_away_from_zero() -> Result<()> {
    assert_eq!(round_minor(Decimal::from_str("1.005")?), Decimal::from_str("1.01")?);
    assert_eq!(round_minor(Decimal::from_str("1.004")?), Decimal::from_str("1.00")?);
    assert_eq!(round_minor(Decimal::from_str("-1.005")?), Decimal::from_str("-1.01")?);

    Ok(())
}

#[test]
fn test_currency_codes_and_display() {
    assert_eq!(Currency::Rub.to_string(), "RUB");
    assert_eq!(Currency::Usd.code(), "USD");
    assert_eq!(Currency::ALL.len(), 3);
}

#[test]
fn test_currency_deserializes_from_uppercase_code() -> Result<()> {
    #[derive(serde::Deserialize)]
    struct Row {
        currency: Currency
    }

    let mut reader = csv::Reader::from_reader("currency\nEUR\n".as_bytes());
    let row = reader.deserialize::<Row>().next().ok_or_else(|| anyhow::anyhow!("row missing"))??;

    assert_eq!(row.currency, Currency::Eur);

    Ok(())
}

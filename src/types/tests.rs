use super::{collapse_whitespace, parse_date, parse_price, parse_quantity, parse_time, Margin};
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_margin_successfully_parses_ratios_and_percentages() -> Result<()> {
    let test_cases = vec![
        ("0.65", "65.0%"),
        ("65%", "65.0%"),
        (" 12.5 % ", "12.5%"),
        ("1", "100.0%"),
        ("0", "0.0%"),
    ];

    for (input_string, expected_output) in test_cases {
        assert_eq!(Margin::from_str(input_string)?.to_string(), expected_output);
    }

    Ok(())
}

#[test]
fn test_margin_rejects_values_outside_unit_interval() {
    assert!(Margin::from_str("1.01").is_err());
    assert!(Margin::from_str("-0.1").is_err());
    assert!(Margin::from_str("150%").is_err());
    assert!(Margin::from_str("").is_err());
    assert!(Margin::from_str("abc").is_err());
}

#[test]
fn test_margin_exposes_complementary_cost_ratio() -> Result<()> {
    let margin = Margin::percent(65);

    assert_eq!(margin.ratio(), Decimal::from_str("0.65")?);
    assert_eq!(margin.cost_ratio(), Decimal::from_str("0.35")?);

    Ok(())
}

#[test]
fn test_canonical_dates_are_accepted_without_repair() -> Result<()> {
    let parsed = parse_date("2023-01-05")?;

    assert_eq!(parsed.value, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap_or_default());
    assert!(!parsed.repaired);

    Ok(())
}

#[test]
fn test_alternative_date_layouts_are_repaired() -> Result<()> {
    let expected = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap_or_default();

    for input in ["1/5/2023", "2023/01/05", "05.01.2023", "2023-01-05 00:00:00", "2023-01-05T07:06:11"] {
        let parsed = parse_date(input)?;
        assert_eq!(parsed.value, expected, "input {input}");
        assert!(parsed.repaired, "input {input}");
    }

    Ok(())
}

#[test]
fn test_unparseable_dates_fail() {
    assert!(parse_date("").is_err());
    assert!(parse_date("not a date").is_err());
    assert!(parse_date("2023-13-45").is_err());
    assert!(parse_date("32/01/2023").is_err());
    assert!(parse_date("2023-01-05 garbage").is_err());
    assert!(parse_date("2023-01-05T").is_err());
    assert!(parse_date("2023-01-05 25:00:00").is_err());
}

#[test]
fn test_time_parsing_normalises_to_whole_seconds() -> Result<()> {
    let canonical = parse_time("07:06:11")?;
    assert_eq!(canonical.value, NaiveTime::from_hms_opt(7, 6, 11).unwrap_or_default());
    assert!(!canonical.repaired);

    let fractional = parse_time("07:06:11.250")?;
    assert_eq!(fractional.value, NaiveTime::from_hms_opt(7, 6, 11).unwrap_or_default());
    assert!(fractional.repaired);

    let short = parse_time("07:06")?;
    assert_eq!(short.value, NaiveTime::from_hms_opt(7, 6, 0).unwrap_or_default());
    assert!(short.repaired);

    let meridiem = parse_time("01:15:00 PM")?;
    assert_eq!(meridiem.value, NaiveTime::from_hms_opt(13, 15, 0).unwrap_or_default());

    assert!(parse_time("25:00:00").is_err());
    assert!(parse_time("noon").is_err());

    Ok(())
}

#[test]
fn test_price_parsing_repairs_currency_formatting() -> Result<()> {
    let plain = parse_price("3.10")?;
    assert_eq!(plain.value, Decimal::from_str("3.10")?);
    assert!(!plain.repaired);

    let dollar = parse_price("$3.10")?;
    assert_eq!(dollar.value, Decimal::from_str("3.10")?);
    assert!(dollar.repaired);

    let grouped = parse_price("1,250.00")?;
    assert_eq!(grouped.value, Decimal::from_str("1250.00")?);
    assert!(grouped.repaired);

    Ok(())
}

#[test]
fn test_price_parsing_rejects_invalid_values() {
    assert!(parse_price("").is_err());
    assert!(parse_price("abc").is_err());
    assert!(parse_price("-2.50").is_err());
    assert!(parse_price("3,5").is_err());
    assert!(parse_price("1.2.3").is_err());
}

#[test]
fn test_quantity_parsing() -> Result<()> {
    let whole = parse_quantity("2")?;
    assert_eq!(whole.value, 2);
    assert!(!whole.repaired);

    let integral = parse_quantity("2.0")?;
    assert_eq!(integral.value, 2);
    assert!(integral.repaired);

    assert!(parse_quantity("0").is_err());
    assert!(parse_quantity("-1").is_err());
    assert!(parse_quantity("1.5").is_err());
    assert!(parse_quantity("two").is_err());
    assert!(parse_quantity("").is_err());

    Ok(())
}

#[test]
fn test_collapse_whitespace_flags_inner_runs_only() {
    let clean = collapse_whitespace("  Latte Rg ");
    assert_eq!(clean.value, "Latte Rg");
    assert!(!clean.repaired);

    let collapsed = collapse_whitespace("Latte   Rg");
    assert_eq!(collapsed.value, "Latte Rg");
    assert!(collapsed.repaired);
}

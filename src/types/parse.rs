use crate::types::errors::ValueError;
use crate::types::Quantity;
use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

const CANONICAL_DATE: &str = "%Y-%m-%d";
const REPAIRABLE_DATES: [&str; 3] = ["%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"];

const CANONICAL_TIME: &str = "%H:%M:%S";
const REPAIRABLE_TIMES: [&str; 4] = ["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// A parsed value together with whether it had to be rewritten to be accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub repaired: bool
}

impl<T> Normalized<T> {
    fn clean(value: T) -> Self {
        Self { value, repaired: false }
    }

    fn repaired(value: T) -> Self {
        Self { value, repaired: true }
    }
}

pub fn parse_date(value: &str) -> Result<Normalized<NaiveDate>, ValueError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValueError::InvalidFormat("Date is an empty string".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, CANONICAL_DATE) {
        return Ok(Normalized::clean(date));
    }

    if let Some(date) = REPAIRABLE_DATES.iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok()) {
        return Ok(Normalized::repaired(date));
    }

    // Timestamps exported from spreadsheets carry a time component we do not need,
    // but it must still be a time
    if let Some((date_part, time_part)) = value.split_once([' ', 'T']) {
        let date = parse_date(date_part)?;
        parse_time(time_part)
            .map_err(|_| ValueError::InvalidFormat(format!("Unrecognised date [{value}]")))?;
        return Ok(Normalized::repaired(date.value));
    }

    Err(ValueError::InvalidFormat(format!("Unrecognised date [{value}]")))
}

pub fn parse_time(value: &str) -> Result<Normalized<NaiveTime>, ValueError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValueError::InvalidFormat("Time is an empty string".to_string()));
    }

    if let Ok(time) = NaiveTime::parse_from_str(value, CANONICAL_TIME) {
        return Ok(Normalized::clean(time));
    }

    REPAIRABLE_TIMES.iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .map(|time| Normalized::repaired(time.with_nanosecond(0).unwrap_or(time)))
        .ok_or_else(|| ValueError::InvalidFormat(format!("Unrecognised time [{value}]")))
}

/// Parses a non-negative unit price, stripping a leading `$` and thousands separators.
pub fn parse_price(value: &str) -> Result<Normalized<Decimal>, ValueError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValueError::InvalidFormat("Price is an empty string".to_string()));
    }

    let mut repaired = false;
    let mut digits = value.to_string();

    if let Some(stripped) = digits.strip_prefix('$') {
        digits = stripped.trim_start().to_string();
        repaired = true;
    }

    if digits.contains(',') {
        if !has_thousands_grouping(&digits) {
            return Err(ValueError::InvalidFormat(format!("Price [{value}] has an invalid separator")));
        }

        digits = digits.replace(',', "");
        repaired = true;
    }

    let price = Decimal::from_str(&digits)?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValueError::Negative(value.to_string()));
    }

    Ok(Normalized { value: price, repaired })
}

/// Parses a strictly positive whole quantity. Integral decimals such as `2.0` are accepted as repairs.
pub fn parse_quantity(value: &str) -> Result<Normalized<Quantity>, ValueError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValueError::InvalidFormat("Quantity is an empty string".to_string()));
    }

    if let Ok(quantity) = value.parse::<Quantity>() {
        if quantity == 0 {
            return Err(ValueError::OutOfRange(value.to_string()));
        }

        return Ok(Normalized::clean(quantity));
    }

    let decimal = Decimal::from_str(value)?;

    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(ValueError::Negative(value.to_string()));
    }

    if !decimal.fract().is_zero() {
        return Err(ValueError::InvalidFormat(format!("Quantity [{value}] is fractional")));
    }

    match decimal.to_u32() {
        Some(0) | None => Err(ValueError::OutOfRange(value.to_string())),
        Some(quantity) => Ok(Normalized::repaired(quantity))
    }
}

/// Collapses inner runs of whitespace into a single space.
pub fn collapse_whitespace(value: &str) -> Normalized<String> {
    let trimmed = value.trim();
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed == trimmed {
        Normalized::clean(collapsed)
    } else {
        Normalized::repaired(collapsed)
    }
}

fn has_thousands_grouping(value: &str) -> bool {
    let integer = value.split('.').next().unwrap_or_default();
    let mut groups = integer.split(',');

    let leading_ok = groups.next()
        .is_some_and(|group| !group.is_empty() && group.len() <= 3 && group.chars().all(|c| c.is_ascii_digit()));

    leading_ok && groups.all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}

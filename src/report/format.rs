use rust_decimal::{Decimal, RoundingStrategy};

/// `$1,234.56`
pub fn money(value: Decimal) -> String {
    with_currency(value, 2)
}

/// `$1,235`
pub fn whole_money(value: Decimal) -> String {
    with_currency(value, 0)
}

/// Formats a ratio such as `0.652` as `65.2%`.
pub fn percent(ratio: Decimal) -> String {
    let points = (ratio * Decimal::ONE_HUNDRED).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{points:.1}%")
}

/// Inserts thousands separators into a non-negative integer count.
pub fn count<T: ToString>(value: T) -> String {
    group_thousands(&value.to_string())
}

fn with_currency(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.*}", decimals as usize, rounded.abs());

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, format!(".{fraction}")),
        None => (text.as_str(), String::new())
    };

    format!("{sign}${}{fraction}", group_thousands(integer))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(character);
    }

    grouped
}

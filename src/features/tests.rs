use super::deriver::derive;
use super::derive_all;

use std::str::FromStr;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::config::MarginTable;
use crate::models::CleanRecord;
use crate::types::Margin;

fn create_record(line: u64, category: &str, price: &str, quantity: u32) -> Result<CleanRecord> {
    Ok(CleanRecord {
        line,
        date: NaiveDate::from_ymd_opt(2023, 3, 12).unwrap_or_default(),
        time: NaiveTime::from_hms_opt(8, 30, 0).unwrap_or_default(),
        store: "Hell's Kitchen".to_string(),
        product: "Cappuccino".to_string(),
        category: category.to_string(),
        unit_price: Decimal::from_str(price)?,
        quantity
    })
}

#[test]
fn test_coffee_revenue_of_one_hundred_yields_sixty_five_profit() -> Result<()> {
    let transaction = derive(create_record(2, "Coffee", "50.00", 2)?, &MarginTable::default());

    assert_eq!(transaction.revenue, Decimal::from_str("100")?);
    assert_eq!(transaction.profit, Decimal::from_str("65.0")?);
    assert_eq!(transaction.margin, Margin::percent(65));

    Ok(())
}

#[test]
fn test_unknown_category_uses_fallback_margin() -> Result<()> {
    let margins = MarginTable::new([("Coffee", Margin::percent(65))], Margin::percent(20));
    let transaction = derive(create_record(2, "Packaged Chocolate", "10.00", 1)?, &margins);

    assert_eq!(transaction.profit, Decimal::from_str("2.00")?);
    assert_eq!(transaction.cost, Decimal::from_str("8.00")?);

    Ok(())
}

#[test]
fn test_derive_all_preserves_order_and_time_buckets() -> Result<()> {
    let records = vec![
        create_record(2, "Coffee", "3.00", 1)?,
        create_record(3, "Bakery", "3.50", 2)?,
        create_record(4, "Tea", "2.50", 1)?,
    ];

    let transactions = derive_all(records, &MarginTable::default());
    let lines: Vec<u64> = transactions.iter().map(|transaction| transaction.line).collect();

    assert_eq!(lines, vec![2, 3, 4]);

    for transaction in &transactions {
        assert_eq!(transaction.hour(), 8);
        assert_eq!(transaction.day_name(), "Sunday");
        assert_eq!(transaction.month_name(), "March");
        assert!(transaction.is_weekend());
        assert!(transaction.profit <= transaction.revenue);
    }

    Ok(())
}

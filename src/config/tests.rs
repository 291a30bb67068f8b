use super::{CleaningPolicy, ConfigError, MarginTable, PipelineConfig};

use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use crate::types::Margin;

#[test]
fn test_default_margin_table_matches_category_cost_ratios() -> Result<()> {
    let table = MarginTable::default();

    assert_eq!(table.margin_for("Coffee"), Margin::from_str("0.65")?);
    assert_eq!(table.margin_for("Tea"), Margin::from_str("0.70")?);
    assert_eq!(table.margin_for("Drinking Chocolate"), Margin::from_str("0.60")?);
    assert_eq!(table.margin_for("Frappé"), Margin::from_str("0.55")?);
    assert_eq!(table.margin_for("Smoothies"), Margin::from_str("0.50")?);
    assert_eq!(table.margin_for("Bakery"), Margin::from_str("0.40")?);
    assert_eq!(table.margin_for("Branded"), Margin::from_str("0.30")?);
    assert_eq!(table.margin_for("Flavours"), Margin::from_str("0.75")?);
    assert_eq!(table.category_count(), 8);

    Ok(())
}

#[test]
fn test_margin_lookup_ignores_case_and_falls_back_for_unknown_categories() -> Result<()> {
    let table = MarginTable::default();

    assert_eq!(table.lookup(" coffee "), Some(Margin::percent(65)));
    assert_eq!(table.lookup("Packaged Chocolate"), None);
    assert_eq!(table.margin_for("Packaged Chocolate"), table.fallback());
    assert_eq!(table.fallback().ratio(), Decimal::from_str("0.5")?);

    Ok(())
}

#[test]
fn test_margin_table_loads_from_csv_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "category,margin")?;
    writeln!(file, "Coffee,60%")?;
    writeln!(file, "Bakery,0.35")?;
    writeln!(file, "*,45%")?;

    let table = MarginTable::from_path(file.path())?;

    assert_eq!(table.margin_for("Coffee"), Margin::percent(60));
    assert_eq!(table.margin_for("Bakery"), Margin::percent(35));
    assert_eq!(table.margin_for("Tea"), Margin::percent(45));
    assert_eq!(table.category_count(), 2);

    Ok(())
}

#[test]
fn test_margin_table_rejects_invalid_files() {
    let duplicate = MarginTable::from_reader("category,margin\nCoffee,0.6\ncoffee,0.7\n".as_bytes());
    assert!(matches!(duplicate, Err(ConfigError::DuplicateCategory(_))));

    let out_of_range = MarginTable::from_reader("category,margin\nCoffee,1.5\n".as_bytes());
    assert!(matches!(out_of_range, Err(ConfigError::Csv(_))));

    let empty = MarginTable::from_reader("category,margin\n".as_bytes());
    assert!(matches!(empty, Err(ConfigError::Empty)));

    let missing = MarginTable::from_path(std::path::Path::new("does/not/exist.csv"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}

#[test]
fn test_margin_table_rejects_a_second_fallback_row() {
    let table = MarginTable::from_reader("category,margin\n*,40%\nCoffee,0.6\n*,45%\n".as_bytes());

    assert!(matches!(table, Err(ConfigError::DuplicateCategory(category)) if category == "*"));
}

#[test]
fn test_cleaning_policy_defaults_and_sigma_override() -> Result<()> {
    let policy = CleaningPolicy::default();

    assert!(policy.price_in_bounds(Decimal::from_str("0.01")?));
    assert!(policy.price_in_bounds(Decimal::from_str("15.00")?));
    assert!(!policy.price_in_bounds(Decimal::ZERO));
    assert!(!policy.price_in_bounds(Decimal::from_str("15.01")?));
    assert!(policy.quantity_in_bounds(1));
    assert!(!policy.quantity_in_bounds(101));
    assert_eq!(policy.outlier_sigma, Some(CleaningPolicy::DEFAULT_SIGMA));

    assert_eq!(policy.clone().with_outlier_sigma(2.5).outlier_sigma, Some(2.5));
    assert_eq!(policy.clone().with_outlier_sigma(0.0).outlier_sigma, None);
    assert_eq!(policy.with_outlier_sigma(f64::NAN).outlier_sigma, None);

    Ok(())
}

#[test]
fn test_pipeline_config_defaults_to_fixed_file_names() {
    let config = PipelineConfig::default();

    assert_eq!(config.input.to_string_lossy(), "coffee_shop_sales.csv");
    assert_eq!(config.cleaned_output.to_string_lossy(), "coffee_shop_sales_cleaned.csv");
    assert_eq!(config.report_output.to_string_lossy(), "coffee_shop_analysis_report.txt");
    assert_eq!(config.top_n, 10);
    assert_eq!(config.bottom_n, 5);
}

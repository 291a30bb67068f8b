use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Result;
use tempfile::TempDir;

const CLEANED_HEADER: &str = "transaction_date,transaction_time,store_location,product_detail,product_category,unit_price,transaction_qty,revenue,cost_ratio,estimated_cost,estimated_profit,hour,day_of_week,month,year,is_weekend";

struct Run {
    output: Output,
    cleaned: PathBuf,
    report: PathBuf,
    _directory: TempDir
}

fn run_pipeline(input: &Path, extra: &[&str]) -> Result<Run> {
    let binary_path = env!("CARGO_BIN_EXE_coffee-sales-pipeline");
    let directory = TempDir::new()?;
    let cleaned = directory.path().join("cleaned.csv");
    let report = directory.path().join("report.txt");

    let output = Command::new(binary_path)
        .arg("--input").arg(input)
        .arg("--output").arg(&cleaned)
        .arg("--report").arg(&report)
        .args(["--log-level", "error"])
        .args(extra)
        .output()?;

    Ok(Run { output, cleaned, report, _directory: directory })
}

#[test]
fn test_cli_correctly_processes_sample() -> Result<()> {
    let run = run_pipeline(&Path::new("samples").join("sample.csv"), &[])?;

    assert!(run.output.status.success(), "{}", String::from_utf8_lossy(&run.output.stderr));

    let cleaned = fs::read_to_string(&run.cleaned)?;
    let mut lines = cleaned.lines();

    assert_eq!(lines.next(), Some(CLEANED_HEADER));

    let mut rows = 0;
    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();

        assert_eq!(fields.len(), 16);

        let price: f64 = fields[5].parse()?;
        let quantity: u32 = fields[6].parse()?;
        let revenue: f64 = fields[7].parse()?;
        let cost: f64 = fields[9].parse()?;
        let profit: f64 = fields[10].parse()?;
        let _: u32 = fields[11].parse()?;
        let _: bool = fields[15].parse()?;

        assert!((price * quantity as f64 - revenue).abs() < 0.005);
        assert!((cost + profit - revenue).abs() < 0.015);
        rows += 1;
    }

    assert_eq!(rows, 20);

    let report = fs::read_to_string(&run.report)?;
    for section in [
        "EXECUTIVE SUMMARY",
        "FINANCIAL PERFORMANCE",
        "PRODUCT ANALYSIS",
        "CATEGORY ANALYSIS",
        "STORE ANALYSIS",
        "TEMPORAL ANALYSIS",
        "KEY INSIGHTS",
        "DATA QUALITY SUMMARY"
    ] {
        assert!(report.contains(section), "report is missing {section}");
    }

    assert!(report.contains("Rows Read: 25"));
    assert!(report.contains("Rows Kept: 20"));
    assert!(report.contains("Rows Repaired: 4"));
    assert!(report.contains("Duplicates Removed: 1"));
    assert!(report.contains("Date Issues Handled: 2"));
    assert!(report.contains("• Uncategorized:"));

    Ok(())
}

#[test]
fn test_cli_reports_fixture_quality_counts() -> Result<()> {
    let run = run_pipeline(&Path::new("samples").join("fixed.csv"), &[])?;

    assert!(run.output.status.success(), "{}", String::from_utf8_lossy(&run.output.stderr));

    let cleaned = fs::read_to_string(&run.cleaned)?;
    assert_eq!(cleaned.lines().count(), 9);

    let report = fs::read_to_string(&run.report)?;
    assert!(report.contains("Total Revenue: $41.45"));
    assert!(report.contains("Total Estimated Profit: $26.63"));
    assert!(report.contains("Duplicates Removed: 1"));
    assert!(report.contains("Date Issues Handled: 1"));
    assert!(report.contains("Most profitable category: Flavours (75.0% margin)"));

    Ok(())
}

#[test]
fn test_cli_applies_margin_file() -> Result<()> {
    let margins = Path::new("samples").join("margins.csv");
    let margins = margins.to_string_lossy();
    let run = run_pipeline(&Path::new("samples").join("fixed.csv"), &["--margins", &margins])?;

    assert!(run.output.status.success(), "{}", String::from_utf8_lossy(&run.output.stderr));

    let cleaned = fs::read_to_string(&run.cleaned)?;
    let first = cleaned.lines().nth(1).unwrap_or_default();

    // Coffee at 70% margin: 6.00 revenue, 1.80 cost, 4.20 profit
    assert!(first.contains(",6.00,0.3,1.80,4.20,"), "unexpected row {first}");

    let report = fs::read_to_string(&run.report)?;
    assert!(report.contains("(45.0% for unlisted categories)"));

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_input() -> Result<()> {
    let directory = TempDir::new()?;
    let run = run_pipeline(&directory.path().join("absent.csv"), &[])?;

    assert!(!run.output.status.success());
    assert!(!run.cleaned.exists());
    assert!(!run.report.exists());

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_column() -> Result<()> {
    let directory = TempDir::new()?;
    let input = directory.path().join("sales.csv");
    fs::write(&input, "transaction_date,transaction_time,store_location\n2023-01-01,07:00:00,Astoria\n")?;

    let run = run_pipeline(&input, &[])?;

    assert!(!run.output.status.success());

    let stderr = String::from_utf8(run.output.stderr)?;
    assert!(stderr.contains("product_detail"), "unexpected error output {stderr}");

    Ok(())
}

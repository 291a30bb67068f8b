use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use crate::models::{RawRecord, RowError, Transaction, REQUIRED_COLUMNS};
use crate::pipeline::PipelineError;
use crate::types::LineNumber;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One line of the cleaned dataset.
#[derive(Serialize)]
struct CleanedRow<'a> {
    transaction_date: String,
    transaction_time: String,
    store_location: &'a str,
    product_detail: &'a str,
    product_category: &'a str,
    unit_price: String,
    transaction_qty: u32,
    revenue: String,
    cost_ratio: String,
    estimated_cost: String,
    estimated_profit: String,
    hour: u32,
    day_of_week: String,
    month: String,
    year: i32,
    is_weekend: bool
}

impl<'a> From<&'a Transaction> for CleanedRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            transaction_date: transaction.date.format("%Y-%m-%d").to_string(),
            transaction_time: transaction.time.format("%H:%M:%S").to_string(),
            store_location: &transaction.store,
            product_detail: &transaction.product,
            product_category: &transaction.category,
            unit_price: cents(transaction.unit_price),
            transaction_qty: transaction.quantity,
            revenue: cents(transaction.revenue),
            cost_ratio: transaction.margin.cost_ratio().normalize().to_string(),
            estimated_cost: cents(transaction.cost),
            estimated_profit: cents(transaction.profit),
            hour: transaction.hour(),
            day_of_week: transaction.day_name(),
            month: transaction.month_name(),
            year: transaction.year(),
            is_weekend: transaction.is_weekend()
        }
    }
}

/// Reads every data row of the input CSV.
///
/// The header must contain all [`REQUIRED_COLUMNS`]. Rows that cannot be
/// decoded are returned as errors so they can be counted rather than
/// aborting the run.
pub fn read_raw(path: &Path) -> Result<Vec<Result<RawRecord, RowError>>, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::OpenInput {
        path: path.to_path_buf(),
        source
    })?;

    read_raw_from(BufReader::new(file))
}

pub fn read_raw_from<R: Read>(reader: R) -> Result<Vec<Result<RawRecord, RowError>>, PipelineError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = reader.headers()
        .map_err(PipelineError::Header)?
        .iter()
        .map(|header| header.trim_start_matches(BYTE_ORDER_MARK))
        .collect();

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|column| !headers.iter().any(|header| header == **column)) {
        return Err(PipelineError::MissingColumn(*missing));
    }

    let mut rows = Vec::new();

    for (index, result) in reader.records().enumerate() {
        // Header occupies line 1
        let fallback_line = index as LineNumber + 2;

        let row = match result {
            Ok(mut record) => {
                let line = record.position().map_or(fallback_line, |position| position.line());

                // Short rows read their missing trailing cells as empty
                while record.len() < headers.len() {
                    record.push_field("");
                }

                record.deserialize::<RawRecord>(Some(&headers))
                    .map(|mut raw| {
                        raw.line = line;
                        raw
                    })
                    .map_err(|error| RowError::malformed(line, &error))
            }
            Err(error) => {
                let line = error.position().map_or(fallback_line, |position| position.line());
                Err(RowError::malformed(line, &error))
            }
        };

        rows.push(row);
    }

    debug!("Read {} rows", rows.len());

    Ok(rows)
}

/// Writes the cleaned dataset with its derived columns.
pub fn write_cleaned<W: Write>(writer: W, transactions: &[Transaction]) -> Result<(), PipelineError> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    for transaction in transactions {
        writer.serialize(CleanedRow::from(transaction))?;
    }

    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

pub fn write_cleaned_file(path: &Path, transactions: &[Transaction]) -> Result<(), PipelineError> {
    let file = File::create(path).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source
    })?;

    write_cleaned(BufWriter::new(file), transactions)
}

pub fn write_report(path: &Path, report: &str) -> Result<(), PipelineError> {
    fs::write(path, report).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source
    })
}

fn cents(value: Decimal) -> String {
    format!("{:.2}", value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

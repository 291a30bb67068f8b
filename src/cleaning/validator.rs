use tracing::debug;

use crate::cleaning::QualityReport;
use crate::models::{CleanRecord, RawRecord, RepairKind, RowError, UNCATEGORIZED};
use crate::types::{collapse_whitespace, parse_date, parse_price, parse_quantity, parse_time, Normalized};

/// A row that passed validation together with the repairs it needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub record: CleanRecord,
    pub repairs: Vec<RepairKind>
}

/// Validates a single raw row.
///
/// Fields are checked in a fixed order (date, time, price, quantity, store,
/// product) and the first failure decides the error. A missing category is
/// not fatal and is replaced by [`UNCATEGORIZED`].
///
/// # Errors
/// Returns `RowError` if the date, time, price or quantity cannot be parsed,
/// or if the store or product is missing.
pub fn validate(raw: &RawRecord) -> Result<Validated, RowError> {
    let mut repairs = Vec::new();

    let date = parse_date(raw.transaction_date.as_deref().unwrap_or_default())
        .map_err(|error| RowError::invalid_date(raw, error))?;
    let date = track(date, RepairKind::DateFormat, &mut repairs);

    let time = parse_time(raw.transaction_time.as_deref().unwrap_or_default())
        .map_err(|error| RowError::invalid_time(raw, error))?;
    let time = track(time, RepairKind::TimeFormat, &mut repairs);

    let unit_price = parse_price(raw.unit_price.as_deref().unwrap_or_default())
        .map_err(|error| RowError::invalid_price(raw, error))?;
    let unit_price = track(unit_price, RepairKind::PriceFormat, &mut repairs);

    let quantity = parse_quantity(raw.transaction_qty.as_deref().unwrap_or_default())
        .map_err(|error| RowError::invalid_quantity(raw, error))?;
    let quantity = track(quantity, RepairKind::QuantityFormat, &mut repairs);

    let store = required_text(raw, raw.store_location.as_deref(), "store_location", &mut repairs)?;
    let product = required_text(raw, raw.product_detail.as_deref(), "product_detail", &mut repairs)?;

    let category = match raw.product_category.as_deref().map(collapse_whitespace) {
        Some(category) if !category.value.is_empty() => track(category, RepairKind::Whitespace, &mut repairs),
        _ => {
            repairs.push(RepairKind::MissingCategory);
            UNCATEGORIZED.to_string()
        }
    };

    repairs.dedup();

    Ok(Validated {
        record: CleanRecord {
            line: raw.line,
            date,
            time,
            store,
            product,
            category,
            unit_price,
            quantity
        },
        repairs
    })
}

/// Runs [`validate`] over every row read from the input, keeping the valid ones in order.
///
/// Rows that could not even be decoded arrive as errors and are counted as malformed.
pub fn validate_records(rows: Vec<Result<RawRecord, RowError>>, quality: &mut QualityReport) -> Vec<CleanRecord> {
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let (outcome, transaction_id) = match row {
            Ok(raw) => (validate(&raw), raw.transaction_id),
            Err(error) => (Err(error), None)
        };

        match outcome {
            Ok(validated) => {
                if !validated.repairs.is_empty() {
                    debug!("Repaired line [{}]: {:?}", validated.record.line, validated.repairs);
                }

                quality.record_repairs(&validated.repairs);
                records.push(validated.record);
            }
            Err(error) => {
                debug!("Dropped line [{}] (transaction [{}]): {error}", error.line(), transaction_id.as_deref().unwrap_or("-"));
                quality.record_drops(error.reason(), 1);
            }
        }
    }

    records
}

fn track<T>(normalized: Normalized<T>, kind: RepairKind, repairs: &mut Vec<RepairKind>) -> T {
    if normalized.repaired {
        repairs.push(kind);
    }

    normalized.value
}

fn required_text(raw: &RawRecord, value: Option<&str>, field: &'static str, repairs: &mut Vec<RepairKind>) -> Result<String, RowError> {
    let normalized = collapse_whitespace(value.unwrap_or_default());

    if normalized.value.is_empty() {
        return Err(RowError::missing_field(raw, field));
    }

    Ok(track(normalized, RepairKind::Whitespace, repairs))
}

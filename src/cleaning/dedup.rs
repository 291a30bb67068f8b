use std::collections::HashSet;

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::CleaningPolicy;
use crate::models::CleanRecord;
use crate::types::Quantity;

/// Records kept by a filtering stage and how many it removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered {
    pub records: Vec<CleanRecord>,
    pub removed: usize
}

/// Fields that make two rows the same sale.
#[derive(Debug, Eq, PartialEq, Hash)]
struct SaleKey<'a> {
    store: &'a str,
    timestamp: NaiveDateTime,
    product: &'a str,
    unit_price: Decimal,
    quantity: Quantity
}

impl<'a> From<&'a CleanRecord> for SaleKey<'a> {
    fn from(record: &'a CleanRecord) -> Self {
        Self {
            store: &record.store,
            timestamp: record.timestamp(),
            product: &record.product,
            unit_price: record.unit_price,
            quantity: record.quantity
        }
    }
}

/// Removes exact duplicate sales, keeping the first occurrence of each.
pub fn deduplicate(records: Vec<CleanRecord>) -> Filtered {
    let total = records.len();

    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(total);
        records.iter()
            .map(|record| {
                let first = seen.insert(SaleKey::from(record));
                if !first {
                    debug!("Dropped duplicate sale on line [{}]", record.line);
                }
                first
            })
            .collect()
    };

    let records: Vec<CleanRecord> = records.into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect();

    Filtered { removed: total - records.len(), records }
}

/// Drops rows outside the policy's price and quantity bounds, then rows whose
/// revenue lies more than `outlier_sigma` standard deviations from the mean.
pub fn remove_outliers(records: Vec<CleanRecord>, policy: &CleaningPolicy) -> Filtered {
    let total = records.len();

    let in_bounds: Vec<CleanRecord> = records.into_iter()
        .filter(|record| {
            let keep = policy.price_in_bounds(record.unit_price) && policy.quantity_in_bounds(record.quantity);
            if !keep {
                debug!("Dropped out of bounds sale on line [{}]: price {} x {}", record.line, record.unit_price, record.quantity);
            }
            keep
        })
        .collect();

    let records = match policy.outlier_sigma {
        Some(sigma) => filter_revenue(in_bounds, sigma),
        None => in_bounds
    };

    Filtered { removed: total - records.len(), records }
}

/// Mean and population standard deviation of a set of revenues.
struct RevenueSpread {
    mean: f64,
    deviation: f64
}

impl RevenueSpread {
    /// `None` when there is nothing to measure a distance against.
    fn of(revenues: &[f64]) -> Option<Self> {
        if revenues.is_empty() {
            return None;
        }

        let count = revenues.len() as f64;
        let mean = revenues.iter().sum::<f64>() / count;
        let variance = revenues.iter()
            .map(|revenue| (revenue - mean) * (revenue - mean))
            .sum::<f64>() / count;

        let deviation = variance.sqrt();
        (deviation > 0.0).then_some(Self { mean, deviation })
    }

    fn is_outlier(&self, revenue: f64, sigma: f64) -> bool {
        (revenue - self.mean).abs() > sigma * self.deviation
    }
}

fn filter_revenue(records: Vec<CleanRecord>, sigma: f64) -> Vec<CleanRecord> {
    let revenues: Vec<f64> = records.iter()
        .map(|record| record.gross().to_f64().unwrap_or_default())
        .collect();

    let Some(spread) = RevenueSpread::of(&revenues) else {
        return records;
    };

    records.into_iter()
        .zip(revenues)
        .filter_map(|(record, revenue)| {
            if spread.is_outlier(revenue, sigma) {
                debug!(
                    "Dropped revenue outlier on line [{}]: {revenue:.2} (mean {:.2}, sd {:.2})",
                    record.line, spread.mean, spread.deviation
                );
                None
            } else {
                Some(record)
            }
        })
        .collect()
}

use std::collections::BTreeSet;

use tracing::{trace, warn};

use crate::config::MarginTable;
use crate::models::{CleanRecord, Transaction};

/// Derives revenue, cost, profit and calendar fields for a single record.
pub fn derive(record: CleanRecord, margins: &MarginTable) -> Transaction {
    let margin = margins.margin_for(&record.category);
    let transaction = Transaction::new(record, margin);

    trace!(
        "Line [{}]: revenue {} at {} margin, profit {}",
        transaction.line,
        transaction.revenue,
        transaction.margin,
        transaction.profit
    );

    transaction
}

/// Applies [`derive`] to every record, preserving order.
///
/// Categories without an entry in the margin table are reported once each.
pub fn derive_all(records: Vec<CleanRecord>, margins: &MarginTable) -> Vec<Transaction> {
    let unknown: BTreeSet<&str> = records.iter()
        .map(|record| record.category.as_str())
        .filter(|category| margins.lookup(category).is_none())
        .collect();

    for category in unknown {
        warn!("No margin configured for category [{category}], using fallback {}", margins.fallback());
    }

    records.into_iter()
        .map(|record| derive(record, margins))
        .collect()
}

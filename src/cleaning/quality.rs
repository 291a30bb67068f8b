use std::collections::BTreeMap;

use crate::models::{DropReason, RepairKind};

/// Counters describing what cleaning did to the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityReport {
    /// Data rows read from the input, header excluded.
    pub rows_read: usize,
    /// Rows kept after at least one field was repaired.
    pub rows_repaired: usize,
    /// Rows in the cleaned dataset.
    pub final_rows: usize,
    repairs: BTreeMap<RepairKind, usize>,
    drops: BTreeMap<DropReason, usize>
}

impl QualityReport {
    pub fn new(rows_read: usize) -> Self {
        Self { rows_read, ..Default::default() }
    }

    pub fn record_drops(&mut self, reason: DropReason, count: usize) {
        if count > 0 {
            *self.drops.entry(reason).or_default() += count;
        }
    }

    /// Counts a kept row that needed the given repairs. A row with several repairs counts once.
    pub fn record_repairs(&mut self, kinds: &[RepairKind]) {
        if kinds.is_empty() {
            return;
        }

        self.rows_repaired += 1;

        for kind in kinds {
            *self.repairs.entry(*kind).or_default() += 1;
        }
    }

    pub fn dropped(&self, reason: DropReason) -> usize {
        self.drops.get(&reason).copied().unwrap_or_default()
    }

    pub fn repaired(&self, kind: RepairKind) -> usize {
        self.repairs.get(&kind).copied().unwrap_or_default()
    }

    pub fn total_dropped(&self) -> usize {
        self.drops.values().sum()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.dropped(DropReason::Duplicate)
    }

    pub fn outliers_removed(&self) -> usize {
        self.dropped(DropReason::Outlier)
    }

    /// Rows whose date was either repaired or rejected.
    pub fn date_issues(&self) -> usize {
        self.dropped(DropReason::InvalidDate) + self.repaired(RepairKind::DateFormat)
    }

    pub fn drops(&self) -> impl Iterator<Item = (DropReason, usize)> + '_ {
        self.drops.iter().map(|(reason, count)| (*reason, *count))
    }

    pub fn repairs(&self) -> impl Iterator<Item = (RepairKind, usize)> + '_ {
        self.repairs.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Share of input rows that survived cleaning, as a percentage.
    pub fn retention_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.final_rows as f64 / self.rows_read as f64) * 100.0
        }
    }
}

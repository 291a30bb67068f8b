use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::aggregate::{aggregate, Aggregates};
use crate::cleaning::{deduplicate, remove_outliers, validate_records, QualityReport};
use crate::config::PipelineConfig;
use crate::features::derive_all;
use crate::models::{DropReason, RawRecord, RowError, Transaction};
use crate::pipeline::io::{read_raw, write_cleaned_file, write_report};
use crate::pipeline::PipelineError;
use crate::report::Report;

/// What a run produced, kept in memory for callers that want more than the files.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub transactions: Vec<Transaction>,
    pub aggregates: Aggregates,
    pub quality: QualityReport
}

/// Clean, derive, aggregate and report, in that order.
pub struct Pipeline {
    config: PipelineConfig
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reads the configured input, writes the cleaned dataset and the report,
    /// and returns everything computed along the way.
    ///
    /// # Errors
    /// Returns `PipelineError` if the input cannot be opened or lacks a
    /// required column, if no row survives cleaning, or if an output file
    /// cannot be written. Individual bad rows are counted, never fatal.
    pub fn run(&self, generated_at: NaiveDateTime) -> Result<PipelineOutput, PipelineError> {
        info!("Reading sales from [{}]", self.config.input.display());
        let rows = read_raw(&self.config.input)?;

        let output = self.process(rows)?;

        write_cleaned_file(&self.config.cleaned_output, &output.transactions)?;
        info!("Wrote {} cleaned rows to [{}]", output.transactions.len(), self.config.cleaned_output.display());

        let report = self.render(&output, generated_at);
        write_report(&self.config.report_output, &report)?;
        info!("Wrote report to [{}]", self.config.report_output.display());

        Ok(output)
    }

    /// Runs every in-memory stage on rows that have already been read.
    pub fn process(&self, rows: Vec<Result<RawRecord, RowError>>) -> Result<PipelineOutput, PipelineError> {
        let mut quality = QualityReport::new(rows.len());

        let records = validate_records(rows, &mut quality);
        info!("Validated {} of {} rows ({} repaired)", records.len(), quality.rows_read, quality.rows_repaired);

        let unique = deduplicate(records);
        quality.record_drops(DropReason::Duplicate, unique.removed);
        debug!("Removed {} duplicate rows", unique.removed);

        let filtered = remove_outliers(unique.records, &self.config.policy);
        quality.record_drops(DropReason::Outlier, filtered.removed);
        debug!("Removed {} outlier rows", filtered.removed);

        quality.final_rows = filtered.records.len();
        info!(
            "Cleaning kept {} rows: {} duplicates and {} outliers removed, {} dropped in total",
            quality.final_rows,
            quality.duplicates_removed(),
            quality.outliers_removed(),
            quality.total_dropped()
        );

        if filtered.records.is_empty() {
            return Err(PipelineError::EmptyDataset { rows_read: quality.rows_read });
        }

        let transactions = derive_all(filtered.records, &self.config.margins);
        let aggregates = aggregate(&transactions);

        info!(
            "Revenue {} across {} transactions, profit {}",
            aggregates.totals.revenue.round_dp(2),
            aggregates.totals.transactions,
            aggregates.totals.profit.round_dp(2)
        );

        Ok(PipelineOutput { transactions, aggregates, quality })
    }

    pub fn render(&self, output: &PipelineOutput, generated_at: NaiveDateTime) -> String {
        Report {
            aggregates: &output.aggregates,
            quality: &output.quality,
            generated_at,
            top_n: self.config.top_n,
            bottom_n: self.config.bottom_n,
            fallback_margin: self.config.margins.fallback()
        }.to_string()
    }
}

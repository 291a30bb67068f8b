//! Run configuration: file locations, cleaning thresholds and the category margin table.
//!
//! Everything here is built once in `main` and handed to the pipeline by
//! reference; no stage reads global state.

mod errors;
mod margins;
mod policy;
#[cfg(test)]
mod tests;

use std::path::PathBuf;

pub use errors::ConfigError;
pub use margins::MarginTable;
pub use policy::CleaningPolicy;

pub const DEFAULT_INPUT: &str = "coffee_shop_sales.csv";
pub const DEFAULT_CLEANED_OUTPUT: &str = "coffee_shop_sales_cleaned.csv";
pub const DEFAULT_REPORT_OUTPUT: &str = "coffee_shop_analysis_report.txt";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_BOTTOM_N: usize = 5;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub cleaned_output: PathBuf,
    pub report_output: PathBuf,
    /// Number of products listed as top performers.
    pub top_n: usize,
    /// Number of products listed as lowest performers.
    pub bottom_n: usize,
    pub policy: CleaningPolicy,
    pub margins: MarginTable
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            cleaned_output: PathBuf::from(DEFAULT_CLEANED_OUTPUT),
            report_output: PathBuf::from(DEFAULT_REPORT_OUTPUT),
            top_n: DEFAULT_TOP_N,
            bottom_n: DEFAULT_BOTTOM_N,
            policy: CleaningPolicy::default(),
            margins: MarginTable::default()
        }
    }
}

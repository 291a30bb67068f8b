//! Row validation, deduplication and outlier removal.
//!
//! The stages run in that order and each one consumes the previous stage's
//! output. Every row that is dropped or repaired is counted in a
//! [`QualityReport`] for the data-quality section of the report.

mod dedup;
mod quality;
mod validator;

pub use dedup::{deduplicate, remove_outliers};
pub use quality::QualityReport;
pub use validator::validate_records;

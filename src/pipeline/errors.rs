use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unable to open input file [{path}]: {source}")]
    OpenInput {
        path: PathBuf,
        source: io::Error
    },
    #[error("Unable to read input header: {0}")]
    Header(csv::Error),
    #[error("Input is missing required column [{0}]")]
    MissingColumn(&'static str),
    #[error("No valid transactions remain after cleaning ({rows_read} rows read)")]
    EmptyDataset {
        rows_read: usize
    },
    #[error("Unable to write [{path}]: {source}")]
    Write {
        path: PathBuf,
        source: io::Error
    },
    #[error("Unable to write cleaned dataset: {0}")]
    Csv(#[from] csv::Error)
}

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read margin table: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid margin table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Margin table lists category [{0}] more than once")]
    DuplicateCategory(String),
    #[error("Margin table is empty")]
    Empty
}

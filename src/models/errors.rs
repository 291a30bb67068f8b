use crate::models::{DropReason, RawRecord};
use crate::types::{LineNumber, ValueError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowError {
    #[error("Invalid date [{value}] on line [{line}]: {source}")]
    InvalidDate {
        line: LineNumber,
        value: String,
        source: ValueError
    },
    #[error("Invalid time [{value}] on line [{line}]: {source}")]
    InvalidTime {
        line: LineNumber,
        value: String,
        source: ValueError
    },
    #[error("Invalid unit price [{value}] on line [{line}]: {source}")]
    InvalidPrice {
        line: LineNumber,
        value: String,
        source: ValueError
    },
    #[error("Invalid quantity [{value}] on line [{line}]: {source}")]
    InvalidQuantity {
        line: LineNumber,
        value: String,
        source: ValueError
    },
    #[error("Missing [{field}] on line [{line}]")]
    MissingField {
        line: LineNumber,
        field: &'static str
    },
    #[error("Malformed row on line [{line}]: {message}")]
    Malformed {
        line: LineNumber,
        message: String
    }
}

impl RowError {
    pub fn invalid_date(raw: &RawRecord, source: ValueError) -> Self {
        Self::InvalidDate { line: raw.line, value: display(&raw.transaction_date), source }
    }

    pub fn invalid_time(raw: &RawRecord, source: ValueError) -> Self {
        Self::InvalidTime { line: raw.line, value: display(&raw.transaction_time), source }
    }

    pub fn invalid_price(raw: &RawRecord, source: ValueError) -> Self {
        Self::InvalidPrice { line: raw.line, value: display(&raw.unit_price), source }
    }

    pub fn invalid_quantity(raw: &RawRecord, source: ValueError) -> Self {
        Self::InvalidQuantity { line: raw.line, value: display(&raw.transaction_qty), source }
    }

    pub fn missing_field(raw: &RawRecord, field: &'static str) -> Self {
        Self::MissingField { line: raw.line, field }
    }

    pub fn malformed(line: LineNumber, error: &csv::Error) -> Self {
        Self::Malformed { line, message: error.to_string() }
    }

    pub fn line(&self) -> LineNumber {
        match self {
            Self::InvalidDate { line, .. }
            | Self::InvalidTime { line, .. }
            | Self::InvalidPrice { line, .. }
            | Self::InvalidQuantity { line, .. }
            | Self::MissingField { line, .. }
            | Self::Malformed { line, .. } => *line
        }
    }

    pub fn reason(&self) -> DropReason {
        match self {
            Self::InvalidDate { .. } => DropReason::InvalidDate,
            Self::InvalidTime { .. } => DropReason::InvalidTime,
            Self::InvalidPrice { .. } => DropReason::InvalidPrice,
            Self::InvalidQuantity { .. } => DropReason::InvalidQuantity,
            Self::MissingField { .. } => DropReason::MissingField,
            Self::Malformed { .. } => DropReason::MalformedRow
        }
    }
}

fn display(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

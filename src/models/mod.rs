mod errors;
mod raw;
mod record;
mod transaction;

pub use errors::RowError;
pub use raw::{RawRecord, REQUIRED_COLUMNS};
pub use record::CleanRecord;
pub use transaction::Transaction;

/// Category assigned to rows that arrive without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Why a row did not make it into the cleaned dataset.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum DropReason {
    InvalidDate,
    InvalidTime,
    InvalidPrice,
    InvalidQuantity,
    MissingField,
    MalformedRow,
    Duplicate,
    Outlier
}

impl DropReason {
    pub fn label(&self) -> &'static str {
        match self {
            DropReason::InvalidDate => "invalid date",
            DropReason::InvalidTime => "invalid time",
            DropReason::InvalidPrice => "invalid price",
            DropReason::InvalidQuantity => "invalid quantity",
            DropReason::MissingField => "missing field",
            DropReason::MalformedRow => "malformed row",
            DropReason::Duplicate => "duplicate",
            DropReason::Outlier => "outlier"
        }
    }
}

/// A field-level fix applied to a row that was kept.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum RepairKind {
    DateFormat,
    TimeFormat,
    PriceFormat,
    QuantityFormat,
    Whitespace,
    MissingCategory
}

impl RepairKind {
    pub fn label(&self) -> &'static str {
        match self {
            RepairKind::DateFormat => "date normalised",
            RepairKind::TimeFormat => "time normalised",
            RepairKind::PriceFormat => "price normalised",
            RepairKind::QuantityFormat => "quantity normalised",
            RepairKind::Whitespace => "whitespace collapsed",
            RepairKind::MissingCategory => "category defaulted"
        }
    }
}

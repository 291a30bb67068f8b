use serde::Deserialize;

use crate::types::LineNumber;

/// Columns that must be present in the input header.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "transaction_date",
    "transaction_time",
    "store_location",
    "product_detail",
    "product_category",
    "unit_price",
    "transaction_qty"
];

/// Represents a single row from the input CSV file, exactly as it was read.
///
/// Every field is optional because nothing has been validated yet. Empty cells
/// arrive as `None`; unknown columns are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    /// Line in the source file, filled in by the reader.
    #[serde(skip)]
    pub line: LineNumber,
    pub transaction_id: Option<String>,
    pub transaction_date: Option<String>,
    pub transaction_time: Option<String>,
    pub store_location: Option<String>,
    pub product_detail: Option<String>,
    pub product_category: Option<String>,
    pub unit_price: Option<String>,
    pub transaction_qty: Option<String>
}

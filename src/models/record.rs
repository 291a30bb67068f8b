use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::types::{LineNumber, Quantity};

/// A row that passed validation: every field is typed and present.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub line: LineNumber,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub store: String,
    pub product: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: Quantity
}

impl CleanRecord {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Price multiplied by quantity.
    pub fn gross(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

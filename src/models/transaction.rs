use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;

use crate::models::CleanRecord;
use crate::types::{LineNumber, Margin, Quantity};

/// A cleaned sale with its financial and calendar features attached.
///
/// Built once by the feature deriver and never modified afterwards, so the
/// invariants `revenue = unit_price * quantity`, `profit = revenue * margin`
/// and `cost = revenue - profit` always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Line of the source row this sale came from.
    pub line: LineNumber,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub store: String,
    pub product: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: Quantity,
    /// Gross sale value.
    pub revenue: Decimal,
    /// Category margin used to estimate the profit.
    pub margin: Margin,
    /// Estimated cost of goods and labour.
    pub cost: Decimal,
    /// Estimated profit.
    pub profit: Decimal
}

impl Transaction {
    pub fn new(record: CleanRecord, margin: Margin) -> Self {
        let revenue = record.gross();
        let profit = revenue * margin.ratio();

        Self {
            line: record.line,
            date: record.date,
            time: record.time,
            store: record.store,
            product: record.product,
            category: record.category,
            unit_price: record.unit_price,
            quantity: record.quantity,
            revenue,
            margin,
            cost: revenue - profit,
            profit
        }
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn day_name(&self) -> String {
        self.date.format("%A").to_string()
    }

    pub fn month_name(&self) -> String {
        self.date.format("%B").to_string()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

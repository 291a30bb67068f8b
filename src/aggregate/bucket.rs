use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::models::Transaction;

/// A reporting dimension transactions can be grouped by.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Dimension {
    Product,
    Category,
    Store,
    Hour,
    DayOfWeek,
    Month
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Product => "product",
            Dimension::Category => "category",
            Dimension::Store => "store",
            Dimension::Hour => "hour",
            Dimension::DayOfWeek => "day of week",
            Dimension::Month => "month"
        }
    }

    /// Bucket key for a transaction and the value buckets are ordered by.
    ///
    /// Product, category and store share a single order value so they keep
    /// first-seen order; time dimensions sort chronologically.
    pub(super) fn key_of(&self, transaction: &Transaction) -> (String, i64) {
        match self {
            Dimension::Product => (transaction.product.clone(), 0),
            Dimension::Category => (transaction.category.clone(), 0),
            Dimension::Store => (transaction.store.clone(), 0),
            Dimension::Hour => (format!("{:02}:00", transaction.hour()), i64::from(transaction.hour())),
            Dimension::DayOfWeek => (
                transaction.day_name(),
                i64::from(transaction.weekday().num_days_from_monday())
            ),
            Dimension::Month => (
                transaction.date.format("%B %Y").to_string(),
                i64::from(transaction.year()) * 12 + i64::from(transaction.month())
            )
        }
    }
}

/// Sums for one (dimension, key) group.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub dimension: Dimension,
    pub key: String,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    pub quantity: u64,
    pub transactions: usize,
    products: BTreeSet<String>
}

impl Bucket {
    pub fn new(dimension: Dimension, key: String) -> Self {
        Self {
            dimension,
            key,
            revenue: Decimal::ZERO,
            cost: Decimal::ZERO,
            profit: Decimal::ZERO,
            quantity: 0,
            transactions: 0,
            products: BTreeSet::new()
        }
    }

    pub fn add(&mut self, transaction: &Transaction) {
        self.revenue += transaction.revenue;
        self.cost += transaction.cost;
        self.profit += transaction.profit;
        self.quantity += u64::from(transaction.quantity);
        self.transactions += 1;

        if !self.products.contains(&transaction.product) {
            self.products.insert(transaction.product.clone());
        }
    }

    /// Profit over revenue, or zero for a group without revenue.
    pub fn margin(&self) -> Decimal {
        ratio(self.profit, self.revenue)
    }

    /// This group's share of the given total revenue.
    pub fn revenue_share(&self, total_revenue: Decimal) -> Decimal {
        ratio(self.revenue, total_revenue)
    }

    pub fn average_transaction_value(&self) -> Decimal {
        ratio(self.revenue, Decimal::from(self.transactions))
    }

    pub fn distinct_products(&self) -> usize {
        self.products.len()
    }
}

pub(super) fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

//! Group-by aggregation of derived transactions.
//!
//! Every reporting dimension is grouped independently from the same slice
//! of transactions. Product, category and store groups keep the order in
//! which their key first appeared in the input; time groups are kept in
//! calendar order.

mod bucket;
mod ranking;
mod totals;

use std::collections::HashMap;

use tracing::debug;

use crate::models::Transaction;

pub use bucket::{Bucket, Dimension};
pub use ranking::{argmax_by, bottom_n, top_n};
pub use totals::Totals;

/// Everything the report needs, computed once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub totals: Totals,
    pub products: Vec<Bucket>,
    pub categories: Vec<Bucket>,
    pub stores: Vec<Bucket>,
    pub hours: Vec<Bucket>,
    pub days: Vec<Bucket>,
    pub months: Vec<Bucket>
}

impl Aggregates {
    pub fn dimension(&self, dimension: Dimension) -> &[Bucket] {
        match dimension {
            Dimension::Product => &self.products,
            Dimension::Category => &self.categories,
            Dimension::Store => &self.stores,
            Dimension::Hour => &self.hours,
            Dimension::DayOfWeek => &self.days,
            Dimension::Month => &self.months
        }
    }

    pub fn profitable_products(&self) -> usize {
        self.products.iter().filter(|bucket| bucket.profit.is_sign_positive() && !bucket.profit.is_zero()).count()
    }
}

pub fn aggregate(transactions: &[Transaction]) -> Aggregates {
    let aggregates = Aggregates {
        totals: Totals::from_transactions(transactions),
        products: group_by(transactions, Dimension::Product),
        categories: group_by(transactions, Dimension::Category),
        stores: group_by(transactions, Dimension::Store),
        hours: group_by(transactions, Dimension::Hour),
        days: group_by(transactions, Dimension::DayOfWeek),
        months: group_by(transactions, Dimension::Month)
    };

    debug!(
        "Aggregated {} products, {} categories, {} stores, {} months",
        aggregates.products.len(),
        aggregates.categories.len(),
        aggregates.stores.len(),
        aggregates.months.len()
    );

    aggregates
}

/// Groups transactions by one dimension and returns the buckets in the dimension's natural order.
pub fn group_by(transactions: &[Transaction], dimension: Dimension) -> Vec<Bucket> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(i64, Bucket)> = Vec::new();

    for transaction in transactions {
        let (key, order) = dimension.key_of(transaction);

        let position = *index.entry(key).or_insert_with_key(|key| {
            buckets.push((order, Bucket::new(dimension, key.clone())));
            buckets.len() - 1
        });

        buckets[position].1.add(transaction);
    }

    // Stable, so keys sharing an order value stay in first-seen order
    buckets.sort_by_key(|(order, _)| *order);
    buckets.into_iter().map(|(_, bucket)| bucket).collect()
}

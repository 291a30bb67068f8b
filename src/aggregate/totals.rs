use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::aggregate::bucket::ratio;
use crate::models::Transaction;

/// Dataset-wide figures for the executive summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    pub transactions: usize,
    pub units: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub distinct_products: usize,
    pub distinct_stores: usize
}

impl Totals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut products = HashSet::new();
        let mut stores = HashSet::new();

        let mut totals = Self {
            revenue: Decimal::ZERO,
            cost: Decimal::ZERO,
            profit: Decimal::ZERO,
            transactions: transactions.len(),
            units: 0,
            first_date: None,
            last_date: None,
            distinct_products: 0,
            distinct_stores: 0
        };

        for transaction in transactions {
            totals.revenue += transaction.revenue;
            totals.cost += transaction.cost;
            totals.profit += transaction.profit;
            totals.units += u64::from(transaction.quantity);

            totals.first_date = Some(totals.first_date.map_or(transaction.date, |date| date.min(transaction.date)));
            totals.last_date = Some(totals.last_date.map_or(transaction.date, |date| date.max(transaction.date)));

            products.insert(transaction.product.as_str());
            stores.insert(transaction.store.as_str());
        }

        totals.distinct_products = products.len();
        totals.distinct_stores = stores.len();
        totals
    }

    /// Overall profit margin, zero when there is no revenue.
    pub fn margin(&self) -> Decimal {
        ratio(self.profit, self.revenue)
    }

    pub fn average_transaction_value(&self) -> Decimal {
        ratio(self.revenue, Decimal::from(self.transactions))
    }

    pub fn average_transaction_profit(&self) -> Decimal {
        ratio(self.profit, Decimal::from(self.transactions))
    }

    pub fn average_daily_revenue(&self) -> Decimal {
        ratio(self.revenue, Decimal::from(self.period_days()))
    }

    /// Number of calendar days covered, both ends included.
    pub fn period_days(&self) -> i64 {
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => (last - first).num_days() + 1,
            _ => 0
        }
    }
}

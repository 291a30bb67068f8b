use rust_decimal::Decimal;

use crate::types::Quantity;

/// Fixed outlier rules applied after deduplication.
///
/// Rows outside the price or quantity bounds are dropped first. The
/// remaining rows are then checked against a revenue band of
/// `mean ± outlier_sigma * stddev`; `None` switches that check off.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningPolicy {
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_quantity: Quantity,
    pub max_quantity: Quantity,
    pub outlier_sigma: Option<f64>
}

impl CleaningPolicy {
    pub const DEFAULT_SIGMA: f64 = 4.0;

    /// Replaces the revenue threshold. Zero, negative or non-finite values disable it.
    pub fn with_outlier_sigma(mut self, sigma: f64) -> Self {
        self.outlier_sigma = (sigma.is_finite() && sigma > 0.0).then_some(sigma);
        self
    }

    pub fn price_in_bounds(&self, price: Decimal) -> bool {
        price >= self.min_price && price <= self.max_price
    }

    pub fn quantity_in_bounds(&self, quantity: Quantity) -> bool {
        quantity >= self.min_quantity && quantity <= self.max_quantity
    }
}

impl Default for CleaningPolicy {
    fn default() -> Self {
        Self {
            min_price: Decimal::new(1, 2),
            max_price: Decimal::new(1500, 2),
            min_quantity: 1,
            max_quantity: 100,
            outlier_sigma: Some(Self::DEFAULT_SIGMA)
        }
    }
}

use rust_decimal::Decimal;

use crate::aggregate::{argmax_by, top_n, Aggregates, Bucket, Dimension};
use crate::report::format::percent;

/// Products below this margin are flagged for review.
const LOW_MARGIN: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
const STRONG_MARGIN: Decimal = Decimal::from_parts(50, 0, 0, false, 2);
const HEALTHY_MARGIN: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Rule-based observations drawn from the aggregates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insights {
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>
}

/// Peak month by total revenue; peak day and hour by average transaction value.
/// Ties go to the earliest in calendar order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peaks<'a> {
    pub month: Option<&'a Bucket>,
    pub day: Option<&'a Bucket>,
    pub hour: Option<&'a Bucket>
}

impl<'a> Peaks<'a> {
    pub fn of(aggregates: &'a Aggregates) -> Self {
        let by_revenue = |a: &Bucket, b: &Bucket| a.revenue.cmp(&b.revenue);
        let by_average = |a: &Bucket, b: &Bucket| a.average_transaction_value().cmp(&b.average_transaction_value());

        Self {
            month: argmax_by(aggregates.dimension(Dimension::Month), by_revenue),
            day: argmax_by(aggregates.dimension(Dimension::DayOfWeek), by_average),
            hour: argmax_by(aggregates.dimension(Dimension::Hour), by_average)
        }
    }
}

/// Category with the highest margin; the first category in key order wins ties.
pub fn most_profitable_category(aggregates: &Aggregates) -> Option<&Bucket> {
    argmax_by(&aggregates.categories, |a, b| a.margin().cmp(&b.margin()))
}

pub fn best_store(aggregates: &Aggregates) -> Option<&Bucket> {
    argmax_by(&aggregates.stores, |a, b| a.profit.cmp(&b.profit))
}

pub fn low_margin_products(aggregates: &Aggregates) -> Vec<&Bucket> {
    aggregates.products.iter()
        .filter(|bucket| bucket.margin() < LOW_MARGIN)
        .collect()
}

pub fn generate(aggregates: &Aggregates) -> Insights {
    let mut insights = Insights::default();
    let margin = aggregates.totals.margin();

    if margin > STRONG_MARGIN {
        insights.key_insights.push(format!("Strong profitability with >50% profit margin ({})", percent(margin)));
    } else if margin > HEALTHY_MARGIN {
        insights.key_insights.push(format!("Healthy profitability with moderate margins ({})", percent(margin)));
    } else {
        insights.key_insights.push(format!("Profitability needs improvement ({})", percent(margin)));
        insights.recommendations.push("Review pricing strategy and cost optimization".to_string());
    }

    let leaders: Vec<&str> = top_n(&aggregates.products, 3).iter()
        .map(|bucket| bucket.key.as_str())
        .collect();

    if !leaders.is_empty() {
        insights.key_insights.push(format!("Top {} profit generators: {}", leaders.len(), leaders.join(", ")));
    }

    let low_margin = low_margin_products(aggregates);
    if !low_margin.is_empty() {
        insights.recommendations.push(format!("Review {} products with <20% profit margin", low_margin.len()));
    }

    if let Some(category) = most_profitable_category(aggregates) {
        insights.key_insights.push(format!("Most profitable category: {} ({} margin)", category.key, percent(category.margin())));
    }

    if aggregates.stores.len() > 1 {
        if let Some(store) = best_store(aggregates) {
            insights.key_insights.push(format!("Best performing {}: {}", store.dimension.label(), store.key));
        }
    }

    let peaks = Peaks::of(aggregates);
    if let (Some(month), Some(day), Some(hour)) = (peaks.month, peaks.day, peaks.hour) {
        insights.key_insights.push(format!("Peak performance: {}, {}s, {}", month.key, day.key, hour.key));
    }

    insights
}

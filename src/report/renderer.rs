use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;

use crate::aggregate::{bottom_n, top_n, Aggregates, Bucket};
use crate::cleaning::QualityReport;
use crate::report::format::{count, money, percent, whole_money};
use crate::report::insights::{generate, Peaks};
use crate::types::Margin;

const PRODUCT_NAME_WIDTH: usize = 60;

/// The plain-text business report.
///
/// Rendering is pure: everything printed is derived from the aggregates,
/// the quality counters and the timestamp handed in, so the same inputs
/// always produce the same text.
pub struct Report<'a> {
    pub aggregates: &'a Aggregates,
    pub quality: &'a QualityReport,
    pub generated_at: NaiveDateTime,
    pub top_n: usize,
    pub bottom_n: usize,
    /// Margin assumed for categories without a configured one.
    pub fallback_margin: Margin
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.header(f)?;
        self.executive_summary(f)?;
        self.financial_performance(f)?;
        self.product_analysis(f)?;
        self.category_analysis(f)?;
        self.store_analysis(f)?;
        self.temporal_analysis(f)?;
        self.insights(f)?;
        self.data_quality_summary(f)
    }
}

impl Report<'_> {
    fn header(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "COFFEE SHOP SALES ANALYSIS")?;
        writeln!(f, "COMPREHENSIVE REPORT")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f)?;
        writeln!(f, "Report Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Analysis Period: {}", self.period())?;
        writeln!(f)
    }

    fn executive_summary(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let totals = &self.aggregates.totals;

        section(f, "EXECUTIVE SUMMARY", 20)?;
        writeln!(f, "Total Revenue: {}", money(totals.revenue))?;
        writeln!(f, "Total Estimated Profit: {}", money(totals.profit))?;
        writeln!(f, "Overall Profit Margin: {}", percent(totals.margin()))?;
        writeln!(f, "Total Transactions: {}", count(totals.transactions))?;
        writeln!(f, "Analysis Period: {} days", totals.period_days())?;
        writeln!(f, "Average Daily Revenue: {}", money(totals.average_daily_revenue()))?;
        writeln!(f)
    }

    fn financial_performance(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let totals = &self.aggregates.totals;

        section(f, "FINANCIAL PERFORMANCE", 25)?;
        writeln!(f, "Revenue Metrics:")?;
        writeln!(f, "  • Total Revenue: {}", money(totals.revenue))?;
        writeln!(f, "  • Average Transaction Value: {}", money(totals.average_transaction_value()))?;
        writeln!(f, "  • Total Transactions: {}", count(totals.transactions))?;
        writeln!(f, "  • Units Sold: {}", count(totals.units))?;
        writeln!(f)?;
        writeln!(f, "Profitability Metrics:")?;
        writeln!(f, "  • Total Estimated Cost: {}", money(totals.cost))?;
        writeln!(f, "  • Total Estimated Profit: {}", money(totals.profit))?;
        writeln!(f, "  • Overall Profit Margin: {}", percent(totals.margin()))?;
        writeln!(f, "  • Average Transaction Profit: {}", money(totals.average_transaction_profit()))?;
        writeln!(f)
    }

    fn product_analysis(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let products = &self.aggregates.products;

        section(f, "PRODUCT ANALYSIS", 20)?;
        writeln!(f, "Total Products: {}", products.len())?;
        writeln!(f, "Profitable Products: {}", self.aggregates.profitable_products())?;
        writeln!(f)?;

        let top = top_n(products, self.top_n);
        writeln!(f, "Top {} Most Profitable Products:", top.len())?;
        product_lines(f, &top)?;
        writeln!(f)?;

        let bottom = bottom_n(products, self.bottom_n);
        if !bottom.is_empty() {
            writeln!(f, "Lowest Performing Products:")?;
            product_lines(f, &bottom)?;
            writeln!(f)?;
        }

        Ok(())
    }

    fn category_analysis(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let total_revenue = self.aggregates.totals.revenue;

        section(f, "CATEGORY ANALYSIS", 20)?;
        writeln!(f, "Performance by Category:")?;

        for category in by_revenue(&self.aggregates.categories) {
            writeln!(f, "• {}:", category.key)?;
            writeln!(f, "  Revenue: {} ({} of total)", money(category.revenue), percent(category.revenue_share(total_revenue)))?;
            writeln!(f, "  Profit: {} (Margin: {})", money(category.profit), percent(category.margin()))?;
            writeln!(f, "  Products: {} | Transactions: {}", category.distinct_products(), count(category.transactions))?;
            writeln!(f)?;
        }

        Ok(())
    }

    fn store_analysis(&self, f: &mut Formatter<'_>) -> fmt::Result {
        section(f, "STORE ANALYSIS", 15)?;
        writeln!(f, "Performance by Store:")?;

        for store in by_revenue(&self.aggregates.stores) {
            writeln!(f, "• {}:", store.key)?;
            writeln!(f, "  Revenue: {}", money(store.revenue))?;
            writeln!(f, "  Profit: {} (Margin: {})", money(store.profit), percent(store.margin()))?;
            writeln!(f, "  Transactions: {} | Avg Value: {}", count(store.transactions), money(store.average_transaction_value()))?;
            writeln!(f, "  Products Sold: {} unique items", store.distinct_products())?;
            writeln!(f)?;
        }

        Ok(())
    }

    fn temporal_analysis(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let peaks = Peaks::of(self.aggregates);
        let key = |bucket: Option<&Bucket>| bucket.map_or_else(|| "n/a".to_string(), |bucket| bucket.key.clone());

        section(f, "TEMPORAL ANALYSIS", 18)?;
        writeln!(f, "Peak Performance:")?;
        writeln!(f, "  • Best Month: {}", key(peaks.month))?;
        writeln!(f, "  • Best Day: {}", key(peaks.day))?;
        writeln!(f, "  • Peak Hour: {}", key(peaks.hour))?;
        writeln!(f)?;

        writeln!(f, "Monthly Performance:")?;
        for month in &self.aggregates.months {
            writeln!(f, "  {:<16}: {:>10} revenue, {:>6} margin", month.key, whole_money(month.revenue), percent(month.margin()))?;
        }
        writeln!(f)?;

        writeln!(f, "Daily Patterns (Average Performance):")?;
        for day in &self.aggregates.days {
            writeln!(f, "  {:<10}: {:>8} avg revenue, {:>6} transactions", day.key, money(day.average_transaction_value()), count(day.transactions))?;
        }
        writeln!(f)?;

        writeln!(f, "Hourly Patterns (Average Performance):")?;
        for hour in &self.aggregates.hours {
            writeln!(f, "  {:<5}: {:>8} avg revenue, {:>6} transactions", hour.key, money(hour.average_transaction_value()), count(hour.transactions))?;
        }
        writeln!(f)
    }

    fn insights(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let insights = generate(self.aggregates);

        section(f, "KEY INSIGHTS", 15)?;
        for (index, insight) in insights.key_insights.iter().enumerate() {
            writeln!(f, "{}. {insight}", index + 1)?;
        }
        writeln!(f)?;

        if !insights.recommendations.is_empty() {
            section(f, "RECOMMENDATIONS", 18)?;
            for (index, recommendation) in insights.recommendations.iter().enumerate() {
                writeln!(f, "{}. {recommendation}", index + 1)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }

    fn data_quality_summary(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let quality = self.quality;
        let totals = &self.aggregates.totals;

        section(f, "DATA QUALITY SUMMARY", 23)?;
        writeln!(f, "Rows Read: {}", count(quality.rows_read))?;
        writeln!(f, "Rows Kept: {} ({:.1}% retained)", count(quality.final_rows), quality.retention_rate())?;
        writeln!(f, "Rows Repaired: {}", count(quality.rows_repaired))?;
        writeln!(f, "Rows Dropped: {}", count(quality.total_dropped()))?;
        writeln!(f, "Duplicates Removed: {}", count(quality.duplicates_removed()))?;
        writeln!(f, "Outliers Removed: {}", count(quality.outliers_removed()))?;
        writeln!(f, "Date Issues Handled: {}", count(quality.date_issues()))?;

        let drops: Vec<String> = quality.drops()
            .map(|(reason, dropped)| format!("{} ({dropped})", reason.label()))
            .collect();
        if !drops.is_empty() {
            writeln!(f, "Drop Reasons: {}", drops.join(", "))?;
        }

        let repairs: Vec<String> = quality.repairs()
            .map(|(kind, repaired)| format!("{} ({repaired})", kind.label()))
            .collect();
        if !repairs.is_empty() {
            writeln!(f, "Repairs: {}", repairs.join(", "))?;
        }

        writeln!(f, "Date Range: {}", self.period())?;
        writeln!(f, "Unique Products: {}", totals.distinct_products)?;
        writeln!(f, "Unique Stores: {}", totals.distinct_stores)?;
        writeln!(f, "Cost Estimation: Fixed margin per product category ({} for unlisted categories)", self.fallback_margin)
    }

    fn period(&self) -> String {
        let totals = &self.aggregates.totals;

        match (totals.first_date, totals.last_date) {
            (Some(first), Some(last)) => format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d")),
            _ => "n/a".to_string()
        }
    }
}

fn section(f: &mut Formatter<'_>, title: &str, underline: usize) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(underline))
}

fn product_lines(f: &mut Formatter<'_>, products: &[&Bucket]) -> fmt::Result {
    for (index, product) in products.iter().enumerate() {
        let name: String = product.key.chars().take(PRODUCT_NAME_WIDTH).collect();
        writeln!(
            f,
            "{:>2}. {:<width$} {:>10} ({:>6})",
            index + 1,
            name,
            whole_money(product.profit),
            percent(product.margin()),
            width = PRODUCT_NAME_WIDTH
        )?;
    }

    Ok(())
}

/// Highest revenue first; equal revenue keeps key order.
fn by_revenue(buckets: &[Bucket]) -> Vec<&Bucket> {
    let mut sorted: Vec<&Bucket> = buckets.iter().collect();
    sorted.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    sorted
}

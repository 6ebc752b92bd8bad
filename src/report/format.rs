//! Formatted terminal output for the CLI subcommands.

use crate::domain::{CategorySummary, Dataset, DatasetStats, DerivedRecord, ViewConfig};
use crate::ingredients::IngredientFrequency;

use super::series::{ChartSeries, PriceTypeStats};

/// Format the dataset overview: stats plus the head of the derived table.
pub fn format_overview(
    dataset: &Dataset,
    derived: &[DerivedRecord],
    stats: &DatasetStats,
    limit: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== skincare - Product Listing Overview ===\n");
    out.push_str(&format!(
        "Products: {} | Categories: {}\n",
        stats.n_products, stats.n_categories
    ));
    out.push_str(&format!(
        "Price (EUR): min={:.2} mean={:.2} max={:.2}\n",
        stats.price_min, stats.price_mean, stats.price_max
    ));
    out.push_str(&format!(
        "Package size: [{:.0}, {:.0}]\n\n",
        stats.size_min, stats.size_max
    ));

    out.push_str(&format!(
        "{:<36} {:<14} {:>10} {:>12}\n",
        "product_name", "product_type", "size_ml", "price_eur"
    ));
    out.push_str(&format!(
        "{:-<36} {:-<14} {:-<10} {:-<12}\n",
        "", "", "", ""
    ));

    for (record, d) in dataset.records.iter().zip(derived).take(limit) {
        out.push_str(&format!(
            "{:<36} {:<14} {:>10.0} {:>12.2}\n",
            truncate(&record.product_name, 36),
            truncate(&record.product_type, 14),
            d.package_size_ml,
            d.price_euros
        ));
    }
    if dataset.len() > limit {
        out.push_str(&format!("... ({} more rows)\n", dataset.len() - limit));
    }

    out
}

/// Format a single category analysis.
pub fn format_category_summary(summary: &CategorySummary, limit: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Category: {} ===\n", summary.category));
    out.push_str(&format!("Products: {}\n", summary.product_count));
    out.push_str(&format!(
        "Distinct ingredient lists: {}\n",
        summary.distinct_ingredient_lists
    ));

    out.push_str("\nCommon 3 ingredients:\n");
    if summary.top.is_empty() {
        out.push_str("  (none)\n");
    }
    for (token, count) in &summary.top {
        out.push_str(&format!("  {:<40} {count}\n", truncate(token, 40)));
    }

    out.push_str("\nIngredient counts:\n");
    out.push_str(&format_frequency_table(&summary.frequency, limit));

    out
}

/// Format a frequency table, truncated to `limit` entries.
pub fn format_frequency_table(freq: &IngredientFrequency, limit: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<40} {:>8}\n", "ingredient", "count"));
    out.push_str(&format!("{:-<40} {:-<8}\n", "", ""));
    for (token, count) in freq.entries().iter().take(limit) {
        out.push_str(&format!("{:<40} {:>8}\n", truncate(token, 40), count));
    }
    if freq.len() > limit {
        out.push_str(&format!("... ({} more ingredients)\n", freq.len() - limit));
    }

    out
}

/// Format the per-category price summary table.
pub fn format_price_by_type(stats: &[PriceTypeStats]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<14} {:>6} {:>10} {:>10} {:>10}\n",
        "product_type", "n", "min", "mean", "max"
    ));
    out.push_str(&format!(
        "{:-<14} {:-<6} {:-<10} {:-<10} {:-<10}\n",
        "", "", "", "", ""
    ));
    for s in stats {
        out.push_str(&format!(
            "{:<14} {:>6} {:>10.2} {:>10.2} {:>10.2}\n",
            truncate(&s.category, 14),
            s.n,
            s.price_min,
            s.price_mean,
            s.price_max
        ));
    }

    out
}

/// Format the chart source data printed by the `charts` subcommand.
pub fn format_charts(
    dataset: &Dataset,
    derived: &[DerivedRecord],
    config: &ViewConfig,
) -> String {
    let mut out = String::new();

    out.push_str("Price by product type:\n");
    out.push_str(&format_price_by_type(&super::series::price_by_type(
        dataset, derived,
    )));

    out.push_str("\nProduct counts:\n");
    out.push_str(&format_series(&super::series::product_count_series(dataset)));

    out.push_str("\nPackage size histogram:\n");
    out.push_str(&format_series(&super::series::package_size_histogram(
        derived,
        config.histogram_bins,
    )));

    let flags = super::series::flag_series(dataset, config.top_n);
    if !flags.is_empty() {
        out.push_str("\nIngredient flag totals:\n");
        out.push_str(&format_series(&flags));
    }

    out
}

fn format_series(series: &ChartSeries) -> String {
    let mut out = String::new();
    for (label, value) in series.labels.iter().zip(&series.values) {
        out.push_str(&format!("{:<24} {:>10.1}\n", truncate(label, 24), value));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

//! Reporting utilities: summary statistics, chart series, and formatted
//! terminal tables.
//!
//! We keep formatting and series preparation in one place so:
//! - the data transformations stay clean and testable
//! - output changes are localized
//! - the TUI and the CLI render the same underlying numbers

mod format;
pub mod series;

pub use format::{
    format_category_summary, format_charts, format_frequency_table, format_overview,
    format_price_by_type,
};

use crate::domain::{Dataset, DatasetStats, DerivedRecord};
use crate::ingredients;

/// Summary statistics over a dataset and its derived fields.
///
/// `derived` must be aligned with `dataset.records`; an empty dataset yields
/// zeroed stats rather than an error.
pub fn compute_stats(dataset: &Dataset, derived: &[DerivedRecord]) -> DatasetStats {
    let mut price_min = f64::INFINITY;
    let mut price_max = f64::NEG_INFINITY;
    let mut price_sum = 0.0;
    let mut size_min = f64::INFINITY;
    let mut size_max = f64::NEG_INFINITY;

    for d in derived {
        price_min = price_min.min(d.price_euros);
        price_max = price_max.max(d.price_euros);
        price_sum += d.price_euros;
        size_min = size_min.min(d.package_size_ml);
        size_max = size_max.max(d.package_size_ml);
    }

    let n = derived.len();
    if n == 0 {
        return DatasetStats {
            n_products: dataset.len(),
            n_categories: ingredients::categories(dataset).len(),
            price_min: 0.0,
            price_mean: 0.0,
            price_max: 0.0,
            size_min: 0.0,
            size_max: 0.0,
        };
    }

    DatasetStats {
        n_products: dataset.len(),
        n_categories: ingredients::categories(dataset).len(),
        price_min,
        price_mean: price_sum / n as f64,
        price_max,
        size_min,
        size_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductRecord;

    #[test]
    fn stats_over_two_records() {
        let dataset = Dataset {
            records: vec![
                ProductRecord {
                    line: 2,
                    product_name: "A".to_string(),
                    product_type: "Serum".to_string(),
                    ingredients: String::new(),
                    price: "£10.00".to_string(),
                    flags: Vec::new(),
                },
                ProductRecord {
                    line: 3,
                    product_name: "B".to_string(),
                    product_type: "Balm".to_string(),
                    ingredients: String::new(),
                    price: "£30.00".to_string(),
                    flags: Vec::new(),
                },
            ],
            flag_names: Vec::new(),
        };
        let derived = vec![
            DerivedRecord {
                package_size_ml: 50.0,
                price_euros: 10.0,
            },
            DerivedRecord {
                package_size_ml: 100.0,
                price_euros: 30.0,
            },
        ];

        let stats = compute_stats(&dataset, &derived);
        assert_eq!(stats.n_products, 2);
        assert_eq!(stats.n_categories, 2);
        assert_eq!(stats.price_mean, 20.0);
        assert_eq!(stats.price_max, 30.0);
        assert_eq!(stats.size_min, 50.0);
    }

    #[test]
    fn empty_dataset_yields_zeroed_stats() {
        let stats = compute_stats(&Dataset::default(), &[]);
        assert_eq!(stats.n_products, 0);
        assert_eq!(stats.price_mean, 0.0);
    }
}

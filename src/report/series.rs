//! Chart series preparation.
//!
//! Pure `(labels, values)` builders consumed by the TUI (and printed by the
//! `charts` subcommand). No rendering happens here, which keeps the chart
//! data testable without a terminal.

use crate::domain::{Dataset, DerivedRecord};
use crate::ingredients;

/// Labels paired with values, ready for a bar-style chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-category price summary (the box-plot view reduced to its numbers).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTypeStats {
    pub category: String,
    pub n: usize,
    pub price_min: f64,
    pub price_mean: f64,
    pub price_max: f64,
}

/// Price min/mean/max per category, in first-seen category order.
///
/// `derived` must be aligned with `dataset.records`.
pub fn price_by_type(dataset: &Dataset, derived: &[DerivedRecord]) -> Vec<PriceTypeStats> {
    ingredients::categories(dataset)
        .into_iter()
        .map(|category| {
            let mut n = 0usize;
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            let mut sum = 0.0;
            for (record, d) in dataset.records.iter().zip(derived) {
                if record.product_type != category {
                    continue;
                }
                n += 1;
                min = min.min(d.price_euros);
                max = max.max(d.price_euros);
                sum += d.price_euros;
            }
            PriceTypeStats {
                category,
                n,
                price_min: if n == 0 { 0.0 } else { min },
                price_mean: if n == 0 { 0.0 } else { sum / n as f64 },
                price_max: if n == 0 { 0.0 } else { max },
            }
        })
        .collect()
}

/// Mean price per category as a bar series.
pub fn mean_price_series(stats: &[PriceTypeStats]) -> ChartSeries {
    ChartSeries {
        labels: stats.iter().map(|s| s.category.clone()).collect(),
        values: stats.iter().map(|s| s.price_mean).collect(),
    }
}

/// Histogram of derived package sizes over `bins` equal-width buckets.
///
/// Labels carry the bucket ranges. A degenerate range (all sizes equal, or
/// no records) collapses to a single bucket.
pub fn package_size_histogram(derived: &[DerivedRecord], bins: usize) -> ChartSeries {
    if derived.is_empty() {
        return ChartSeries::default();
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for d in derived {
        lo = lo.min(d.package_size_ml);
        hi = hi.max(d.package_size_ml);
    }

    let bins = bins.max(1);
    if hi <= lo {
        return ChartSeries {
            labels: vec![format!("{lo:.0}")],
            values: vec![derived.len() as f64],
        };
    }

    let width = (hi - lo) / bins as f64;
    let mut values = vec![0.0_f64; bins];
    for d in derived {
        let idx = (((d.package_size_ml - lo) / width) as usize).min(bins - 1);
        values[idx] += 1.0;
    }

    let labels = (0..bins)
        .map(|i| {
            let start = lo + width * i as f64;
            format!("{:.0}-{:.0}", start, start + width)
        })
        .collect();

    ChartSeries { labels, values }
}

/// Products per category as a bar series, descending by count.
pub fn product_count_series(dataset: &Dataset) -> ChartSeries {
    let counts = ingredients::product_counts(dataset);
    ChartSeries {
        labels: counts.iter().map(|(category, _)| category.clone()).collect(),
        values: counts.iter().map(|(_, count)| *count as f64).collect(),
    }
}

/// Scatter of (package size, price) points, optionally restricted to one
/// category (exact, case-sensitive).
pub fn price_vs_size(
    dataset: &Dataset,
    derived: &[DerivedRecord],
    category: Option<&str>,
) -> Vec<(f64, f64)> {
    dataset
        .records
        .iter()
        .zip(derived)
        .filter(|(record, _)| category.map_or(true, |c| record.product_type == c))
        .map(|(_, d)| (d.package_size_ml, d.price_euros))
        .collect()
}

/// Product listing rows (name, package size, price) for one category
/// (exact, case-sensitive), in record order.
pub fn category_products(
    dataset: &Dataset,
    derived: &[DerivedRecord],
    category: &str,
) -> Vec<(String, f64, f64)> {
    dataset
        .records
        .iter()
        .zip(derived)
        .filter(|(record, _)| record.product_type == category)
        .map(|(record, d)| {
            (
                record.product_name.clone(),
                d.package_size_ml,
                d.price_euros,
            )
        })
        .collect()
}

/// Totals of the optional `ingredient_*` flag columns, top `n`.
pub fn flag_series(dataset: &Dataset, n: usize) -> ChartSeries {
    let totals = ingredients::flag_totals(dataset, n);
    ChartSeries {
        labels: totals.iter().map(|(name, _)| name.clone()).collect(),
        values: totals.iter().map(|(_, total)| *total).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductRecord;

    fn dataset() -> (Dataset, Vec<DerivedRecord>) {
        let record = |product_type: &str| ProductRecord {
            line: 0,
            product_name: String::new(),
            product_type: product_type.to_string(),
            ingredients: String::new(),
            price: String::new(),
            flags: Vec::new(),
        };
        let dataset = Dataset {
            records: vec![record("Serum"), record("Balm"), record("Serum")],
            flag_names: Vec::new(),
        };
        let derived = vec![
            DerivedRecord {
                package_size_ml: 30.0,
                price_euros: 10.0,
            },
            DerivedRecord {
                package_size_ml: 100.0,
                price_euros: 8.0,
            },
            DerivedRecord {
                package_size_ml: 50.0,
                price_euros: 20.0,
            },
        ];
        (dataset, derived)
    }

    #[test]
    fn price_by_type_groups_by_category() {
        let (dataset, derived) = dataset();
        let stats = price_by_type(&dataset, &derived);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, "Serum");
        assert_eq!(stats[0].n, 2);
        assert_eq!(stats[0].price_mean, 15.0);
        assert_eq!(stats[0].price_max, 20.0);
        assert_eq!(stats[1].category, "Balm");
        assert_eq!(stats[1].price_mean, 8.0);
    }

    #[test]
    fn histogram_buckets_cover_the_range() {
        let (_, derived) = dataset();
        let series = package_size_histogram(&derived, 2);
        // Range 30..100, two buckets of width 35: [30,65) and [65,100].
        assert_eq!(series.labels, vec!["30-65", "65-100"]);
        assert_eq!(series.values, vec![2.0, 1.0]);
    }

    #[test]
    fn histogram_degenerate_range_is_one_bucket() {
        let derived = vec![
            DerivedRecord {
                package_size_ml: 100.0,
                price_euros: 1.0,
            };
            3
        ];
        let series = package_size_histogram(&derived, 5);
        assert_eq!(series.labels, vec!["100"]);
        assert_eq!(series.values, vec![3.0]);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(package_size_histogram(&[], 10).is_empty());
    }

    #[test]
    fn scatter_respects_category_filter() {
        let (dataset, derived) = dataset();
        let all = price_vs_size(&dataset, &derived, None);
        assert_eq!(all.len(), 3);
        let serum = price_vs_size(&dataset, &derived, Some("Serum"));
        assert_eq!(serum, vec![(30.0, 10.0), (50.0, 20.0)]);
    }

    #[test]
    fn category_products_lists_matching_rows_in_order() {
        let record = |name: &str, product_type: &str| ProductRecord {
            line: 0,
            product_name: name.to_string(),
            product_type: product_type.to_string(),
            ingredients: String::new(),
            price: String::new(),
            flags: Vec::new(),
        };
        let dataset = Dataset {
            records: vec![
                record("A Serum 30ml", "Serum"),
                record("B Balm", "Balm"),
                record("C Serum 50ml", "Serum"),
            ],
            flag_names: Vec::new(),
        };
        let derived = vec![
            DerivedRecord {
                package_size_ml: 30.0,
                price_euros: 10.0,
            },
            DerivedRecord {
                package_size_ml: 100.0,
                price_euros: 8.0,
            },
            DerivedRecord {
                package_size_ml: 50.0,
                price_euros: 20.0,
            },
        ];

        let rows = category_products(&dataset, &derived, "Serum");
        assert_eq!(
            rows,
            vec![
                ("A Serum 30ml".to_string(), 30.0, 10.0),
                ("C Serum 50ml".to_string(), 50.0, 20.0),
            ]
        );
        assert!(category_products(&dataset, &derived, "Peel").is_empty());
    }

    #[test]
    fn product_count_series_matches_counts() {
        let (dataset, _) = dataset();
        let series = product_count_series(&dataset);
        assert_eq!(series.labels, vec!["Serum", "Balm"]);
        assert_eq!(series.values, vec![2.0, 1.0]);
    }
}

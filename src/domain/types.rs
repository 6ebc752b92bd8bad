//! Shared domain types.
//!
//! These types are intentionally lightweight: the whole dataset fits in
//! memory, is loaded fresh for every view, and is never mutated after load.

use std::path::PathBuf;

use crate::ingredients::IngredientFrequency;

/// One row of the product listing, as read from the CSV.
///
/// `product_type` is an arbitrary string, not a closed enum: the file may
/// contain categories we have never seen, and both `product_type` and
/// `ingredients` may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    /// 1-based line number in the source CSV (header is line 1).
    pub line: usize,
    pub product_name: String,
    pub product_type: String,
    /// Comma-delimited ingredient list, raw.
    pub ingredients: String,
    /// Currency-prefixed price text, e.g. `"£12.50"`. Normalized on demand.
    pub price: String,
    /// Values of the optional `ingredient_*` flag columns, aligned with
    /// `Dataset::flag_names`.
    pub flags: Vec<f64>,
}

/// The loaded dataset: ordered records plus the optional flag-column names.
///
/// Immutable after load. Every view reloads its own copy; nothing is cached
/// across views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<ProductRecord>,
    /// Headers of the optional `ingredient_*` columns, in file order.
    pub flag_names: Vec<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-record derived fields. Computed on demand, never written back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRecord {
    /// Heuristically extracted package quantity. Unitless: gram quantities
    /// are reported with the same raw number as millilitre ones.
    pub package_size_ml: f64,
    /// Price with the currency glyph stripped.
    pub price_euros: f64,
}

/// Summary statistics over a dataset and its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_products: usize,
    pub n_categories: usize,
    pub price_min: f64,
    pub price_mean: f64,
    pub price_max: f64,
    pub size_min: f64,
    pub size_max: f64,
}

/// Full analysis of a single product category.
///
/// One parameterized code path replaces the original dashboard's
/// per-category branches, so every category is analyzed identically.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    /// Records whose `product_type` equals the category exactly.
    pub product_count: usize,
    /// Distinct non-empty raw `ingredients` strings in the category.
    ///
    /// List-level, not token-level: two products share an entry only when
    /// their full comma-joined ingredient strings match exactly.
    pub distinct_ingredient_lists: usize,
    pub frequency: IngredientFrequency,
    /// The three most common ingredients, descending, stable on ties.
    pub top: Vec<(String, u64)>,
}

/// Per-view configuration, derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub csv_path: PathBuf,
    /// Row/entry limit where a view truncates.
    pub top_n: usize,
    /// Bucket count for the package-size histogram.
    pub histogram_bins: usize,
}

//! Ingredient tokenization and aggregation.
//!
//! The repeated pattern behind most dashboard views: split a delimited
//! ingredients string per record, flatten across a (possibly filtered)
//! subset of the dataset, count occurrences. Every operation here is a pure
//! function over its inputs; nothing is retained between calls.

use std::collections::{HashMap, HashSet};

use crate::domain::{CategorySummary, Dataset, ProductRecord};

/// Ingredient token → occurrence count, ordered descending by count.
///
/// Ties are broken by first-seen order in the input token stream, so
/// identical inputs always produce identical tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientFrequency {
    entries: Vec<(String, u64)>,
}

impl IngredientFrequency {
    /// All entries, descending by count with stable ties.
    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest-count entry, if any.
    pub fn most_common(&self) -> Option<(&str, u64)> {
        self.entries.first().map(|(t, c)| (t.as_str(), *c))
    }

    /// The `n` highest-count entries, descending, stable on ties.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        self.entries.iter().take(n).cloned().collect()
    }
}

/// Split a delimited ingredients string into trimmed tokens.
///
/// Empty input yields an empty sequence rather than a single empty token.
pub fn tokenize(ingredients: &str) -> Vec<String> {
    if ingredients.trim().is_empty() {
        return Vec::new();
    }
    ingredients
        .split(',')
        .map(|token| token.trim().to_string())
        .collect()
}

/// Tokens of every record passing the optional category filter, in record
/// order then token order within each record.
///
/// The filter is an exact, case-sensitive match on `product_type`.
pub fn flatten(records: &[ProductRecord], filter: Option<&str>) -> Vec<String> {
    records
        .iter()
        .filter(|r| filter.map_or(true, |category| r.product_type == category))
        .flat_map(|r| tokenize(&r.ingredients))
        .collect()
}

/// Count token occurrences.
pub fn frequency(tokens: &[String]) -> IngredientFrequency {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for token in tokens {
        let count = counts.entry(token.as_str()).or_insert(0);
        if *count == 0 {
            order.push(token.as_str());
        }
        *count += 1;
    }

    // Entries are built in first-seen order; the stable sort then yields
    // descending counts with first-seen tie order.
    let mut entries: Vec<(String, u64)> = order
        .into_iter()
        .map(|token| (token.to_string(), counts[token]))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    IngredientFrequency { entries }
}

/// Number of distinct non-empty raw `ingredients` strings among filtered
/// records.
///
/// Exact string match on the untokenized field: this is a list-level metric
/// ("how many distinct ingredient lists"), not a distinct-token count, and
/// the two deliberately coexist.
pub fn distinct_count(records: &[ProductRecord], filter: Option<&str>) -> usize {
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        if filter.is_some_and(|category| record.product_type != category) {
            continue;
        }
        if record.ingredients.is_empty() {
            continue;
        }
        seen.insert(record.ingredients.as_str());
    }
    seen.len()
}

/// Analyze one product category: product count, distinct ingredient lists,
/// full frequency table, and the common top-3.
///
/// A single parameterized path serving every category value. Unknown
/// categories are not an error; they simply produce empty counts.
pub fn analyze_category(dataset: &Dataset, category: &str) -> CategorySummary {
    let product_count = dataset
        .records
        .iter()
        .filter(|r| r.product_type == category)
        .count();
    let frequency = frequency(&flatten(&dataset.records, Some(category)));
    let top = frequency.top_n(3);

    CategorySummary {
        category: category.to_string(),
        product_count,
        distinct_ingredient_lists: distinct_count(&dataset.records, Some(category)),
        frequency,
        top,
    }
}

/// Unique non-empty product types, in first-seen order.
pub fn categories(dataset: &Dataset) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for record in &dataset.records {
        if record.product_type.is_empty() {
            continue;
        }
        if seen.insert(record.product_type.as_str()) {
            out.push(record.product_type.clone());
        }
    }
    out
}

/// Products per category, descending by count with stable first-seen ties.
pub fn product_counts(dataset: &Dataset) -> Vec<(String, u64)> {
    let types: Vec<String> = dataset
        .records
        .iter()
        .map(|r| r.product_type.clone())
        .filter(|t| !t.is_empty())
        .collect();
    frequency(&types).entries().to_vec()
}

/// Sum each optional `ingredient_*` flag column and keep the `n` largest
/// totals, descending, stable on ties.
pub fn flag_totals(dataset: &Dataset, n: usize) -> Vec<(String, f64)> {
    let mut totals = vec![0.0_f64; dataset.flag_names.len()];
    for record in &dataset.records {
        for (idx, value) in record.flags.iter().enumerate() {
            if idx < totals.len() {
                totals[idx] += value;
            }
        }
    }

    let mut out: Vec<(String, f64)> = dataset
        .flag_names
        .iter()
        .cloned()
        .zip(totals)
        .collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1));
    out.truncate(n);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product_type: &str, ingredients: &str) -> ProductRecord {
        ProductRecord {
            line: 0,
            product_name: String::new(),
            product_type: product_type.to_string(),
            ingredients: ingredients.to_string(),
            price: "£1.00".to_string(),
            flags: Vec::new(),
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn tokenize_trims_each_token() {
        assert_eq!(tokenize(" A, B ,C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn tokenize_empty_input_is_empty() {
        assert_eq!(tokenize(""), Vec::<String>::new());
        assert_eq!(tokenize("   "), Vec::<String>::new());
    }

    #[test]
    fn frequency_orders_by_count_then_first_seen() {
        let freq = frequency(&tokens(&["A", "B", "A", "C", "B", "A"]));
        assert_eq!(
            freq.entries(),
            &[
                ("A".to_string(), 3),
                ("B".to_string(), 2),
                ("C".to_string(), 1),
            ]
        );
    }

    #[test]
    fn frequency_ties_are_stable() {
        // Z and A both appear twice; Z was seen first and must stay first.
        let freq = frequency(&tokens(&["Z", "A", "Z", "A", "B"]));
        assert_eq!(
            freq.entries(),
            &[
                ("Z".to_string(), 2),
                ("A".to_string(), 2),
                ("B".to_string(), 1),
            ]
        );
    }

    #[test]
    fn top_n_truncates_in_order() {
        let freq = frequency(&tokens(&["A", "B", "A", "C", "B", "A"]));
        assert_eq!(
            freq.top_n(2),
            vec![("A".to_string(), 3), ("B".to_string(), 2)]
        );
        assert_eq!(freq.most_common(), Some(("A", 3)));
    }

    #[test]
    fn flatten_filter_is_exact_and_case_sensitive() {
        let records = vec![
            record("Serum", "Aqua, Glycerin"),
            record("serum", "Parfum"),
            record("Serum", "Aqua"),
            record("Balm", "Cera Alba"),
        ];
        assert_eq!(
            flatten(&records, Some("Serum")),
            vec!["Aqua", "Glycerin", "Aqua"]
        );
    }

    #[test]
    fn flatten_without_filter_keeps_record_order() {
        let records = vec![record("Serum", "B, A"), record("Balm", "C")];
        assert_eq!(flatten(&records, None), vec!["B", "A", "C"]);
    }

    #[test]
    fn flatten_tolerates_empty_ingredients() {
        let records = vec![record("Serum", ""), record("Serum", "Aqua")];
        assert_eq!(flatten(&records, Some("Serum")), vec!["Aqua"]);
    }

    #[test]
    fn distinct_count_is_list_level_not_token_level() {
        let records = vec![
            record("Serum", "Aqua, Glycerin"),
            record("Serum", "Aqua, Glycerin"),
            record("Serum", "Glycerin, Aqua"),
            record("Serum", ""),
            record("Balm", "Aqua"),
        ];
        // Two distinct raw strings among Serum records; token overlap and
        // the empty list are irrelevant.
        assert_eq!(distinct_count(&records, Some("Serum")), 2);
        assert_eq!(distinct_count(&records, None), 3);
    }

    #[test]
    fn analyze_category_is_one_path_for_any_value() {
        let dataset = Dataset {
            records: vec![
                record("Serum", "Aqua, Glycerin"),
                record("Serum", "Aqua, Parfum"),
                record("Balm", "Cera Alba"),
            ],
            flag_names: Vec::new(),
        };

        let summary = analyze_category(&dataset, "Serum");
        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.distinct_ingredient_lists, 2);
        assert_eq!(summary.top[0], ("Aqua".to_string(), 2));

        let missing = analyze_category(&dataset, "Peel");
        assert_eq!(missing.product_count, 0);
        assert!(missing.frequency.is_empty());
    }

    #[test]
    fn categories_first_seen_order() {
        let dataset = Dataset {
            records: vec![
                record("Serum", ""),
                record("Balm", ""),
                record("Serum", ""),
                record("", ""),
            ],
            flag_names: Vec::new(),
        };
        assert_eq!(categories(&dataset), vec!["Serum", "Balm"]);
        assert_eq!(
            product_counts(&dataset),
            vec![("Serum".to_string(), 2), ("Balm".to_string(), 1)]
        );
    }

    #[test]
    fn flag_totals_sums_columns_descending() {
        let dataset = Dataset {
            records: vec![
                ProductRecord {
                    flags: vec![1.0, 0.0, 1.0],
                    ..record("Serum", "")
                },
                ProductRecord {
                    flags: vec![1.0, 1.0, 0.0],
                    ..record("Balm", "")
                },
            ],
            flag_names: vec![
                "ingredient_aqua".to_string(),
                "ingredient_parfum".to_string(),
                "ingredient_glycerin".to_string(),
            ],
        };

        let totals = flag_totals(&dataset, 2);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0], ("ingredient_aqua".to_string(), 2.0));
        // 1.0 tie: parfum was declared before glycerin and stays first.
        assert_eq!(totals[1], ("ingredient_parfum".to_string(), 1.0));
    }
}

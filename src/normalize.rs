//! Field normalization: the two derived columns computed from raw CSV text.
//!
//! Both derivations are pure functions over the record text. Package-size
//! extraction is total and never fails; price normalization surfaces every
//! bad cell as a batch error so data-quality problems are visible upstream.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{Dataset, DerivedRecord};
use crate::error::{DataError, PriceRowError};

/// Package size reported when the product name carries no recognizable
/// quantity.
pub const DEFAULT_PACKAGE_SIZE_ML: f64 = 100.0;

fn package_size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)(ml|g)").expect("static pattern is valid"))
}

/// Extract the package quantity printed in a free-text product name.
///
/// Matches the first run of digits immediately followed by a literal
/// lowercase `ml` or `g`, left to right, no word boundary required. The
/// captured number is returned unchanged for both units: gram quantities are
/// *not* converted to millilitres, matching the historical behavior of the
/// dashboard this replaces.
///
/// Total over any input; names without a match (including the empty string)
/// return [`DEFAULT_PACKAGE_SIZE_ML`].
pub fn extract_package_size(product_name: &str) -> f64 {
    let Some(caps) = package_size_pattern().captures(product_name) else {
        return DEFAULT_PACKAGE_SIZE_ML;
    };
    caps.get(1)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(DEFAULT_PACKAGE_SIZE_ML)
}

/// Strip a single currency glyph (`£`) from the value and coerce the
/// remainder to a number.
///
/// Only the first glyph is removed, wherever it appears; a second one leaves
/// the remainder non-numeric and fails the parse. A non-numeric remainder is
/// an error carrying the raw value; it signals a data-quality problem and
/// must not be swallowed.
pub fn normalize_price(raw_price: &str) -> Result<f64, String> {
    let cleaned = raw_price.trim().replacen('£', "", 1);
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("unparsable price {raw_price:?}"))
}

/// Compute the derived columns for every record.
///
/// Price failures are collected across the whole dataset and reported as one
/// [`DataError::PriceParse`] batch listing every offending row; a partial
/// result is never returned.
pub fn derive(dataset: &Dataset) -> Result<Vec<DerivedRecord>, DataError> {
    let mut out = Vec::with_capacity(dataset.records.len());
    let mut bad_rows = Vec::new();

    for record in &dataset.records {
        let package_size_ml = extract_package_size(&record.product_name);
        match normalize_price(&record.price) {
            Ok(price_euros) => out.push(DerivedRecord {
                package_size_ml,
                price_euros,
            }),
            Err(_) => bad_rows.push(PriceRowError {
                line: record.line,
                product_name: record.product_name.clone(),
                raw_price: record.price.clone(),
            }),
        }
    }

    if !bad_rows.is_empty() {
        return Err(DataError::PriceParse { rows: bad_rows });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductRecord;

    fn record(line: usize, name: &str, price: &str) -> ProductRecord {
        ProductRecord {
            line,
            product_name: name.to_string(),
            product_type: "Serum".to_string(),
            ingredients: String::new(),
            price: price.to_string(),
            flags: Vec::new(),
        }
    }

    #[test]
    fn extracts_ml_quantity() {
        assert_eq!(extract_package_size("Cream 50ml Jar"), 50.0);
    }

    #[test]
    fn extracts_gram_quantity_without_conversion() {
        assert_eq!(extract_package_size("Night Balm 30g"), 30.0);
    }

    #[test]
    fn first_match_wins_left_to_right() {
        assert_eq!(extract_package_size("Duo 15ml + 200ml refill"), 15.0);
    }

    #[test]
    fn unit_must_be_lowercase() {
        // `50ML` does not match; the trailing `100g` does.
        assert_eq!(extract_package_size("Jar 50ML refill 100g"), 100.0);
        assert_eq!(extract_package_size("Jar 50ML only"), DEFAULT_PACKAGE_SIZE_ML);
    }

    #[test]
    fn no_word_boundary_required() {
        // Digits inside a longer token still match.
        assert_eq!(extract_package_size("Formula X100ml+"), 100.0);
    }

    #[test]
    fn default_when_no_match() {
        assert_eq!(extract_package_size("Unlabeled Product"), 100.0);
        assert_eq!(extract_package_size(""), 100.0);
    }

    #[test]
    fn price_strips_currency_glyph() {
        assert_eq!(normalize_price("£12.50").unwrap(), 12.50);
    }

    #[test]
    fn price_without_glyph_still_parses() {
        assert_eq!(normalize_price("9.99").unwrap(), 9.99);
    }

    #[test]
    fn strips_one_glyph_wherever_it_appears() {
        assert_eq!(normalize_price("9.99£").unwrap(), 9.99);
        assert!(normalize_price("££9.99").is_err());
    }

    #[test]
    fn non_numeric_price_is_an_error() {
        assert!(normalize_price("free").is_err());
        assert!(normalize_price("").is_err());
    }

    #[test]
    fn derive_aggregates_all_bad_prices() {
        let dataset = Dataset {
            records: vec![
                record(2, "Cream 50ml", "£10.00"),
                record(3, "Mist", "free"),
                record(4, "Balm 30g", "n/a"),
            ],
            flag_names: Vec::new(),
        };

        let err = derive(&dataset).unwrap_err();
        match err {
            DataError::PriceParse { rows } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].line, 3);
                assert_eq!(rows[0].raw_price, "free");
                assert_eq!(rows[1].line, 4);
            }
            other => panic!("expected PriceParse, got {other:?}"),
        }
    }

    #[test]
    fn derive_is_idempotent() {
        let dataset = Dataset {
            records: vec![
                record(2, "Cream 50ml Jar", "£12.50"),
                record(3, "Unlabeled Product", "9.99"),
            ],
            flag_names: Vec::new(),
        };

        let first = derive(&dataset).unwrap();
        let second = derive(&dataset).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].package_size_ml, 50.0);
        assert_eq!(first[1].package_size_ml, DEFAULT_PACKAGE_SIZE_ML);
        assert_eq!(first[1].price_euros, 9.99);
    }
}

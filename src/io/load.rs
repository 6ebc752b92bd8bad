//! CSV loading.
//!
//! Turns the product-listing CSV into an in-memory [`Dataset`]. This module
//! does the structural parse only: required columns must exist and rows must
//! have consistent field counts, but there is no filtering, no caching, and
//! no cell-level validation (that lives in `normalize`).
//!
//! Structural problems are [`DataError::Source`] and fatal to the view.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Dataset, ProductRecord};
use crate::error::DataError;

const REQUIRED_COLUMNS: [&str; 4] = ["product_name", "product_type", "ingredients", "price"];

/// Prefix of the optional numeric 0/1 ingredient flag columns.
const FLAG_PREFIX: &str = "ingredient_";

/// Load the dataset from a CSV file.
pub fn load(path: &Path) -> Result<Dataset, DataError> {
    let file = File::open(path).map_err(|e| {
        DataError::Source(format!("failed to open CSV '{}': {e}", path.display()))
    })?;
    load_from_reader(file)
}

/// Load the dataset from any reader.
///
/// `load` is a thin file wrapper around this; tests feed in-memory CSV text
/// through the same path.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, DataError> {
    // Not `flexible`: a row whose field count disagrees with the header is a
    // structural defect and must fail the load, not be papered over.
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataError::Source(format!("failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);

    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(DataError::Source(format!(
                "missing required column `{column}`"
            )));
        }
    }

    // Optional flag columns, in file order.
    let flag_columns: Vec<(String, usize)> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .filter(|(name, _)| name.starts_with(FLAG_PREFIX))
        .collect();

    let mut records = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        let record = result
            .map_err(|e| DataError::Source(format!("CSV parse error at line {line}: {e}")))?;
        records.push(parse_row(&record, &header_map, &flag_columns, line));
    }

    Ok(Dataset {
        records,
        flag_names: flag_columns.into_iter().map(|(name, _)| name).collect(),
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation will
    // incorrectly report the column missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    flag_columns: &[(String, usize)],
    line: usize,
) -> ProductRecord {
    // Missing/empty cells load as empty strings; the data model tolerates
    // empty `product_type` and `ingredients` everywhere downstream.
    let get = |name: &str| -> String {
        header_map
            .get(name)
            .and_then(|idx| record.get(*idx))
            .unwrap_or("")
            .to_string()
    };

    // Flag cells that fail to parse count as 0.
    let flags = flag_columns
        .iter()
        .map(|(_, idx)| {
            record
                .get(*idx)
                .and_then(|cell| cell.parse::<f64>().ok())
                .unwrap_or(0.0)
        })
        .collect();

    ProductRecord {
        line,
        product_name: get("product_name"),
        product_type: get("product_type"),
        ingredients: get("ingredients"),
        price: get("price"),
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load_str(csv: &str) -> Result<Dataset, DataError> {
        load_from_reader(Cursor::new(csv.to_string()))
    }

    #[test]
    fn loads_required_columns_in_order() {
        let dataset = load_str(
            "product_name,product_type,ingredients,price\n\
             Cream 50ml Jar,Moisturiser,\"Aqua, Glycerin\",£12.50\n\
             Night Balm 30g,Balm,Cera Alba,£8.00\n",
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].product_name, "Cream 50ml Jar");
        assert_eq!(dataset.records[0].ingredients, "Aqua, Glycerin");
        assert_eq!(dataset.records[0].price, "£12.50");
        assert_eq!(dataset.records[0].line, 2);
        assert_eq!(dataset.records[1].product_type, "Balm");
        assert_eq!(dataset.records[1].line, 3);
    }

    #[test]
    fn missing_required_column_is_a_source_error() {
        let err = load_str("product_name,product_type,price\nA,B,£1\n").unwrap_err();
        match err {
            DataError::Source(msg) => assert!(msg.contains("ingredients")),
            other => panic!("expected Source, got {other:?}"),
        }
    }

    #[test]
    fn ragged_row_is_a_source_error() {
        let err = load_str(
            "product_name,product_type,ingredients,price\n\
             A,Serum,Aqua,£1.00,extra-cell\n",
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Source(_)));
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let err = load(Path::new("no_such_products.csv")).unwrap_err();
        assert!(matches!(err, DataError::Source(_)));
    }

    #[test]
    fn empty_type_and_ingredients_are_tolerated() {
        let dataset = load_str(
            "product_name,product_type,ingredients,price\n\
             Mystery Oil,,,£3.00\n",
        )
        .unwrap();
        assert_eq!(dataset.records[0].product_type, "");
        assert_eq!(dataset.records[0].ingredients, "");
    }

    #[test]
    fn flag_columns_are_collected_in_file_order() {
        let dataset = load_str(
            "product_name,product_type,ingredients,price,ingredient_aqua,ingredient_parfum\n\
             A,Serum,Aqua,£1.00,1,0\n\
             B,Balm,Parfum,£2.00,0,1\n",
        )
        .unwrap();

        assert_eq!(
            dataset.flag_names,
            vec!["ingredient_aqua", "ingredient_parfum"]
        );
        assert_eq!(dataset.records[0].flags, vec![1.0, 0.0]);
        assert_eq!(dataset.records[1].flags, vec![0.0, 1.0]);
    }

    #[test]
    fn unparsable_flag_cells_read_as_zero() {
        let dataset = load_str(
            "product_name,product_type,ingredients,price,ingredient_aqua\n\
             A,Serum,Aqua,£1.00,yes\n",
        )
        .unwrap();
        assert_eq!(dataset.records[0].flags, vec![0.0]);
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let dataset = load_str(
            "\u{feff}product_name,product_type,ingredients,price\n\
             A,Serum,Aqua,£1.00\n",
        )
        .unwrap();
        assert_eq!(dataset.records[0].product_name, "A");
    }

    #[test]
    fn reload_is_bit_identical() {
        let csv = "product_name,product_type,ingredients,price\n\
                   Cream 50ml Jar,Moisturiser,\"Aqua, Glycerin\",£12.50\n";
        assert_eq!(load_str(csv).unwrap(), load_str(csv).unwrap());
    }
}

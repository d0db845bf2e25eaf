//! Shared CSV utilities for loading reference files.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::StandardsError;

/// Read a CSV file into a vector of row maps.
///
/// Each row is represented as a BTreeMap with column headers as keys.
/// Handles BOM characters and trims whitespace from values.
pub fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>, StandardsError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| StandardsError::csv(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| StandardsError::csv(path, e.to_string()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| StandardsError::csv(path, e.to_string()))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Get an optional field value from a row (None if empty or missing).
pub fn get_optional(row: &BTreeMap<String, String>, key: &str) -> Option<String> {
    row.get(key).filter(|v| !v.is_empty()).cloned()
}

//! CSV serialization with a header row and an HXL tag row beneath it.

use std::path::Path;

use anyhow::{Context, Result};
use ipc_model::WideRow;

/// Write a table: header row, tag row, then data rows.
///
/// Returns false without touching the filesystem when there are no data
/// rows; the caller decides whether that is worth a warning.
pub fn write_tabular(
    path: &Path,
    headers: &[String],
    tags: &[String],
    rows: &[Vec<String>],
) -> Result<bool> {
    if rows.is_empty() {
        return Ok(false);
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(headers)
        .with_context(|| format!("write header to {}", path.display()))?;
    writer
        .write_record(tags)
        .with_context(|| format!("write tag row to {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(true)
}

/// Header list for a wide table: the union of every row's columns, ordered
/// by first appearance. Deriving from the first row alone would misalign
/// whenever the first row is sparser than a later one.
pub fn wide_headers(rows: &[WideRow]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for column in row.columns() {
            if !headers.iter().any(|h| h == column) {
                headers.push(column.to_string());
            }
        }
    }
    headers
}

//! Administrative boundary reference units.
//!
//! The pcode matcher is fed from a flat CSV of admin units (one row per
//! unit, levels 1 and 2). The file itself comes from an external reference
//! dataset and is pointed at by runtime configuration; only the loader and
//! the row shape live here.

use std::path::Path;

use crate::csv_utils::{get_optional, read_csv_rows};
use crate::error::StandardsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUnit {
    pub countryiso3: String,
    pub level: u8,
    pub pcode: String,
    pub name: String,
    /// Admin 1 pcode for level-2 units.
    pub parent: Option<String>,
}

/// Load admin units from a CSV with columns ISO3, Level, PCode, Name, Parent.
pub fn load_admin_units(path: &Path) -> Result<Vec<AdminUnit>, StandardsError> {
    let rows = read_csv_rows(path)?;
    let mut units = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let level: u8 = row
            .get("Level")
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| StandardsError::InvalidData {
                path: path.to_path_buf(),
                message: format!("row {}: bad or missing Level", idx + 2),
            })?;
        if !(1..=2).contains(&level) {
            return Err(StandardsError::InvalidData {
                path: path.to_path_buf(),
                message: format!("row {}: admin level {level} out of range", idx + 2),
            });
        }
        let countryiso3 = get_optional(row, "ISO3").ok_or_else(|| StandardsError::InvalidData {
            path: path.to_path_buf(),
            message: format!("row {}: missing ISO3", idx + 2),
        })?;
        let pcode = get_optional(row, "PCode").ok_or_else(|| StandardsError::InvalidData {
            path: path.to_path_buf(),
            message: format!("row {}: missing PCode", idx + 2),
        })?;
        let name = get_optional(row, "Name").ok_or_else(|| StandardsError::InvalidData {
            path: path.to_path_buf(),
            message: format!("row {}: missing Name", idx + 2),
        })?;
        units.push(AdminUnit {
            countryiso3,
            level,
            pcode,
            name,
            parent: get_optional(row, "Parent"),
        });
    }
    Ok(units)
}

//! Country code lookup table.
//!
//! Maps ISO2 codes (the feed's country key) to ISO3, display names, and the
//! humanitarian-response-plan / global-humanitarian-overview flags consumed
//! by the harmonized export.

use std::collections::BTreeMap;
use std::path::Path;

use crate::csv_utils::read_csv_rows;
use crate::error::StandardsError;
use crate::paths::default_reference_root;

#[derive(Debug, Clone)]
pub struct CountryInfo {
    pub iso2: String,
    pub iso3: String,
    pub name: String,
    pub has_hrp: bool,
    pub in_gho: bool,
}

/// Lookup table over the bundled `countries.csv`.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    by_iso2: BTreeMap<String, String>,
    by_iso3: BTreeMap<String, CountryInfo>,
}

impl CountryTable {
    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let rows = read_csv_rows(path)?;
        let mut table = Self::default();
        for row in rows {
            let iso2 = row.get("ISO2").cloned().unwrap_or_default();
            let iso3 = row.get("ISO3").cloned().unwrap_or_default();
            if iso2.is_empty() || iso3.is_empty() {
                return Err(StandardsError::InvalidData {
                    path: path.to_path_buf(),
                    message: "row with empty ISO2 or ISO3".to_string(),
                });
            }
            let info = CountryInfo {
                iso2: iso2.clone(),
                iso3: iso3.clone(),
                name: row.get("Name").cloned().unwrap_or_default(),
                has_hrp: row.get("HRP").is_some_and(|v| v == "Y"),
                in_gho: row.get("GHO").is_some_and(|v| v == "Y"),
            };
            table.by_iso2.insert(iso2, iso3.clone());
            table.by_iso3.insert(iso3, info);
        }
        Ok(table)
    }

    pub fn iso3_from_iso2(&self, iso2: &str) -> Option<&str> {
        self.by_iso2.get(iso2).map(String::as_str)
    }

    pub fn iso2_from_iso3(&self, iso3: &str) -> Option<&str> {
        self.by_iso3.get(iso3).map(|info| info.iso2.as_str())
    }

    pub fn name_from_iso3(&self, iso3: &str) -> Option<&str> {
        self.by_iso3.get(iso3).map(|info| info.name.as_str())
    }

    pub fn has_hrp(&self, iso3: &str) -> bool {
        self.by_iso3.get(iso3).is_some_and(|info| info.has_hrp)
    }

    pub fn in_gho(&self, iso3: &str) -> bool {
        self.by_iso3.get(iso3).is_some_and(|info| info.in_gho)
    }
}

/// Load the bundled country table.
pub fn load_default_countries() -> Result<CountryTable, StandardsError> {
    CountryTable::load(&default_reference_root().join("countries.csv"))
}

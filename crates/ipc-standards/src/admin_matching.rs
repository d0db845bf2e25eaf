//! Per-country interpretations of the feed's subnational name fields.
//!
//! The feed uses "Level 1" and "Area" loosely. For most countries Level 1
//! holds admin 1 and Area holds admin 2, but a fixed set of countries
//! deviates, and the deviation is configuration data keyed by ISO3, loaded
//! once at start from `admin_matching.toml`.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::StandardsError;
use crate::paths::default_reference_root;

/// How a country's Level 1/Area pair maps onto admin levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCase {
    /// Level 1 is admin 1; Area (when present) is ignored.
    Adm1Only,
    /// Level 1 is unpopulated; Area is admin 2.
    Adm2Only,
    /// Both names used at their literal levels.
    Adm2OnlyIncludeAdm1,
    /// Level 1 actually holds admin 2 data; Area is ignored.
    Adm2InLevel1,
    /// Area actually holds admin 1 data; Level 1 is ignored.
    Adm1InArea,
    /// Level 1 is admin 1, Area is admin 2.
    Default,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminMatchingConfig {
    #[serde(default)]
    pub adm_ignore_patterns: Vec<String>,
    #[serde(default)]
    pub adm1_only: BTreeSet<String>,
    #[serde(default)]
    pub adm2_only: BTreeSet<String>,
    #[serde(default)]
    pub adm2_only_include_adm1: BTreeSet<String>,
    #[serde(default)]
    pub adm2_in_level1: BTreeSet<String>,
    #[serde(default)]
    pub adm1_in_area: BTreeSet<String>,
    /// Provider admin 1 names whose fuzzy matches are known to be wrong.
    #[serde(default)]
    pub adm1_errors: BTreeSet<String>,
    /// Provider admin 2 names whose fuzzy matches are known to be wrong.
    #[serde(default)]
    pub adm2_errors: BTreeSet<String>,
}

impl AdminMatchingConfig {
    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        toml::from_str(&text).map_err(|source| StandardsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Classification case for a country, in the documented priority order.
    pub fn case_for(&self, countryiso3: &str) -> AdminCase {
        if self.adm1_only.contains(countryiso3) {
            AdminCase::Adm1Only
        } else if self.adm2_only.contains(countryiso3) {
            AdminCase::Adm2Only
        } else if self.adm2_only_include_adm1.contains(countryiso3) {
            AdminCase::Adm2OnlyIncludeAdm1
        } else if self.adm2_in_level1.contains(countryiso3) {
            AdminCase::Adm2InLevel1
        } else if self.adm1_in_area.contains(countryiso3) {
            AdminCase::Adm1InArea
        } else {
            AdminCase::Default
        }
    }

    /// Case-insensitive substring check against the ignore-pattern list.
    pub fn is_ignored_name(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.adm_ignore_patterns
            .iter()
            .any(|pattern| lower.contains(pattern.as_str()))
    }
}

/// Load the bundled admin matching configuration.
pub fn load_default_admin_matching() -> Result<AdminMatchingConfig, StandardsError> {
    AdminMatchingConfig::load(&default_reference_root().join("admin_matching.toml"))
}

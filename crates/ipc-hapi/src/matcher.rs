//! Admin name to pcode resolution.
//!
//! Exact lookup on normalized names first, then Jaro-Winkler fuzzy matching
//! over the country's units at the requested level. Admin-2 lookups may be
//! narrowed by a parent admin-1 pcode when one was resolved.

use std::collections::BTreeMap;

use ipc_standards::AdminUnit;
use rapidfuzz::distance::jaro_winkler;

/// Minimum similarity for a fuzzy match to be accepted.
const FUZZY_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub pcode: String,
    pub name: String,
    /// False when the match came from fuzzy similarity rather than an exact
    /// normalized-name hit.
    pub exact: bool,
}

/// Normalize a name for comparison: trim, lowercase, separators to spaces.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '\''], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Default)]
pub struct PcodeMatcher {
    units: Vec<AdminUnit>,
    exact: BTreeMap<(String, u8, String), usize>,
}

impl PcodeMatcher {
    pub fn new(units: Vec<AdminUnit>) -> Self {
        let mut exact = BTreeMap::new();
        for (idx, unit) in units.iter().enumerate() {
            exact
                .entry((unit.countryiso3.clone(), unit.level, normalize(&unit.name)))
                .or_insert(idx);
        }
        Self { units, exact }
    }

    /// A matcher with no reference data; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Resolve a free-text name against a country's units at one level.
    pub fn match_name(
        &self,
        countryiso3: &str,
        level: u8,
        name: &str,
        parent: Option<&str>,
    ) -> Option<MatchResult> {
        let normalized = normalize(name);
        if normalized.is_empty() {
            return None;
        }
        if let Some(&idx) = self
            .exact
            .get(&(countryiso3.to_string(), level, normalized.clone()))
        {
            let unit = &self.units[idx];
            return Some(MatchResult {
                pcode: unit.pcode.clone(),
                name: unit.name.clone(),
                exact: true,
            });
        }

        let mut candidates: Vec<&AdminUnit> = self
            .units
            .iter()
            .filter(|u| u.countryiso3 == countryiso3 && u.level == level)
            .collect();
        if let Some(parent) = parent {
            let within_parent: Vec<&AdminUnit> = candidates
                .iter()
                .copied()
                .filter(|u| u.parent.as_deref() == Some(parent))
                .collect();
            if !within_parent.is_empty() {
                candidates = within_parent;
            }
        }

        let mut best: Option<(f64, &AdminUnit)> = None;
        for unit in candidates {
            let score =
                jaro_winkler::similarity(normalized.chars(), normalize(&unit.name).chars());
            if score >= FUZZY_THRESHOLD && best.map_or(true, |(b, _)| score > b) {
                best = Some((score, unit));
            }
        }
        best.map(|(_, unit)| MatchResult {
            pcode: unit.pcode.clone(),
            name: unit.name.clone(),
            exact: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(iso3: &str, level: u8, pcode: &str, name: &str, parent: Option<&str>) -> AdminUnit {
        AdminUnit {
            countryiso3: iso3.to_string(),
            level,
            pcode: pcode.to_string(),
            name: name.to_string(),
            parent: parent.map(String::from),
        }
    }

    fn matcher() -> PcodeMatcher {
        PcodeMatcher::new(vec![
            unit("ETH", 1, "ET05", "Somali", None),
            unit("ETH", 1, "ET01", "Tigray", None),
            unit("ETH", 2, "ET0505", "Shabelle", Some("ET05")),
            unit("ETH", 2, "ET0101", "North Western", Some("ET01")),
            unit("KEN", 1, "KE047", "Nairobi", None),
        ])
    }

    #[test]
    fn exact_match_ignores_case_and_separators() {
        let result = matcher().match_name("ETH", 1, "  SOMALI ", None).unwrap();
        assert_eq!(result.pcode, "ET05");
        assert!(result.exact);
        let result = matcher().match_name("ETH", 2, "north-western", None).unwrap();
        assert_eq!(result.pcode, "ET0101");
        assert!(result.exact);
    }

    #[test]
    fn fuzzy_match_is_flagged_inexact() {
        let result = matcher().match_name("ETH", 1, "Tigrai", None).unwrap();
        assert_eq!(result.pcode, "ET01");
        assert!(!result.exact);
    }

    #[test]
    fn wrong_country_or_level_misses() {
        assert!(matcher().match_name("KEN", 1, "Somali", None).is_none());
        assert!(matcher().match_name("ETH", 2, "Somali", None).is_none());
    }

    #[test]
    fn parent_narrows_fuzzy_candidates() {
        let result = matcher()
            .match_name("ETH", 2, "Shabele", Some("ET05"))
            .unwrap();
        assert_eq!(result.pcode, "ET0505");
        assert!(!result.exact);
    }

    #[test]
    fn dissimilar_names_do_not_match() {
        assert!(matcher().match_name("ETH", 1, "Completely Different", None).is_none());
    }
}

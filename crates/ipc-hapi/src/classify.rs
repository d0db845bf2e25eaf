//! Classification of a row's Level 1/Area name pair against the per-country
//! exception table.
//!
//! The outcome says which names (if any) go to the pcode matcher and at
//! which level, what the provider name columns should carry, and which
//! warnings the row picks up. Blank required names warn rather than fail;
//! the row is emitted either way.

use ipc_model::TableLevel;
use ipc_standards::{AdminCase, AdminMatchingConfig};

/// What the pcode matcher should be asked to resolve.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchTarget {
    /// No resolution attempted; codes stay empty.
    None,
    /// Resolve at admin 1.
    Adm1 { name: String },
    /// Resolve at admin 2, optionally resolving an admin 1 parent first.
    Adm2 {
        adm1_name: Option<String>,
        name: String,
    },
}

#[derive(Debug, Clone)]
pub struct Classification {
    pub provider_admin1_name: String,
    pub provider_admin2_name: String,
    /// Resolved admin level of the observation (target level, or the table's
    /// own level when nothing is resolvable).
    pub admin_level: u8,
    pub target: MatchTarget,
    pub warnings: Vec<String>,
    /// Per-country status line logged once at the end of the stage.
    pub status: &'static str,
}

fn nonblank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Classify one subnational row. `table_level` is the table the row came
/// from (Level1 or Area); national rows never reach this.
pub fn classify(
    config: &AdminMatchingConfig,
    countryiso3: &str,
    table_level: TableLevel,
    level1: Option<&str>,
    area: Option<&str>,
) -> Classification {
    let level1 = nonblank(level1);
    let area = nonblank(area);
    let mut warnings = Vec::new();

    let provider1 = level1.unwrap_or_default().to_string();
    let provider2 = area.unwrap_or_default().to_string();

    let (target, status, provider1, provider2) = match config.case_for(countryiso3) {
        AdminCase::Adm1Only => {
            if table_level == TableLevel::Area
                && let Some(area_name) = area
            {
                warnings.push(format!(
                    "Admin 2: admin level not present, ignoring {countryiso3}|{area_name}"
                ));
            }
            let target = match level1 {
                Some(name) => MatchTarget::Adm1 {
                    name: name.to_string(),
                },
                None => {
                    warnings.push(format!(
                        "Admin 1: ignoring blank Level 1 name in {countryiso3}"
                    ));
                    MatchTarget::None
                }
            };
            (target, "Level 1: Admin 1, Area: ignored", provider1, provider2)
        }
        AdminCase::Adm2Only => {
            let target = if table_level == TableLevel::Level1 {
                MatchTarget::None
            } else {
                match area {
                    Some(name) => MatchTarget::Adm2 {
                        adm1_name: None,
                        name: name.to_string(),
                    },
                    None => {
                        warnings.push(format!(
                            "Admin 2: ignoring blank Area name in {countryiso3}"
                        ));
                        MatchTarget::None
                    }
                }
            };
            (target, "Level 1: ignored, Area: Admin 2", provider1, provider2)
        }
        AdminCase::Adm2OnlyIncludeAdm1 => {
            let target = if table_level == TableLevel::Level1 {
                match level1 {
                    Some(name) => MatchTarget::Adm1 {
                        name: name.to_string(),
                    },
                    None => {
                        warnings.push(format!(
                            "Admin 1: ignoring blank Level 1 name in {countryiso3}"
                        ));
                        MatchTarget::None
                    }
                }
            } else {
                match area {
                    Some(name) => MatchTarget::Adm2 {
                        adm1_name: level1.map(String::from),
                        name: name.to_string(),
                    },
                    None => {
                        warnings.push(format!(
                            "Admin 2: ignoring blank Area name in {countryiso3}"
                        ));
                        MatchTarget::None
                    }
                }
            };
            (target, "Level 1: Admin 1, Area: Admin 2", provider1, provider2)
        }
        AdminCase::Adm2InLevel1 => {
            // The Level 1 field actually holds admin 2 names; rewrite the
            // provider columns accordingly.
            let target = match level1 {
                Some(name) => MatchTarget::Adm2 {
                    adm1_name: None,
                    name: name.to_string(),
                },
                None => {
                    warnings.push(format!(
                        "Admin 2: ignoring blank Level 1 name in {countryiso3}"
                    ));
                    MatchTarget::None
                }
            };
            (
                target,
                "Level 1: Admin 2, Area: ignored",
                String::new(),
                provider1,
            )
        }
        AdminCase::Adm1InArea => {
            let target = if table_level == TableLevel::Level1 {
                MatchTarget::None
            } else {
                match area {
                    Some(name) => MatchTarget::Adm1 {
                        name: name.to_string(),
                    },
                    None => {
                        warnings.push(format!(
                            "Admin 1: ignoring blank Area name in {countryiso3}"
                        ));
                        MatchTarget::None
                    }
                }
            };
            (target, "Level 1: ignored, Area: Admin 1", provider1, provider2)
        }
        AdminCase::Default => classify_default(countryiso3, table_level, level1, area, &mut warnings, provider1, provider2),
    };

    let admin_level = match &target {
        MatchTarget::Adm1 { .. } => 1,
        MatchTarget::Adm2 { .. } => 2,
        MatchTarget::None => table_level.admin_level(),
    };

    Classification {
        provider_admin1_name: provider1,
        provider_admin2_name: provider2,
        admin_level,
        target,
        warnings,
        status,
    }
}

fn classify_default(
    countryiso3: &str,
    table_level: TableLevel,
    level1: Option<&str>,
    area: Option<&str>,
    warnings: &mut Vec<String>,
    provider1: String,
    provider2: String,
) -> (MatchTarget, &'static str, String, String) {
    if table_level == TableLevel::Level1 {
        let target = match level1 {
            Some(name) => MatchTarget::Adm1 {
                name: name.to_string(),
            },
            None => {
                warnings.push(format!(
                    "Admin 1: ignoring blank Level 1 name in {countryiso3}"
                ));
                MatchTarget::None
            }
        };
        return (target, "Level 1: Admin 1, Area: Admin 2", provider1, provider2);
    }
    match (level1, area) {
        (Some(adm1_name), Some(name)) => (
            MatchTarget::Adm2 {
                adm1_name: Some(adm1_name.to_string()),
                name: name.to_string(),
            },
            "Level 1: Admin 1, Area: Admin 2",
            provider1,
            provider2,
        ),
        (Some(adm1_name), None) => {
            warnings.push(format!(
                "Admin 1: ignoring blank Area name in {countryiso3}|{adm1_name}"
            ));
            (
                MatchTarget::Adm1 {
                    name: adm1_name.to_string(),
                },
                "Level 1: Admin 1, Area: Admin 2",
                provider1,
                provider2,
            )
        }
        (None, Some(name)) => {
            // A populated Area under a blank Level 1 conventionally means
            // the area is actually the coarser unit.
            warnings.push(format!(
                "Admin 1: using Area as admin 1 for {countryiso3}|{name}"
            ));
            (
                MatchTarget::Adm1 {
                    name: name.to_string(),
                },
                "Level 1: ignored, Area: Admin 1",
                provider1,
                provider2,
            )
        }
        (None, None) => {
            warnings.push(format!(
                "Admin 1: ignoring blank Area name in {countryiso3}"
            ));
            (
                MatchTarget::None,
                "Level 1: Admin 1, Area: Admin 2",
                provider1,
                provider2,
            )
        }
    }
}

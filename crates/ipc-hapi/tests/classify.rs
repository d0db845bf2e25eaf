//! Classification cases for the Level 1/Area name pair.

use std::collections::BTreeSet;

use ipc_hapi::classify::{MatchTarget, classify};
use ipc_model::TableLevel;
use ipc_standards::AdminMatchingConfig;

fn set(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|c| (*c).to_string()).collect()
}

fn config() -> AdminMatchingConfig {
    AdminMatchingConfig {
        adm_ignore_patterns: vec!["urban".to_string()],
        adm1_only: set(&["AFG"]),
        adm2_only: set(&["CAF"]),
        adm2_only_include_adm1: set(&["COD"]),
        adm2_in_level1: set(&["KEN"]),
        adm1_in_area: set(&["ECU"]),
        adm1_errors: BTreeSet::new(),
        adm2_errors: BTreeSet::new(),
    }
}

#[test]
fn adm2_in_level1_rewrites_provider_names() {
    let c = classify(
        &config(),
        "KEN",
        TableLevel::Level1,
        Some("Districtname"),
        None,
    );
    assert_eq!(c.admin_level, 2);
    assert_eq!(c.provider_admin1_name, "");
    assert_eq!(c.provider_admin2_name, "Districtname");
    assert_eq!(
        c.target,
        MatchTarget::Adm2 {
            adm1_name: None,
            name: "Districtname".to_string()
        }
    );
}

#[test]
fn adm1_only_ignores_area_with_warning() {
    let c = classify(
        &config(),
        "AFG",
        TableLevel::Area,
        Some("Kabul"),
        Some("Kabul city"),
    );
    assert_eq!(c.admin_level, 1);
    assert_eq!(
        c.target,
        MatchTarget::Adm1 {
            name: "Kabul".to_string()
        }
    );
    assert!(c.warnings.iter().any(|w| w.contains("admin level not present")));
    // Provider names keep the literal feed values.
    assert_eq!(c.provider_admin2_name, "Kabul city");
}

#[test]
fn adm2_only_skips_level1_table_rows() {
    let c = classify(&config(), "CAF", TableLevel::Level1, Some("Bamingui"), None);
    assert_eq!(c.target, MatchTarget::None);

    let c = classify(&config(), "CAF", TableLevel::Area, None, Some("Bamingui"));
    assert_eq!(
        c.target,
        MatchTarget::Adm2 {
            adm1_name: None,
            name: "Bamingui".to_string()
        }
    );
    assert_eq!(c.admin_level, 2);
}

#[test]
fn adm2_only_include_adm1_uses_both_names() {
    let c = classify(
        &config(),
        "COD",
        TableLevel::Area,
        Some("Nord-Kivu"),
        Some("Beni"),
    );
    assert_eq!(
        c.target,
        MatchTarget::Adm2 {
            adm1_name: Some("Nord-Kivu".to_string()),
            name: "Beni".to_string()
        }
    );
}

#[test]
fn adm1_in_area_matches_area_at_admin1() {
    let c = classify(
        &config(),
        "ECU",
        TableLevel::Area,
        Some("ignored"),
        Some("Chimborazo"),
    );
    assert_eq!(c.admin_level, 1);
    assert_eq!(
        c.target,
        MatchTarget::Adm1 {
            name: "Chimborazo".to_string()
        }
    );

    let c = classify(&config(), "ECU", TableLevel::Level1, Some("ignored"), None);
    assert_eq!(c.target, MatchTarget::None);
}

#[test]
fn default_blank_level1_falls_back_to_area_as_admin1() {
    let c = classify(&config(), "ETH", TableLevel::Area, None, Some("Somali"));
    assert_eq!(c.admin_level, 1);
    assert_eq!(
        c.target,
        MatchTarget::Adm1 {
            name: "Somali".to_string()
        }
    );
    assert!(!c.warnings.is_empty());
}

#[test]
fn default_blank_names_warn_and_skip_matching() {
    let c = classify(&config(), "ETH", TableLevel::Level1, None, None);
    assert_eq!(c.target, MatchTarget::None);
    assert!(c.warnings.iter().any(|w| w.contains("blank Level 1 name")));
    // Level stays at the table's own level when nothing is resolvable.
    assert_eq!(c.admin_level, 1);

    let c = classify(&config(), "ETH", TableLevel::Area, None, None);
    assert_eq!(c.target, MatchTarget::None);
    assert!(c.warnings.iter().any(|w| w.contains("blank Area name")));
}

#[test]
fn default_both_names_match_at_admin2() {
    let c = classify(
        &config(),
        "ETH",
        TableLevel::Area,
        Some("Somali"),
        Some("Shabelle"),
    );
    assert_eq!(c.admin_level, 2);
    assert_eq!(
        c.target,
        MatchTarget::Adm2 {
            adm1_name: Some("Somali".to_string()),
            name: "Shabelle".to_string()
        }
    );
}

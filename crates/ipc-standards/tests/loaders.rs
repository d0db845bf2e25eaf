//! Loader tests against the bundled reference data and ad hoc fixtures.

use std::io::Write;

use ipc_standards::{
    AdminCase, load_admin_units, load_default_admin_matching, load_default_countries,
};

#[test]
fn bundled_countries_load_and_resolve() {
    let table = load_default_countries().expect("load countries");
    assert_eq!(table.iso3_from_iso2("AF"), Some("AFG"));
    assert_eq!(table.iso2_from_iso3("COD"), Some("CD"));
    assert_eq!(table.name_from_iso3("AFG"), Some("Afghanistan"));
    assert!(table.has_hrp("AFG"));
    assert!(table.in_gho("KEN"));
    assert!(!table.has_hrp("KEN"));
    assert_eq!(table.iso3_from_iso2("XX"), None);
}

#[test]
fn bundled_admin_matching_classifies_by_priority() {
    let config = load_default_admin_matching().expect("load admin matching");
    assert_eq!(config.case_for("AFG"), AdminCase::Adm1Only);
    assert_eq!(config.case_for("CAF"), AdminCase::Adm2Only);
    assert_eq!(config.case_for("COD"), AdminCase::Adm2OnlyIncludeAdm1);
    assert_eq!(config.case_for("KEN"), AdminCase::Adm2InLevel1);
    assert_eq!(config.case_for("ECU"), AdminCase::Adm1InArea);
    assert_eq!(config.case_for("ETH"), AdminCase::Default);
}

#[test]
fn ignore_patterns_match_substrings_case_insensitively() {
    let config = load_default_admin_matching().expect("load admin matching");
    assert!(config.is_ignored_name("Nairobi Urban"));
    assert!(config.is_ignored_name("IDPs in camps"));
    assert!(!config.is_ignored_name("Tigray"));
}

#[test]
fn admin_units_load_from_csv() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "ISO3,Level,PCode,Name,Parent").unwrap();
    writeln!(file, "ETH,1,ET05,Somali,").unwrap();
    writeln!(file, "ETH,2,ET0505,Shabelle,ET05").unwrap();
    file.flush().unwrap();

    let units = load_admin_units(file.path()).expect("load units");
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].level, 1);
    assert_eq!(units[0].parent, None);
    assert_eq!(units[1].parent.as_deref(), Some("ET05"));
}

#[test]
fn admin_units_reject_bad_level() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "ISO3,Level,PCode,Name,Parent").unwrap();
    writeln!(file, "ETH,3,ET0505,Shabelle,ET05").unwrap();
    file.flush().unwrap();

    assert!(load_admin_units(file.path()).is_err());
}

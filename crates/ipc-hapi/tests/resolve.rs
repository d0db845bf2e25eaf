//! End-to-end harmonized export over a small accumulated bundle.

use ipc_core::dates::DateWindow;
use ipc_core::{OutputBundle, add_country_rows, add_subnational_rows};
use ipc_hapi::{HapiRecord, HapiResolver, PcodeMatcher};
use ipc_model::Record;
use ipc_standards::{AdminMatchingConfig, AdminUnit, load_default_countries};
use serde_json::json;

fn eth_analysis(date: &str, group_name: &str) -> Record {
    let value = json!({
        "analysis_date": date,
        "title": format!("Ethiopia {date}"),
        "population": 120_000_000.0,
        "current_period_dates": "May 2024 - Sep 2024",
        "estimated_population": 20_000_000.0,
        "p3plus": 7_000_000.0,
        "p3plus_percentage": 0.35,
        "groups": [
            {
                "name": group_name,
                "estimated_population": 4_000_000.0,
                "areas": [
                    {
                        "name": "Shabelle",
                        "estimated_population": 900_000.0,
                        "phase3_population": 300_000.0,
                        "phase3_percentage": 0.33
                    }
                ]
            }
        ]
    });
    Record::from_value(&value, "test").expect("record")
}

fn bundle_for(analyses: &[Record]) -> OutputBundle {
    let mut bundle = OutputBundle::default();
    let mut window = DateWindow::default();
    for analysis in analyses {
        add_country_rows(analysis, "ETH", &mut window, &mut bundle.history.country)
            .expect("country rows");
        add_subnational_rows(
            analysis,
            "ETH",
            &mut window,
            &mut bundle.history.group,
            &mut bundle.history.area,
        )
        .expect("subnational rows");
    }
    bundle.window = window;
    bundle
}

fn matcher() -> PcodeMatcher {
    PcodeMatcher::new(vec![
        AdminUnit {
            countryiso3: "ETH".to_string(),
            level: 1,
            pcode: "ET05".to_string(),
            name: "Somali".to_string(),
            parent: None,
        },
        AdminUnit {
            countryiso3: "ETH".to_string(),
            level: 2,
            pcode: "ET0505".to_string(),
            name: "Shabelle".to_string(),
            parent: Some("ET05".to_string()),
        },
    ])
}

#[test]
fn resolves_admin_codes_and_expands_phases() {
    let bundle = bundle_for(&[eth_analysis("May 2024", "Somali")]);
    let config = AdminMatchingConfig::default();
    let countries = load_default_countries().expect("countries");
    let matcher = matcher();
    let mut resolver = HapiResolver::new(&config, &countries, &matcher);

    let records = resolver.process(&bundle).expect("process");
    assert!(!records.is_empty());

    // National record: admin level 0, empty names and codes, GHO flag set.
    let national = records
        .iter()
        .find(|r| r.admin_level == 0 && r.ipc_phase == "all")
        .expect("national all record");
    assert_eq!(national.location_code, "ETH");
    assert_eq!(national.in_gho, true);
    assert_eq!(national.has_hrp, true);
    assert_eq!(national.provider_admin1_name, "");
    assert_eq!(national.population_in_phase, 20_000_000.0);
    assert_eq!(national.population_fraction_in_phase, Some(1.0));

    // Area record: both codes resolved exactly, no warnings.
    let area = records
        .iter()
        .find(|r| r.admin_level == 2 && r.ipc_phase == "3")
        .expect("area phase 3 record");
    assert_eq!(area.admin1_code, "ET05");
    assert_eq!(area.admin2_code, "ET0505");
    assert_eq!(area.admin2_name, "Shabelle");
    assert_eq!(area.provider_admin2_name, "Shabelle");
    assert_eq!(area.warning, "");
    assert_eq!(area.reference_period_start, "2024-05-01");
    assert_eq!(area.reference_period_end, "2024-09-30");

    // Every all-phase record has the synthesized fraction.
    assert!(
        records
            .iter()
            .filter(|r| r.ipc_phase == "all")
            .all(|r| r.population_fraction_in_phase == Some(1.0))
    );
}

#[test]
fn unmatched_names_warn_but_records_survive() {
    let bundle = bundle_for(&[eth_analysis("May 2024", "Atlantis")]);
    let config = AdminMatchingConfig::default();
    let countries = load_default_countries().expect("countries");
    let matcher = matcher();
    let mut resolver = HapiResolver::new(&config, &countries, &matcher);

    let records = resolver.process(&bundle).expect("process");
    let group = records
        .iter()
        .find(|r| r.admin_level == 1)
        .expect("group record");
    assert_eq!(group.admin1_code, "");
    assert!(group.warning.contains("could not match ETH|Atlantis"));
    assert_eq!(group.provider_admin1_name, "Atlantis");
}

#[test]
fn duplicate_observations_across_analyses_are_annotated() {
    // Two analyses report the same group for the same period; only the one
    // with the later analysis date survives without an error.
    let bundle = bundle_for(&[
        eth_analysis("Jun 2024", "Somali"),
        eth_analysis("Jan 2024", "Somali"),
    ]);
    let config = AdminMatchingConfig::default();
    let countries = load_default_countries().expect("countries");
    let matcher = matcher();
    let mut resolver = HapiResolver::new(&config, &countries, &matcher);

    let records = resolver.process(&bundle).expect("process");
    let group_records: Vec<_> = records
        .iter()
        .filter(|r| r.admin_level == 1 && r.ipc_phase == "all")
        .collect();
    assert_eq!(group_records.len(), 2);
    let (kept, excluded): (Vec<&&HapiRecord>, Vec<&&HapiRecord>) =
        group_records.iter().partition(|r| r.error.is_empty());
    assert_eq!(kept.len(), 1);
    assert_eq!(excluded.len(), 1);
    assert!(
        excluded[0]
            .error
            .contains("duplicate row with earlier date of analysis excluded")
    );
}

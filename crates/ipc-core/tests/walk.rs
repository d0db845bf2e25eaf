//! Hierarchy walking: country, group, and area rows from one analysis.

use ipc_core::dates::DateWindow;
use ipc_core::rows::RowSet;
use ipc_core::walk::{add_country_rows, add_subnational_rows};
use ipc_model::Record;
use serde_json::json;

fn analysis_with_groups() -> Record {
    let value = json!({
        "analysis_date": "May 2023",
        "title": "Acute Food Insecurity May 2023",
        "population": 41_000_000.0,
        "current_period_dates": "May 2023 - Oct 2023",
        "estimated_population": 39_000_000.0,
        "p3plus": 15_300_000.0,
        "groups": [
            {
                "name": "Kabul",
                "estimated_population": 5_000_000.0,
                "p3plus": 2_000_000.0,
                "areas": [
                    {"name": "Kabul city", "phase3_population": 800_000.0},
                    {"name": "Surrounding districts", "phase4_population": 100_000.0}
                ]
            },
            {
                "name": "Herat",
                "estimated_population": 2_000_000.0
            }
        ]
    });
    Record::from_value(&value, "test").expect("object record")
}

#[test]
fn country_rows_come_from_the_analysis_itself() {
    let analysis = analysis_with_groups();
    let mut window = DateWindow::default();
    let mut out = RowSet::default();
    add_country_rows(&analysis, "AFG", &mut window, &mut out).expect("walk");

    assert_eq!(out.rows_wide.len(), 1);
    assert!(out.rows.iter().all(|r| r.level1.is_none() && r.area.is_none()));
    let all = out.rows.iter().find(|r| r.phase == "all").expect("all row");
    assert_eq!(all.number, 39_000_000.0);
    assert_eq!(all.country, "AFG");
}

#[test]
fn groups_and_their_areas_are_walked() {
    let analysis = analysis_with_groups();
    let mut window = DateWindow::default();
    let mut groups = RowSet::default();
    let mut areas = RowSet::default();
    add_subnational_rows(&analysis, "AFG", &mut window, &mut groups, &mut areas).expect("walk");

    assert_eq!(groups.rows_wide.len(), 2);
    assert!(groups.rows.iter().all(|r| r.level1.is_some() && r.area.is_none()));

    assert_eq!(areas.rows_wide.len(), 2);
    let kabul_city = areas
        .rows
        .iter()
        .find(|r| r.area.as_deref() == Some("Kabul city"))
        .expect("area row");
    assert_eq!(kabul_city.level1.as_deref(), Some("Kabul"));
    // Period came from the analysis fallback.
    assert_eq!(kabul_city.from, "2023-05-01");
}

#[test]
fn analysis_without_groups_attaches_areas_to_country() {
    let value = json!({
        "analysis_date": "Mar 2022",
        "title": "Analysis",
        "current_period_dates": "Mar 2022 - Jun 2022",
        "areas": [
            {"name": "North", "p3plus": 1000.0}
        ]
    });
    let analysis = Record::from_value(&value, "test").expect("record");
    let mut window = DateWindow::default();
    let mut groups = RowSet::default();
    let mut areas = RowSet::default();
    add_subnational_rows(&analysis, "CAF", &mut window, &mut groups, &mut areas).expect("walk");

    assert!(groups.rows_wide.is_empty());
    assert_eq!(areas.rows_wide.len(), 1);
    let row = areas.rows.iter().find(|r| r.phase == "3+").expect("row");
    assert_eq!(row.level1, None);
    assert_eq!(row.area.as_deref(), Some("North"));
}

#[test]
fn null_areas_field_skips_subtree_without_failing() {
    let value = json!({
        "analysis_date": "Mar 2022",
        "title": "Analysis",
        "groups": [
            {"name": "Good", "p3plus": 10.0, "areas": [{"name": "A", "p3plus": 5.0}]},
            {"name": "Broken", "p3plus": 20.0, "areas": null}
        ]
    });
    let analysis = Record::from_value(&value, "test").expect("record");
    let mut window = DateWindow::default();
    let mut groups = RowSet::default();
    let mut areas = RowSet::default();
    add_subnational_rows(&analysis, "ETH", &mut window, &mut groups, &mut areas).expect("walk");

    // Both groups still produce rows; only the broken subtree's areas are lost.
    assert_eq!(groups.rows_wide.len(), 2);
    assert_eq!(areas.rows_wide.len(), 1);
}

#[test]
fn group_without_name_is_structural_and_halts() {
    let value = json!({
        "analysis_date": "Mar 2022",
        "groups": [{"p3plus": 10.0}]
    });
    let analysis = Record::from_value(&value, "test").expect("record");
    let mut window = DateWindow::default();
    let mut groups = RowSet::default();
    let mut areas = RowSet::default();
    let result = add_subnational_rows(&analysis, "ETH", &mut window, &mut groups, &mut areas);
    assert!(result.is_err());
}

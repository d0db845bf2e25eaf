//! Full pipeline run against saved fixture data (no network).

use std::fs;
use std::path::Path;

use clap::Parser;
use ipc_cli::cli::Cli;
use ipc_cli::pipeline::run;
use serde_json::json;

fn write_fixtures(saved_dir: &Path) {
    fs::create_dir_all(saved_dir).expect("saved dir");
    let analyses = json!([
        {"country": "AF", "analysis_date": "May 2023"}
    ]);
    fs::write(
        saved_dir.join("analyses.json"),
        serde_json::to_string_pretty(&analyses).unwrap(),
    )
    .expect("write analyses");

    let population = json!([
        {
            "id": 12345678,
            "country": "AF",
            "analysis_date": "May 2023",
            "title": "Acute Food Insecurity May 2023",
            "population": 41_000_000.0,
            "current_period_dates": "May 2023 - Oct 2023",
            "projected_period_dates": "Nov 2023 - Mar 2024",
            "estimated_population": 39_000_000.0,
            "p3plus": 15_300_000.0,
            "p3plus_percentage": 0.39,
            "groups": [
                {
                    "name": "Kabul",
                    "estimated_population": 5_000_000.0,
                    "p3plus": 2_000_000.0,
                    "areas": [
                        {"name": "Kabul city", "phase3_population": 800_000.0}
                    ]
                }
            ]
        },
        {
            "id": 12340000,
            "country": "AF",
            "analysis_date": "Mar 2022",
            "title": "Acute Food Insecurity Mar 2022",
            "population": 40_000_000.0,
            "current_period_dates": "Mar 2022 - Jun 2022",
            "estimated_population": 38_000_000.0,
            "p3plus": 14_000_000.0
        }
    ]);
    fs::write(
        saved_dir.join("population_AF.json"),
        serde_json::to_string_pretty(&population).unwrap(),
    )
    .expect("write population");

    fs::write(saved_dir.join("ipc_afg.geojson"), "{}").expect("write geojson");
}

fn cli_for(dir: &Path) -> Cli {
    Cli::try_parse_from([
        "ipc-pipeline",
        "--use-saved",
        "--saved-dir",
        dir.join("saved_data").to_str().unwrap(),
        "--output-dir",
        dir.join("output").to_str().unwrap(),
        "--state-file",
        dir.join("analysis_dates.txt").to_str().unwrap(),
        "--config",
        dir.join("pipeline.toml").to_str().unwrap(),
    ])
    .expect("parse cli")
}

#[test]
fn full_run_writes_country_global_and_harmonized_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixtures(&dir.path().join("saved_data"));

    let summary = run(&cli_for(dir.path())).expect("run pipeline");
    assert!(!summary.has_errors);
    assert_eq!(summary.countries.len(), 1);
    assert!(summary.countries[0].updated);
    assert!(summary.countries[0].files > 0);
    assert!(summary.global_files > 0);
    assert!(summary.hapi_records.unwrap_or(0) > 0);

    let output = dir.path().join("output");
    for filename in [
        "ipc_afg_national_long_latest.csv",
        "ipc_afg_national_long.csv",
        "ipc_afg_level1_long_latest.csv",
        "ipc_afg_area_long_latest.csv",
        "ipc_global_national_long_latest.csv",
        "ipc_global_national_long.csv",
        "hdx_hapi_food_security_global.csv",
    ] {
        assert!(output.join(filename).exists(), "missing {filename}");
    }

    // Watermark state round-tripped to disk.
    let state = fs::read_to_string(dir.path().join("analysis_dates.txt")).expect("state");
    assert!(state.contains("AFG=2023-05-01"));
}

#[test]
fn second_run_reports_nothing_to_update() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixtures(&dir.path().join("saved_data"));

    let first = run(&cli_for(dir.path())).expect("first run");
    assert!(first.countries[0].updated);

    let second = run(&cli_for(dir.path())).expect("second run");
    assert!(!second.countries[0].updated);
    assert_eq!(second.countries[0].files, 0);
    assert_eq!(second.global_files, 0);
}

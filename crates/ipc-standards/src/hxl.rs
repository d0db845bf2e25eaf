//! Fixed HXL tag tables for the output CSVs.
//!
//! Every artifact carries a second header row of per-column HXL tags. Long
//! and harmonized tables have a fixed column set, so their tags are literal
//! tables. Wide columns are the product of projections and phases, so their
//! tags are generated from the same vocabulary that names the columns.

use std::collections::BTreeMap;

use ipc_model::{PHASES, PROJECTIONS, Phase, Projection};

/// Tag for a long-table column.
pub fn long_hxltag(column: &str) -> Option<&'static str> {
    match column {
        "Date of analysis" => Some("#date+analysis"),
        "Country" => Some("#country+code"),
        "Total country population" => Some("#population+total"),
        "Level 1" => Some("#adm1+name"),
        "Area" => Some("#adm2+name"),
        "Validity period" => Some("#period+type"),
        "From" => Some("#date+start"),
        "To" => Some("#date+end"),
        "Phase" => Some("#severity+phase"),
        "Number" => Some("#affected+num"),
        "Percentage" => Some("#affected+pct"),
        _ => None,
    }
}

fn phase_attribute(phase: Phase) -> String {
    match phase {
        Phase::All => "analyzed".to_string(),
        Phase::ThreePlus => "p3plus".to_string(),
        _ => format!("phase{}", phase.label()),
    }
}

fn projection_attribute(projection: Projection) -> &'static str {
    projection.key()
}

/// The full wide-column tag table (every column a wide row can carry).
pub fn wide_tag_table() -> BTreeMap<String, String> {
    let mut table: BTreeMap<String, String> = BTreeMap::new();
    for column in [
        "Date of analysis",
        "Country",
        "Total country population",
        "Level 1",
        "Area",
    ] {
        if let Some(tag) = long_hxltag(column) {
            table.insert(column.to_string(), tag.to_string());
        }
    }
    for projection in PROJECTIONS {
        let label = projection.label();
        let lower = projection.label_lower();
        let attr = projection_attribute(projection);
        table.insert(format!("{label} from"), format!("#date+start+{attr}"));
        table.insert(format!("{label} to"), format!("#date+end+{attr}"));
        for phase in PHASES {
            let phase_attr = phase_attribute(phase);
            if phase == Phase::All {
                table.insert(
                    format!("Population analyzed {lower}"),
                    format!("#affected+num+{phase_attr}+{attr}"),
                );
            } else {
                table.insert(
                    format!("Phase {} number {lower}", phase.label()),
                    format!("#affected+num+{phase_attr}+{attr}"),
                );
                table.insert(
                    format!("Phase {} percentage {lower}", phase.label()),
                    format!("#affected+pct+{phase_attr}+{attr}"),
                );
            }
        }
    }
    table
}

/// Harmonized export columns with their tags, in output order.
pub fn hapi_columns() -> &'static [(&'static str, &'static str)] {
    &[
        ("location_code", "#country+code"),
        ("has_hrp", "#meta+has_hrp"),
        ("in_gho", "#meta+in_gho"),
        ("provider_admin1_name", "#adm1+name+provider"),
        ("provider_admin2_name", "#adm2+name+provider"),
        ("admin1_code", "#adm1+code"),
        ("admin1_name", "#adm1+name"),
        ("admin2_code", "#adm2+code"),
        ("admin2_name", "#adm2+name"),
        ("admin_level", "#adm+level"),
        ("ipc_phase", "#severity+phase"),
        ("ipc_type", "#period+type"),
        ("population_in_phase", "#affected+num"),
        ("population_fraction_in_phase", "#affected+pct"),
        ("reference_period_start", "#date+start"),
        ("reference_period_end", "#date+end"),
        ("warning", "#meta+warning"),
        ("error", "#meta+error"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_table_covers_generated_columns() {
        let table = wide_tag_table();
        assert_eq!(
            table.get("Current from").map(String::as_str),
            Some("#date+start+current")
        );
        assert_eq!(
            table.get("Population analyzed second projection").map(String::as_str),
            Some("#affected+num+analyzed+second_projected")
        );
        assert_eq!(
            table.get("Phase 3+ number first projection").map(String::as_str),
            Some("#affected+num+p3plus+projected")
        );
        assert_eq!(
            table.get("Phase 5 percentage current").map(String::as_str),
            Some("#affected+pct+phase5+current")
        );
        // No percentage column exists for the analyzed population.
        assert!(!table.contains_key("Phase all percentage current"));
    }
}

//! Recursion through the country → group → area tree of one analysis.

use ipc_model::{Record, Result};
use serde_json::Value;
use tracing::error;

use crate::dates::DateWindow;
use crate::rows::{BaseRow, RowSet, add_location_rows};

/// Build the national-level rows for one analysis.
pub fn add_country_rows(
    analysis: &Record,
    countryiso3: &str,
    window: &mut DateWindow,
    out: &mut RowSet,
) -> Result<()> {
    let base = BaseRow::from_analysis(analysis, countryiso3)?;
    add_location_rows(&base, analysis, None, window, out)
}

/// Build the level-1 and area rows for one analysis.
///
/// Groups each get a row and recurse into their areas; an analysis without
/// groups attaches its areas directly under the country with a null Level 1.
pub fn add_subnational_rows(
    analysis: &Record,
    countryiso3: &str,
    window: &mut DateWindow,
    group_out: &mut RowSet,
    area_out: &mut RowSet,
) -> Result<()> {
    let base = BaseRow::from_analysis(analysis, countryiso3)?;
    match analysis.get_array("groups") {
        Some(groups) if !groups.is_empty() => {
            for value in groups {
                let group = Record::from_value(value, &format!("group in {countryiso3}"))?;
                let name = group.require_str("name", &format!("group in {countryiso3}"))?;
                let group_base = base.for_group(name);
                add_location_rows(&group_base, &group, Some(analysis), window, group_out)?;
                if group.has_field("areas") {
                    process_areas(&group_base, &group, analysis, countryiso3, window, area_out)?;
                }
            }
        }
        _ => {
            if analysis.has_field("areas") {
                process_areas(&base, analysis, analysis, countryiso3, window, area_out)?;
            }
        }
    }
    Ok(())
}

fn process_areas(
    parent_base: &BaseRow,
    adm: &Record,
    analysis: &Record,
    countryiso3: &str,
    window: &mut DateWindow,
    area_out: &mut RowSet,
) -> Result<()> {
    let areas = match adm.raw("areas") {
        Some(Value::Array(areas)) => areas,
        Some(_) => {
            // Malformed upstream data; skip the subtree, not the country.
            error!(
                "{countryiso3}: {} has blank \"areas\" field!",
                analysis.get_str("title").unwrap_or("analysis")
            );
            return Ok(());
        }
        None => return Ok(()),
    };
    for value in areas {
        let area = Record::from_value(value, &format!("area in {countryiso3}"))?;
        let name = area.require_str("name", &format!("area in {countryiso3}"))?;
        let area_base = parent_base.for_area(name);
        add_location_rows(&area_base, &area, Some(analysis), window, area_out)?;
    }
    Ok(())
}

//! Artifact sets with the fixed file naming contract:
//! `ipc_{iso3|global}_{national|level1|area}_{long|wide}[_latest].csv`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ipc_core::{CountryOutput, OutputBundle};
use ipc_hapi::HapiRecord;
use ipc_model::{TableLevel, long_headers};
use ipc_standards::{hapi_columns, long_hxltag, wide_tag_table};
use tracing::{error, warn};

use crate::writer::{wide_headers, write_tabular};

/// Name of the harmonized global export.
pub const HAPI_FILENAME: &str = "hdx_hapi_food_security_global.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Latest,
    History,
}

impl Variant {
    fn suffix(self) -> &'static str {
        match self {
            Variant::Latest => "_latest",
            Variant::History => "",
        }
    }
}

fn long_filename(scope: &str, level: TableLevel, variant: Variant) -> String {
    format!(
        "ipc_{scope}_{}_long{}.csv",
        level.file_token(),
        variant.suffix()
    )
}

fn wide_filename(scope: &str, level: TableLevel, variant: Variant) -> String {
    format!(
        "ipc_{scope}_{}_wide{}.csv",
        level.file_token(),
        variant.suffix()
    )
}

fn write_long(
    folder: &Path,
    scope: &str,
    level: TableLevel,
    variant: Variant,
    rows: &[ipc_model::LongRow],
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let filename = long_filename(scope, level, variant);
    let headers: Vec<String> = long_headers(level).iter().map(ToString::to_string).collect();
    let tags: Vec<String> = headers
        .iter()
        .map(|h| long_hxltag(h).unwrap_or_default().to_string())
        .collect();
    let values: Vec<Vec<String>> = rows.iter().map(|r| r.values(level)).collect();
    let path = folder.join(&filename);
    if write_tabular(&path, &headers, &tags, &values)? {
        written.push(path);
    } else {
        warn!("{filename} has no data!");
    }
    Ok(())
}

fn write_wide(
    folder: &Path,
    scope: &str,
    level: TableLevel,
    variant: Variant,
    rows: &[ipc_model::WideRow],
    tag_table: &BTreeMap<String, String>,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let filename = wide_filename(scope, level, variant);
    let headers = wide_headers(rows);
    let tags: Vec<String> = headers
        .iter()
        .map(|h| tag_table.get(h).cloned().unwrap_or_default())
        .collect();
    let values: Vec<Vec<String>> = rows.iter().map(|r| r.values(&headers)).collect();
    let path = folder.join(&filename);
    if write_tabular(&path, &headers, &tags, &values)? {
        written.push(path);
    } else {
        warn!("{filename} has no data!");
    }
    Ok(())
}

/// Write one scope's artifact set (a country's, or the global one).
///
/// The latest national long table is mandatory: without it the whole set is
/// skipped with a warning, matching the upstream contract. The national
/// wide latest table is only written when it has more than one row (it is
/// trivial for a single country). A scope whose history holds exactly one
/// analysis gets no history files.
pub fn write_bundle(folder: &Path, scope: &str, bundle: &OutputBundle) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let tag_table = wide_tag_table();

    let latest_national = &bundle.latest.country;
    if latest_national.rows.is_empty() {
        warn!(
            "{} has no data!",
            long_filename(scope, TableLevel::National, Variant::Latest)
        );
        return Ok(written);
    }
    write_long(
        folder,
        scope,
        TableLevel::National,
        Variant::Latest,
        &latest_national.rows,
        &mut written,
    )?;
    if latest_national.rows_wide.len() > 1 {
        write_wide(
            folder,
            scope,
            TableLevel::National,
            Variant::Latest,
            &latest_national.rows_wide,
            &tag_table,
            &mut written,
        )?;
    }

    let latest_group = &bundle.latest.group;
    if !latest_group.rows.is_empty() {
        write_long(
            folder,
            scope,
            TableLevel::Level1,
            Variant::Latest,
            &latest_group.rows,
            &mut written,
        )?;
    }
    if !latest_group.rows_wide.is_empty() {
        write_wide(
            folder,
            scope,
            TableLevel::Level1,
            Variant::Latest,
            &latest_group.rows_wide,
            &tag_table,
            &mut written,
        )?;
    }

    let latest_area = &bundle.latest.area;
    if !latest_area.rows.is_empty() {
        write_long(
            folder,
            scope,
            TableLevel::Area,
            Variant::Latest,
            &latest_area.rows,
            &mut written,
        )?;
    } else if latest_group.rows.is_empty() {
        error!("{scope} has no latest subnational data!");
    }
    if !latest_area.rows_wide.is_empty() {
        write_wide(
            folder,
            scope,
            TableLevel::Area,
            Variant::Latest,
            &latest_area.rows_wide,
            &tag_table,
            &mut written,
        )?;
    }

    // A single analysis means the history tables duplicate the latest ones.
    if bundle.history.country.rows_wide.len() == 1 {
        return Ok(written);
    }

    write_long(
        folder,
        scope,
        TableLevel::National,
        Variant::History,
        &bundle.history.country.rows,
        &mut written,
    )?;
    write_wide(
        folder,
        scope,
        TableLevel::National,
        Variant::History,
        &bundle.history.country.rows_wide,
        &tag_table,
        &mut written,
    )?;

    let group = &bundle.history.group;
    if !group.rows.is_empty() {
        write_long(
            folder,
            scope,
            TableLevel::Level1,
            Variant::History,
            &group.rows,
            &mut written,
        )?;
    }
    if !group.rows_wide.is_empty() {
        write_wide(
            folder,
            scope,
            TableLevel::Level1,
            Variant::History,
            &group.rows_wide,
            &tag_table,
            &mut written,
        )?;
    }

    let area = &bundle.history.area;
    if !area.rows.is_empty() {
        write_long(
            folder,
            scope,
            TableLevel::Area,
            Variant::History,
            &area.rows,
            &mut written,
        )?;
    } else if group.rows.is_empty() {
        error!("{scope} has no subnational data!");
    }
    if !area.rows_wide.is_empty() {
        write_wide(
            folder,
            scope,
            TableLevel::Area,
            Variant::History,
            &area.rows_wide,
            &tag_table,
            &mut written,
        )?;
    }

    Ok(written)
}

/// Write a country's artifact set.
pub fn write_country(folder: &Path, output: &CountryOutput) -> Result<Vec<PathBuf>> {
    write_bundle(folder, &output.countryiso3.to_lowercase(), &output.bundle)
}

/// Write the harmonized global export.
pub fn write_hapi(folder: &Path, records: &[HapiRecord]) -> Result<Option<PathBuf>> {
    let headers: Vec<String> = hapi_columns()
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect();
    let tags: Vec<String> = hapi_columns()
        .iter()
        .map(|(_, tag)| (*tag).to_string())
        .collect();
    let values: Vec<Vec<String>> = records.iter().map(HapiRecord::values).collect();
    let path = folder.join(HAPI_FILENAME);
    if write_tabular(&path, &headers, &tags, &values)? {
        Ok(Some(path))
    } else {
        warn!("{HAPI_FILENAME} has no data!");
        Ok(None)
    }
}

//! Orchestration: per-country loop, global export, harmonized stage.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ipc_core::{CountryAggregator, PipelineState};
use ipc_hapi::{HapiResolver, PcodeMatcher};
use ipc_output::{write_bundle, write_country, write_hapi};
use ipc_standards::{
    load_admin_units, load_default_admin_matching, load_default_countries,
};
use tracing::{error, info, warn};

use crate::cli::Cli;
use crate::config::PipelineConfig;
use crate::fetch::IpcClient;

#[derive(Debug, Clone)]
pub struct CountrySummary {
    pub countryiso3: String,
    pub updated: bool,
    pub files: usize,
    pub failed: bool,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub countries: Vec<CountrySummary>,
    pub global_files: usize,
    pub hapi_records: Option<usize>,
    pub has_errors: bool,
}

pub fn run(cli: &Cli) -> Result<RunSummary> {
    let config = PipelineConfig::load(&cli.config)?;
    let country_table = load_default_countries().context("load country table")?;
    let admin_config = load_default_admin_matching().context("load admin matching config")?;
    let mut state = PipelineState::load(&cli.state_file)
        .with_context(|| format!("load state {}", cli.state_file.display()))?;
    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("create {}", cli.output_dir.display()))?;

    let client = IpcClient::new(
        &config,
        &cli.saved_dir,
        &cli.output_dir,
        cli.save,
        cli.use_saved,
    )?;
    let mut aggregator = CountryAggregator::new(&client, &country_table, &mut state);

    let countryisos = if cli.countries.is_empty() {
        aggregator.get_countries().context("discover countries")?
    } else {
        let mut filtered: Vec<String> =
            cli.countries.iter().map(|c| c.to_uppercase()).collect();
        filtered.sort();
        filtered.dedup();
        filtered
    };
    info!("Number of countries: {}", countryisos.len());

    // Countries run strictly sequentially: each call extends the global
    // bundle in place, and the harmonized stage needs all of them done.
    let mut summaries = Vec::new();
    let mut any_updated = false;
    let mut has_errors = false;
    for countryiso3 in &countryisos {
        match aggregator.process_country(countryiso3) {
            Ok(Some(output)) => {
                let files = write_country(&cli.output_dir, &output)
                    .with_context(|| format!("write artifacts for {countryiso3}"))?;
                any_updated = true;
                summaries.push(CountrySummary {
                    countryiso3: countryiso3.clone(),
                    updated: true,
                    files: files.len(),
                    failed: false,
                });
            }
            Ok(None) => {
                summaries.push(CountrySummary {
                    countryiso3: countryiso3.clone(),
                    updated: false,
                    files: 0,
                    failed: false,
                });
            }
            Err(error) => {
                // A structural problem in one country's feed does not stop
                // the others.
                error!("{countryiso3}: {error:#}");
                has_errors = true;
                summaries.push(CountrySummary {
                    countryiso3: countryiso3.clone(),
                    updated: false,
                    files: 0,
                    failed: true,
                });
            }
        }
    }

    let global = aggregator.into_global();
    let mut global_files = 0;
    let mut hapi_records = None;
    if any_updated {
        global_files = write_bundle(&cli.output_dir, "global", &global)
            .context("write global artifacts")?
            .len();

        if !cli.skip_hapi {
            let matcher = match &config.admin_units {
                Some(path) => PcodeMatcher::new(
                    load_admin_units(path)
                        .with_context(|| format!("load admin units {}", path.display()))?,
                ),
                None => {
                    warn!("no admin units configured, harmonized admin codes will be empty");
                    PcodeMatcher::empty()
                }
            };
            let mut resolver = HapiResolver::new(&admin_config, &country_table, &matcher);
            let records = resolver.process(&global).context("harmonized export")?;
            write_hapi(&cli.output_dir, &records).context("write harmonized export")?;
            hapi_records = Some(records.len());
        }
    } else {
        info!("Nothing to update!");
    }

    state
        .save(&cli.state_file)
        .with_context(|| format!("save state {}", cli.state_file.display()))?;

    Ok(RunSummary {
        output_dir: cli.output_dir.clone(),
        countries: summaries,
        global_files,
        hapi_records,
        has_errors,
    })
}

//! Per-country processing and the process-wide accumulated bundle.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::Datelike;
use ipc_model::Record;
use ipc_standards::CountryTable;
use tracing::{debug, error, info};

use crate::bundle::{CountryOutput, OutputBundle};
use crate::dates::{DateWindow, parse_month_year};
use crate::source::AnalysisSource;
use crate::state::PipelineState;
use crate::walk::{add_country_rows, add_subnational_rows};

/// Drives the per-country walk and owns the accumulated global bundle.
///
/// Countries are processed strictly sequentially; each call extends the
/// global bundle in place, so the harmonized-export stage must run only
/// after the last country.
pub struct CountryAggregator<'a, S: AnalysisSource> {
    source: &'a S,
    countries: &'a CountryTable,
    state: &'a mut PipelineState,
    global: OutputBundle,
}

impl<'a, S: AnalysisSource> CountryAggregator<'a, S> {
    pub fn new(
        source: &'a S,
        countries: &'a CountryTable,
        state: &'a mut PipelineState,
    ) -> Self {
        let global = OutputBundle {
            window: state.window(),
            ..OutputBundle::default()
        };
        Self {
            source,
            countries,
            state,
            global,
        }
    }

    /// Discover the ISO3 codes present in the feed, sorted and de-duplicated.
    /// Unknown ISO2 codes are logged and skipped.
    pub fn get_countries(&self) -> Result<Vec<String>> {
        let values = self.source.analyses_overview()?;
        let mut countryisos = BTreeSet::new();
        for value in &values {
            let analysis = Record::from_value(value, "analyses overview")?;
            let countryiso2 = analysis.require_str("country", "analyses overview")?;
            match self.countries.iso3_from_iso2(countryiso2) {
                Some(countryiso3) => {
                    countryisos.insert(countryiso3.to_string());
                }
                None => {
                    error!("Could not find country ISO 3 code matching ISO 2 code {countryiso2}!");
                }
            }
        }
        Ok(countryisos.into_iter().collect())
    }

    /// Process one country's full analysis history.
    ///
    /// Returns `None` when the feed has no data for the country or its
    /// newest analysis does not exceed the stored watermark; the global
    /// bundle is still extended in the latter case, and the watermark
    /// advances regardless.
    pub fn process_country(&mut self, countryiso3: &str) -> Result<Option<CountryOutput>> {
        let countryiso2 = self
            .countries
            .iso2_from_iso3(countryiso3)
            .with_context(|| format!("no ISO2 code for {countryiso3}"))?
            .to_string();
        let raw = self
            .source
            .country_analyses(&countryiso2)
            .with_context(|| format!("fetch analyses for {countryiso3}"))?;
        if raw.is_empty() {
            info!("{countryiso3}: no analyses in feed");
            return Ok(None);
        }
        let analyses = raw
            .iter()
            .map(|value| Record::from_value(value, &format!("analysis for {countryiso3}")))
            .collect::<ipc_model::Result<Vec<_>>>()?;

        let newest = &analyses[0];
        let analysis_date = parse_month_year(
            newest.require_str("analysis_date", &format!("analysis for {countryiso3}"))?,
        )?;
        let update = analysis_date > self.state.cutoff_for(countryiso3);
        self.state.set_country_date(countryiso3, analysis_date);

        let mut window = DateWindow::default();
        let mut bundle = OutputBundle::default();
        let mut geojson = None;

        // The newest analysis may lack current-period dates; the latest
        // tables come from the most recent one that has them.
        let latest_current = analyses
            .iter()
            .find(|a| a.get_nonempty_str("current_period_dates").is_some());
        if let Some(latest) = latest_current {
            let analysis_id = latest
                .get_f64("id")
                .map(|v| v as i64)
                .with_context(|| format!("analysis id missing for {countryiso3}"))?;
            let year = parse_month_year(
                latest.require_str("analysis_date", &format!("analysis for {countryiso3}"))?,
            )?
            .year();
            let filename = format!("ipc_{}.geojson", countryiso3.to_lowercase());
            let path = self
                .source
                .boundary_file(analysis_id, year, &countryiso2, &filename)
                .with_context(|| format!("fetch boundary file for {countryiso3}"))?;
            geojson = Some(path);

            add_country_rows(latest, countryiso3, &mut window, &mut bundle.latest.country)?;
            add_subnational_rows(
                latest,
                countryiso3,
                &mut window,
                &mut bundle.latest.group,
                &mut bundle.latest.area,
            )?;
        } else {
            debug!("{countryiso3}: no analysis with current period dates");
        }

        for analysis in &analyses {
            add_country_rows(analysis, countryiso3, &mut window, &mut bundle.history.country)?;
            add_subnational_rows(
                analysis,
                countryiso3,
                &mut window,
                &mut bundle.history.group,
                &mut bundle.history.area,
            )?;
        }
        bundle.window = window;

        // The global export reflects every country regardless of the update
        // decision; only the per-country artifacts are suppressed.
        self.global.merge(bundle.clone());
        self.state.record_window(&window);

        if !update {
            info!("{countryiso3}: analysis date {analysis_date} is not newer, no dataset update");
            return Ok(None);
        }
        Ok(Some(CountryOutput {
            countryiso3: countryiso3.to_string(),
            geojson,
            bundle,
        }))
    }

    pub fn global(&self) -> &OutputBundle {
        &self.global
    }

    pub fn into_global(self) -> OutputBundle {
        self.global
    }
}

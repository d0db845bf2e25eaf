//! Harmonized export over the accumulated wide tables.
//!
//! Consumes the all-history wide tables of the global bundle (national,
//! level 1, area), classifies and pcode-matches each row's admin names,
//! resolves duplicates, and expands each surviving observation into one
//! record per populated phase. Every source observation appears in the
//! output, matched or not.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use ipc_core::{OutputBundle, parse_month_year};
use ipc_model::{CellValue, PHASES, PROJECTIONS, Phase, TableLevel, WideRow};
use ipc_standards::{AdminMatchingConfig, CountryTable};
use tracing::info;

use crate::classify::{MatchTarget, classify};
use crate::matcher::PcodeMatcher;
use crate::record::{HapiRecord, Observation, PhaseValue};

#[derive(Debug, Default)]
struct ResolvedAdmins {
    admin1_code: String,
    admin1_name: String,
    admin2_code: String,
    admin2_name: String,
    warnings: Vec<String>,
}

pub struct HapiResolver<'a> {
    config: &'a AdminMatchingConfig,
    countries: &'a CountryTable,
    matcher: &'a PcodeMatcher,
    country_status: BTreeMap<String, &'static str>,
}

impl<'a> HapiResolver<'a> {
    pub fn new(
        config: &'a AdminMatchingConfig,
        countries: &'a CountryTable,
        matcher: &'a PcodeMatcher,
    ) -> Self {
        Self {
            config,
            countries,
            matcher,
            country_status: BTreeMap::new(),
        }
    }

    /// Run the full harmonized stage over the accumulated global bundle.
    pub fn process(&mut self, global: &OutputBundle) -> Result<Vec<HapiRecord>> {
        let mut observations = Vec::new();
        for level in [TableLevel::National, TableLevel::Level1, TableLevel::Area] {
            for row in &global.history.get(level).rows_wide {
                self.observations_from_row(level, row, &mut observations)?;
            }
        }

        crate::dedupe::resolve_duplicates(&mut observations);

        for (countryiso3, status) in &self.country_status {
            info!("{countryiso3}: {status}");
        }

        Ok(observations
            .iter()
            .flat_map(|obs| self.expand(obs))
            .collect())
    }

    fn observations_from_row(
        &mut self,
        level: TableLevel,
        row: &WideRow,
        out: &mut Vec<Observation>,
    ) -> Result<()> {
        let countryiso3 = row
            .get("Country")
            .and_then(CellValue::as_str)
            .ok_or_else(|| anyhow!("wide row without Country column"))?
            .to_string();
        let date_of_analysis = row
            .get("Date of analysis")
            .and_then(CellValue::as_str)
            .ok_or_else(|| anyhow!("wide row without analysis date for {countryiso3}"))?;
        let date_of_analysis = parse_month_year(date_of_analysis)
            .with_context(|| format!("analysis date for {countryiso3}"))?;

        let level1 = row.get("Level 1").and_then(CellValue::as_str);
        let area = row.get("Area").and_then(CellValue::as_str);

        let (provider1, provider2, admin_level, target, mut warnings) =
            if level == TableLevel::National {
                (String::new(), String::new(), 0, MatchTarget::None, Vec::new())
            } else {
                let classification = classify(self.config, &countryiso3, level, level1, area);
                self.country_status
                    .insert(countryiso3.clone(), classification.status);
                (
                    classification.provider_admin1_name,
                    classification.provider_admin2_name,
                    classification.admin_level,
                    classification.target,
                    classification.warnings,
                )
            };

        let resolved = self.resolve_target(&countryiso3, &target);
        warnings.extend(resolved.warnings);

        for projection in PROJECTIONS {
            let label = projection.label();
            let lower = projection.label_lower();
            let period_start = row
                .get(&format!("{label} from"))
                .and_then(CellValue::as_str)
                .filter(|v| !v.is_empty());
            let period_end = row
                .get(&format!("{label} to"))
                .and_then(CellValue::as_str)
                .filter(|v| !v.is_empty());
            let (Some(period_start), Some(period_end)) = (period_start, period_end) else {
                continue;
            };

            let analyzed = row
                .get(&format!("Population analyzed {lower}"))
                .and_then(CellValue::as_f64);
            let mut phases = Vec::new();
            for phase in PHASES {
                let (population, fraction) = if phase == Phase::All {
                    (analyzed, Some(1.0))
                } else {
                    (
                        row.get(&format!("Phase {} number {lower}", phase.label()))
                            .and_then(CellValue::as_f64),
                        row.get(&format!("Phase {} percentage {lower}", phase.label()))
                            .and_then(CellValue::as_f64),
                    )
                };
                if let Some(population) = population {
                    phases.push(PhaseValue {
                        phase,
                        population,
                        fraction,
                    });
                }
            }
            if phases.is_empty() {
                continue;
            }

            out.push(Observation {
                countryiso3: countryiso3.clone(),
                date_of_analysis,
                admin_level,
                provider_admin1_name: provider1.clone(),
                provider_admin2_name: provider2.clone(),
                admin1_code: resolved.admin1_code.clone(),
                admin1_name: resolved.admin1_name.clone(),
                admin2_code: resolved.admin2_code.clone(),
                admin2_name: resolved.admin2_name.clone(),
                ipc_type: lower.to_string(),
                period_start: period_start.to_string(),
                period_end: period_end.to_string(),
                analyzed_population: analyzed,
                phases,
                warnings: warnings.clone(),
                errors: Vec::new(),
            });
        }
        Ok(())
    }

    fn resolve_target(&self, countryiso3: &str, target: &MatchTarget) -> ResolvedAdmins {
        let mut resolved = ResolvedAdmins::default();
        match target {
            MatchTarget::None => {}
            MatchTarget::Adm1 { name } => {
                self.resolve_adm1(countryiso3, name, &mut resolved);
            }
            MatchTarget::Adm2 { adm1_name, name } => {
                if let Some(adm1_name) = adm1_name {
                    self.resolve_adm1(countryiso3, adm1_name, &mut resolved);
                }
                self.resolve_adm2(countryiso3, adm1_name.as_deref(), name, &mut resolved);
            }
        }
        resolved
    }

    fn resolve_adm1(&self, countryiso3: &str, name: &str, resolved: &mut ResolvedAdmins) {
        let fullname = format!("{countryiso3}|{name}");
        if self.config.is_ignored_name(name) {
            resolved
                .warnings
                .push(format!("Admin 1: cannot match {fullname}"));
            return;
        }
        match self.matcher.match_name(countryiso3, 1, name, None) {
            None => {
                resolved
                    .warnings
                    .push(format!("Admin 1: could not match {fullname}!"));
            }
            Some(result) => {
                if !result.exact {
                    if self.config.adm1_errors.contains(name) {
                        resolved.warnings.push(format!(
                            "Admin 1: ignoring erroneous {fullname} match to {} {}!",
                            result.name, result.pcode
                        ));
                        return;
                    }
                    resolved.warnings.push(format!(
                        "Admin 1: matching {fullname} to {} {}",
                        result.name, result.pcode
                    ));
                }
                resolved.admin1_code = result.pcode;
                resolved.admin1_name = result.name;
            }
        }
    }

    fn resolve_adm2(
        &self,
        countryiso3: &str,
        adm1_name: Option<&str>,
        name: &str,
        resolved: &mut ResolvedAdmins,
    ) {
        let fullname = format!(
            "{countryiso3}|{}|{name}",
            adm1_name.unwrap_or("NOT GIVEN")
        );
        if self.config.is_ignored_name(name) {
            resolved
                .warnings
                .push(format!("Admin 2: cannot match {fullname}"));
            return;
        }
        let parent = if resolved.admin1_code.is_empty() {
            None
        } else {
            Some(resolved.admin1_code.as_str())
        };
        match self.matcher.match_name(countryiso3, 2, name, parent) {
            None => {
                resolved
                    .warnings
                    .push(format!("Admin 2: could not match {fullname}!"));
            }
            Some(result) => {
                if !result.exact {
                    if self.config.adm2_errors.contains(name) {
                        resolved.warnings.push(format!(
                            "Admin 2: ignoring erroneous {fullname} match to {} {}!",
                            result.name, result.pcode
                        ));
                        return;
                    }
                    resolved.warnings.push(format!(
                        "Admin 2: matching {fullname} to {} {}",
                        result.name, result.pcode
                    ));
                }
                resolved.admin2_code = result.pcode;
                resolved.admin2_name = result.name;
            }
        }
    }

    fn expand(&self, obs: &Observation) -> Vec<HapiRecord> {
        let warning = obs.warnings.join("|");
        let error = obs.errors.join("|");
        obs.phases
            .iter()
            .map(|value| HapiRecord {
                location_code: obs.countryiso3.clone(),
                has_hrp: self.countries.has_hrp(&obs.countryiso3),
                in_gho: self.countries.in_gho(&obs.countryiso3),
                provider_admin1_name: obs.provider_admin1_name.clone(),
                provider_admin2_name: obs.provider_admin2_name.clone(),
                admin1_code: obs.admin1_code.clone(),
                admin1_name: obs.admin1_name.clone(),
                admin2_code: obs.admin2_code.clone(),
                admin2_name: obs.admin2_name.clone(),
                admin_level: obs.admin_level,
                ipc_phase: value.phase.label().to_string(),
                ipc_type: obs.ipc_type.clone(),
                population_in_phase: value.population,
                population_fraction_in_phase: value.fraction,
                reference_period_start: obs.period_start.clone(),
                reference_period_end: obs.period_end.clone(),
                warning: warning.clone(),
                error: error.clone(),
            })
            .collect()
    }
}

//! Harmonized export record shapes.

use chrono::NaiveDate;
use ipc_model::{Phase, format_numeric};

/// One phase's values within an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseValue {
    pub phase: Phase,
    pub population: f64,
    pub fraction: Option<f64>,
}

/// One (location, projection) observation from the accumulated wide tables,
/// with its admin resolution applied. Duplicate resolution runs at this
/// granularity, before expansion into per-phase records.
#[derive(Debug, Clone)]
pub struct Observation {
    pub countryiso3: String,
    pub date_of_analysis: NaiveDate,
    pub admin_level: u8,
    pub provider_admin1_name: String,
    pub provider_admin2_name: String,
    pub admin1_code: String,
    pub admin1_name: String,
    pub admin2_code: String,
    pub admin2_name: String,
    /// Validity period label (`current`, `first projection`, ...).
    pub ipc_type: String,
    pub period_start: String,
    pub period_end: String,
    /// The analyzed ("all" phase) population, used as the duplicate
    /// tie-break proxy for the whole observation.
    pub analyzed_population: Option<f64>,
    pub phases: Vec<PhaseValue>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// One row of the harmonized global export.
#[derive(Debug, Clone, PartialEq)]
pub struct HapiRecord {
    pub location_code: String,
    pub has_hrp: bool,
    pub in_gho: bool,
    pub provider_admin1_name: String,
    pub provider_admin2_name: String,
    pub admin1_code: String,
    pub admin1_name: String,
    pub admin2_code: String,
    pub admin2_name: String,
    pub admin_level: u8,
    pub ipc_phase: String,
    pub ipc_type: String,
    pub population_in_phase: f64,
    pub population_fraction_in_phase: Option<f64>,
    pub reference_period_start: String,
    pub reference_period_end: String,
    pub warning: String,
    pub error: String,
}

fn flag(value: bool) -> &'static str {
    if value { "Y" } else { "N" }
}

impl HapiRecord {
    /// Cell values in the column order of
    /// [`ipc_standards::hapi_columns`].
    pub fn values(&self) -> Vec<String> {
        vec![
            self.location_code.clone(),
            flag(self.has_hrp).to_string(),
            flag(self.in_gho).to_string(),
            self.provider_admin1_name.clone(),
            self.provider_admin2_name.clone(),
            self.admin1_code.clone(),
            self.admin1_name.clone(),
            self.admin2_code.clone(),
            self.admin2_name.clone(),
            self.admin_level.to_string(),
            self.ipc_phase.clone(),
            self.ipc_type.clone(),
            format_numeric(self.population_in_phase),
            self.population_fraction_in_phase
                .map(format_numeric)
                .unwrap_or_default(),
            self.reference_period_start.clone(),
            self.reference_period_end.clone(),
            self.warning.clone(),
            self.error.clone(),
        ]
    }
}

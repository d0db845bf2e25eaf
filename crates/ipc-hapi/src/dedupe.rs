//! Duplicate observation resolution for the harmonized export.
//!
//! The same logical observation can be reported under multiple raw
//! analyses. Exactly one survives per key; losers stay in the stream with
//! an error annotation so the consumer can filter them.

use std::collections::BTreeMap;

use crate::record::Observation;

const EARLIER_DATE: &str = "duplicate row with earlier date of analysis excluded";
const LOWER_POPULATION: &str = "duplicate row with lower population analyzed excluded";
const ENCOUNTER_ORDER: &str = "duplicate row excluded";

type Key = (String, String, String, String, String, String, String);

fn key(obs: &Observation) -> Key {
    (
        obs.countryiso3.clone(),
        obs.admin1_code.clone(),
        obs.admin2_code.clone(),
        obs.provider_admin1_name.clone(),
        obs.provider_admin2_name.clone(),
        obs.ipc_type.clone(),
        obs.period_start.clone(),
    )
}

/// Mark all but one observation per key with an exclusion error.
///
/// Tie-break order: latest date of analysis, then highest analyzed
/// population, then first by encounter order (the last step is
/// implementation-defined; upstream ordering carries no documented
/// contract).
pub fn resolve_duplicates(observations: &mut [Observation]) {
    let mut groups: BTreeMap<Key, Vec<usize>> = BTreeMap::new();
    for (idx, obs) in observations.iter().enumerate() {
        groups.entry(key(obs)).or_default().push(idx);
    }

    for indices in groups.values() {
        if indices.len() < 2 {
            continue;
        }
        let Some(latest) = indices
            .iter()
            .map(|&i| observations[i].date_of_analysis)
            .max()
        else {
            continue;
        };
        let mut survivors = Vec::new();
        for &i in indices {
            if observations[i].date_of_analysis < latest {
                observations[i].errors.push(EARLIER_DATE.to_string());
            } else {
                survivors.push(i);
            }
        }
        if survivors.len() < 2 {
            continue;
        }

        let highest = survivors
            .iter()
            .map(|&i| observations[i].analyzed_population.unwrap_or(f64::NEG_INFINITY))
            .fold(f64::NEG_INFINITY, f64::max);
        let mut remaining = Vec::new();
        for &i in &survivors {
            let pop = observations[i].analyzed_population.unwrap_or(f64::NEG_INFINITY);
            if pop < highest {
                observations[i].errors.push(LOWER_POPULATION.to_string());
            } else {
                remaining.push(i);
            }
        }
        for &i in remaining.iter().skip(1) {
            observations[i].errors.push(ENCOUNTER_ORDER.to_string());
        }
    }
}

//! Run-to-run watermark state.
//!
//! A plain text file of `KEY=YYYY-MM-DD` lines: one watermark per country
//! ISO3 plus the `DEFAULT` cutoff and the running global `START_DATE` and
//! `END_DATE`. Round-trips exactly at day precision.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use chrono::NaiveDate;
use ipc_model::{IpcError, Result};

use crate::dates::DateWindow;

const DEFAULT_KEY: &str = "DEFAULT";
const START_DATE_KEY: &str = "START_DATE";
const END_DATE_KEY: &str = "END_DATE";

/// Cutoff applied to countries never seen before when the state file does
/// not carry one.
pub fn builtin_default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 1, 1).expect("valid built-in cutoff")
}

#[derive(Debug, Clone)]
pub struct PipelineState {
    default_cutoff: NaiveDate,
    countries: BTreeMap<String, NaiveDate>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            default_cutoff: builtin_default_cutoff(),
            countries: BTreeMap::new(),
            start_date: None,
            end_date: None,
        }
    }
}

impl PipelineState {
    /// Load state from `path`; a missing file yields the default state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let mut state = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| IpcError::StateParse {
                line: line.to_string(),
            })?;
            let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                IpcError::StateParse {
                    line: line.to_string(),
                }
            })?;
            match key.trim() {
                DEFAULT_KEY => state.default_cutoff = date,
                START_DATE_KEY => state.start_date = Some(date),
                END_DATE_KEY => state.end_date = Some(date),
                iso3 => {
                    state.countries.insert(iso3.to_string(), date);
                }
            }
        }
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut text = String::new();
        let _ = writeln!(text, "{DEFAULT_KEY}={}", self.default_cutoff);
        if let Some(start) = self.start_date {
            let _ = writeln!(text, "{START_DATE_KEY}={start}");
        }
        if let Some(end) = self.end_date {
            let _ = writeln!(text, "{END_DATE_KEY}={end}");
        }
        for (iso3, date) in &self.countries {
            let _ = writeln!(text, "{iso3}={date}");
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Cutoff a country's newest analysis must exceed to count as an update:
    /// the larger of its stored watermark and the default cutoff.
    pub fn cutoff_for(&self, countryiso3: &str) -> NaiveDate {
        self.countries
            .get(countryiso3)
            .copied()
            .map_or(self.default_cutoff, |watermark| {
                watermark.max(self.default_cutoff)
            })
    }

    pub fn country_date(&self, countryiso3: &str) -> Option<NaiveDate> {
        self.countries.get(countryiso3).copied()
    }

    /// Advance a country's watermark. Called unconditionally, update or not.
    pub fn set_country_date(&mut self, countryiso3: &str, date: NaiveDate) {
        self.countries.insert(countryiso3.to_string(), date);
    }

    /// Seed window for the global bundle: the persisted span, or the empty
    /// sentinel when this is the first run.
    pub fn window(&self) -> DateWindow {
        let mut window = DateWindow::default();
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            window.widen(start, end);
        }
        window
    }

    /// Persist a widened global window.
    pub fn record_window(&mut self, window: &DateWindow) {
        if window.is_empty() {
            return;
        }
        if self.start_date.is_none_or(|start| window.start < start) {
            self.start_date = Some(window.start);
        }
        if self.end_date.is_none_or(|end| window.end > end) {
            self.end_date = Some(window.end);
        }
    }
}

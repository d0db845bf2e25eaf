//! Run-scoped and process-wide row accumulators.

use std::path::PathBuf;

use ipc_model::TableLevel;

use crate::dates::DateWindow;
use crate::rows::RowSet;

/// The three tables of one temporal scope.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    pub country: RowSet,
    pub group: RowSet,
    pub area: RowSet,
}

impl TableSet {
    pub fn get(&self, level: TableLevel) -> &RowSet {
        match level {
            TableLevel::National => &self.country,
            TableLevel::Level1 => &self.group,
            TableLevel::Area => &self.area,
        }
    }

    pub fn extend(&mut self, other: TableSet) {
        self.country.extend(other.country);
        self.group.extend(other.group);
        self.area.extend(other.area);
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_empty() && self.group.is_empty() && self.area.is_empty()
    }
}

/// Six row-set tables in two temporal scopes plus the reference-period
/// window they span.
#[derive(Debug, Clone, Default)]
pub struct OutputBundle {
    /// Most recent qualifying analysis only.
    pub latest: TableSet,
    /// Full analysis history.
    pub history: TableSet,
    pub window: DateWindow,
}

impl OutputBundle {
    /// Fold a country's bundle into this accumulated one: tables extend,
    /// the window widens, nothing is replaced.
    pub fn merge(&mut self, partial: OutputBundle) {
        self.latest.extend(partial.latest);
        self.history.extend(partial.history);
        self.window.widen_with(&partial.window);
    }
}

/// Everything produced for one country in one run.
#[derive(Debug, Clone)]
pub struct CountryOutput {
    pub countryiso3: String,
    /// Boundary file for the latest qualifying analysis, when one exists.
    pub geojson: Option<PathBuf>,
    pub bundle: OutputBundle,
}

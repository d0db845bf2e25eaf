//! Flat output row shapes.
//!
//! Long rows have a fixed column set per table level, so they are a plain
//! struct. Wide rows have a data-dependent column set (only populated
//! projections contribute columns), so they are an insertion-ordered list of
//! named cells; a column is simply absent, not null, when unpopulated.

use std::fmt;

/// Render a float without a trailing `.0` when it is integral.
pub fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// One cell of a wide row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    pub fn from_opt_f64(value: Option<f64>) -> Self {
        match value {
            Some(v) => CellValue::Number(v),
            None => CellValue::Missing,
        }
    }

    pub fn from_opt_str(value: Option<&str>) -> Self {
        match value {
            Some(v) => CellValue::Text(v.to_string()),
            None => CellValue::Missing,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(v) => f.write_str(v),
            CellValue::Number(v) => f.write_str(&format_numeric(*v)),
            CellValue::Missing => Ok(()),
        }
    }
}

/// Granularity of an output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableLevel {
    National,
    Level1,
    Area,
}

impl TableLevel {
    /// Token used in output file names.
    pub fn file_token(self) -> &'static str {
        match self {
            TableLevel::National => "national",
            TableLevel::Level1 => "level1",
            TableLevel::Area => "area",
        }
    }

    /// Admin level of rows in this table.
    pub fn admin_level(self) -> u8 {
        match self {
            TableLevel::National => 0,
            TableLevel::Level1 => 1,
            TableLevel::Area => 2,
        }
    }
}

/// Fixed column order for a long table at the given level.
pub fn long_headers(level: TableLevel) -> Vec<&'static str> {
    let mut headers = vec!["Date of analysis", "Country", "Total country population"];
    match level {
        TableLevel::National => {}
        TableLevel::Level1 => headers.push("Level 1"),
        TableLevel::Area => {
            headers.push("Level 1");
            headers.push("Area");
        }
    }
    headers.extend(["Validity period", "From", "To", "Phase", "Number", "Percentage"]);
    headers
}

/// One (location, projection, phase) observation. Only exists when the
/// phase's population is present and the projection has a validity period.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub date_of_analysis: String,
    pub country: String,
    pub total_population: Option<f64>,
    pub level1: Option<String>,
    pub area: Option<String>,
    pub validity_period: String,
    pub from: String,
    pub to: String,
    pub phase: String,
    pub number: f64,
    pub percentage: Option<f64>,
}

impl LongRow {
    /// Cell values in the column order of [`long_headers`] for `level`.
    pub fn values(&self, level: TableLevel) -> Vec<String> {
        let mut values = vec![
            self.date_of_analysis.clone(),
            self.country.clone(),
            self.total_population.map(format_numeric).unwrap_or_default(),
        ];
        match level {
            TableLevel::National => {}
            TableLevel::Level1 => {
                values.push(self.level1.clone().unwrap_or_default());
            }
            TableLevel::Area => {
                values.push(self.level1.clone().unwrap_or_default());
                values.push(self.area.clone().unwrap_or_default());
            }
        }
        values.extend([
            self.validity_period.clone(),
            self.from.clone(),
            self.to.clone(),
            self.phase.clone(),
            format_numeric(self.number),
            self.percentage.map(format_numeric).unwrap_or_default(),
        ]);
        values
    }
}

/// One location's wide-form row: named cells in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideRow {
    cells: Vec<(String, CellValue)>,
}

impl WideRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any earlier value while keeping its original
    /// position.
    pub fn set(&mut self, name: impl Into<String>, value: CellValue) {
        let name = name.into();
        if let Some(slot) = self.cells.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.cells.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Render cells against an externally derived header list; columns the
    /// row does not carry render as empty.
    pub fn values(&self, headers: &[String]) -> Vec<String> {
        headers
            .iter()
            .map(|h| self.get(h).map(ToString::to_string).unwrap_or_default())
            .collect()
    }
}

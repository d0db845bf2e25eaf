//! Flattening of one location node into long and wide rows.
//!
//! A location (the analysis itself, a group, or an area) carries up to three
//! projection windows, each with per-phase population and percentage fields.
//! One call emits one long row per (projection, phase) that has both a
//! population value and a validity period, and exactly one wide row.

use ipc_model::{
    CellValue, LongRow, PHASES, PROJECTIONS, Phase, Record, Result, TableLevel, WideRow,
};

use crate::dates::{DateWindow, parse_date_range};

/// Identity columns shared by every row of one location.
#[derive(Debug, Clone)]
pub struct BaseRow {
    pub level: TableLevel,
    pub date_of_analysis: String,
    pub country: String,
    pub total_population: Option<f64>,
    pub level1: Option<String>,
    pub area: Option<String>,
}

impl BaseRow {
    /// National-level base row for an analysis.
    pub fn from_analysis(analysis: &Record, countryiso3: &str) -> Result<Self> {
        let date_of_analysis = analysis
            .require_str("analysis_date", &format!("analysis for {countryiso3}"))?
            .to_string();
        Ok(Self {
            level: TableLevel::National,
            date_of_analysis,
            country: countryiso3.to_string(),
            total_population: analysis.get_f64("population"),
            level1: None,
            area: None,
        })
    }

    /// Derive a level-1 base row with the given group name.
    pub fn for_group(&self, name: &str) -> Self {
        let mut row = self.clone();
        row.level = TableLevel::Level1;
        row.level1 = Some(name.to_string());
        row
    }

    /// Derive an area base row; `level1` is inherited from the parent (and
    /// stays explicitly null for areas attached directly to the analysis).
    pub fn for_area(&self, name: &str) -> Self {
        let mut row = self.clone();
        row.level = TableLevel::Area;
        row.area = Some(name.to_string());
        row
    }
}

/// Rows accumulated for one table.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub rows: Vec<LongRow>,
    pub rows_wide: Vec<WideRow>,
}

impl RowSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.rows_wide.is_empty()
    }

    pub fn extend(&mut self, other: RowSet) {
        self.rows.extend(other.rows);
        self.rows_wide.extend(other.rows_wide);
    }
}

fn wide_base(base: &BaseRow) -> WideRow {
    let mut wide = WideRow::new();
    wide.set(
        "Date of analysis",
        CellValue::Text(base.date_of_analysis.clone()),
    );
    wide.set("Country", CellValue::Text(base.country.clone()));
    wide.set(
        "Total country population",
        CellValue::from_opt_f64(base.total_population),
    );
    match base.level {
        TableLevel::National => {}
        TableLevel::Level1 => {
            wide.set("Level 1", CellValue::from_opt_str(base.level1.as_deref()));
        }
        TableLevel::Area => {
            wide.set("Level 1", CellValue::from_opt_str(base.level1.as_deref()));
            wide.set("Area", CellValue::from_opt_str(base.area.as_deref()));
        }
    }
    wide
}

/// Emit rows for one location.
///
/// `analysis` supplies the validity-period fallback for locations that do
/// not carry their own period fields (groups and areas). The synthesized
/// `all`-phase percentage is computed locally rather than written back into
/// the location record.
pub fn add_location_rows(
    base: &BaseRow,
    location: &Record,
    analysis: Option<&Record>,
    window: &mut DateWindow,
    out: &mut RowSet,
) -> Result<()> {
    let mut wide = wide_base(base);

    for projection in PROJECTIONS {
        let period_field = projection.period_field();
        let period = location
            .get_nonempty_str(&period_field)
            .or_else(|| analysis.and_then(|a| a.get_nonempty_str(&period_field)));
        let bounds = match period {
            Some(value) => {
                let (start, end) = parse_date_range(value, window)?;
                Some((start, end))
            }
            None => None,
        };

        let label = projection.label();
        let lower = projection.label_lower();
        // Wide columns are absent, not null, when unpopulated; only
        // projections with data contribute columns to a row.
        if let Some((start, end)) = &bounds {
            wide.set(format!("{label} from"), CellValue::Text(start.clone()));
            wide.set(format!("{label} to"), CellValue::Text(end.clone()));
        }

        let suffix = projection.suffix();
        for phase in PHASES {
            let number = location.get_f64(&phase.population_field(suffix));
            let percentage = if phase == Phase::All {
                Some(1.0)
            } else {
                location.get_f64(&phase.percentage_field(suffix))
            };

            if phase == Phase::All {
                if let Some(number) = number {
                    wide.set(
                        format!("Population analyzed {lower}"),
                        CellValue::Number(number),
                    );
                }
            } else {
                if let Some(number) = number {
                    wide.set(
                        format!("Phase {} number {lower}", phase.label()),
                        CellValue::Number(number),
                    );
                }
                if let Some(percentage) = percentage {
                    wide.set(
                        format!("Phase {} percentage {lower}", phase.label()),
                        CellValue::Number(percentage),
                    );
                }
            }

            if let (Some(number), Some((start, end))) = (number, &bounds) {
                out.rows.push(LongRow {
                    date_of_analysis: base.date_of_analysis.clone(),
                    country: base.country.clone(),
                    total_population: base.total_population,
                    level1: base.level1.clone(),
                    area: base.area.clone(),
                    validity_period: lower.to_string(),
                    from: start.clone(),
                    to: end.clone(),
                    phase: phase.label().to_string(),
                    number,
                    percentage,
                });
            }
        }
    }

    out.rows_wide.push(wide);
    Ok(())
}

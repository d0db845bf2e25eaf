//! Month-year date parsing and the shared reference-period window.

use chrono::{Days, Months, NaiveDate};
use ipc_model::{IpcError, Result};

/// Running min/max over every validity period seen. Starts inverted so the
/// first widen sets the real bounds; widening never narrows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::MAX,
            end: NaiveDate::MIN,
        }
    }
}

impl DateWindow {
    /// True until at least one period has been recorded.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn widen(&mut self, start: NaiveDate, end: NaiveDate) {
        if start < self.start {
            self.start = start;
        }
        if end > self.end {
            self.end = end;
        }
    }

    pub fn widen_with(&mut self, other: &DateWindow) {
        if !other.is_empty() {
            self.widen(other.start, other.end);
        }
    }
}

/// Parse a `"Mon YYYY"` token to the first day of that month.
pub fn parse_month_year(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01 {}", value.trim()), "%d %b %Y").map_err(|_| {
        IpcError::DateParse {
            value: value.to_string(),
        }
    })
}

/// Last calendar day of the month `date` falls in.
pub fn end_of_month(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .ok_or_else(|| IpcError::DateParse {
            value: date.to_string(),
        })
}

/// Parse a `"Mon YYYY - Mon YYYY"` validity period.
///
/// The end bound denotes an inclusive month and is normalized to its last
/// calendar day. Both bounds widen the shared window; the returned strings
/// are ISO dates.
pub fn parse_date_range(value: &str, window: &mut DateWindow) -> Result<(String, String)> {
    let (start_token, end_token) = value.split_once(" - ").ok_or_else(|| {
        IpcError::DateRangeParse {
            value: value.to_string(),
        }
    })?;
    let start = parse_month_year(start_token)?;
    let end = end_of_month(parse_month_year(end_token)?)?;
    window.widen(start, end);
    Ok((start.to_string(), end.to_string()))
}

//! Optional-field accessor over a decoded feed record.
//!
//! Feed records have a genuinely variable shape: per-phase and per-projection
//! fields appear and disappear from record to record, and a present field may
//! still hold JSON null. Both read as `None` through the typed accessors, but
//! `has_field`/`raw` keep the present-but-null distinction observable where
//! it matters (a null `areas` array is malformed upstream data, an absent one
//! is not).

use serde_json::{Map, Value};

use crate::error::{IpcError, Result};

/// An immutable view over one JSON object from the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a decoded value, failing when it is not an object.
    pub fn from_value(value: &Value, context: &str) -> Result<Self> {
        match value.as_object() {
            Some(map) => Ok(Self::new(map.clone())),
            None => Err(IpcError::missing_field("<object>", context)),
        }
    }

    /// Whether the field exists at all, null or not.
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Raw value including JSON null; `None` only when absent.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Value with absent and null collapsed to `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Non-empty string value; empty strings read as absent, matching the
    /// feed's habit of sending `""` for unset period fields.
    pub fn get_nonempty_str(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|s| !s.is_empty())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Required string field; absence indicates a feed schema change and is
    /// propagated as an error.
    pub fn require_str(&self, key: &str, context: &str) -> Result<&str> {
        self.get_str(key)
            .ok_or_else(|| IpcError::missing_field(key, context))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(&value, "test").unwrap()
    }

    #[test]
    fn absent_and_null_both_read_as_none() {
        let rec = record(json!({"a": null, "b": 3}));
        assert_eq!(rec.get_f64("a"), None);
        assert_eq!(rec.get_f64("missing"), None);
        assert_eq!(rec.get_f64("b"), Some(3.0));
    }

    #[test]
    fn present_but_null_stays_observable() {
        let rec = record(json!({"areas": null}));
        assert!(rec.has_field("areas"));
        assert!(rec.raw("areas").is_some_and(Value::is_null));
        assert!(!rec.has_field("groups"));
    }

    #[test]
    fn empty_period_string_reads_as_absent() {
        let rec = record(json!({"current_period_dates": ""}));
        assert_eq!(rec.get_nonempty_str("current_period_dates"), None);
    }

    #[test]
    fn require_str_reports_field_and_context() {
        let rec = record(json!({}));
        let err = rec.require_str("analysis_date", "analysis AFG").unwrap_err();
        assert!(err.to_string().contains("analysis_date"));
    }
}

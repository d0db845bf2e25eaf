//! Contract with the feed retrieval collaborator.
//!
//! Retrieval, caching, and authentication live behind this trait; the core
//! assumes failures propagate (no retries here) and makes no attempt to
//! interpret transport errors.

use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value;

pub trait AnalysisSource {
    /// All current analyses across countries, used for country discovery.
    fn analyses_overview(&self) -> Result<Vec<Value>>;

    /// Full analysis history for one country (ISO2 key), newest first.
    fn country_analyses(&self, countryiso2: &str) -> Result<Vec<Value>>;

    /// Fetch the boundary GeoJSON for an analysis and return its local path.
    fn boundary_file(
        &self,
        analysis_id: i64,
        year: i32,
        countryiso2: &str,
        filename: &str,
    ) -> Result<PathBuf>;
}

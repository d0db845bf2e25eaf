//! Runtime pipeline configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default feed endpoint.
const DEFAULT_BASE_URL: &str = "https://api.ipcinfo.org";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Feed API base URL.
    pub base_url: String,
    /// Admin unit reference CSV for pcode matching. When unset the
    /// harmonized export runs with empty admin codes.
    pub admin_units: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            admin_units: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }
}

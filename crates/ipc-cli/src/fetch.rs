//! Feed client: HTTP retrieval with save/use-saved caching.
//!
//! Network and decode failures propagate; retry policy is left to the
//! operator rerunning the pipeline. With `--use-saved` no network access
//! happens at all, which is also how the tests drive the full pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use ipc_core::AnalysisSource;
use serde_json::Value;
use tracing::debug;

use crate::config::PipelineConfig;

/// Environment variable holding the optional feed API key.
const API_KEY_ENV: &str = "IPC_KEY";

const USER_AGENT_VALUE: &str = concat!("ipc-pipeline/", env!("CARGO_PKG_VERSION"));

pub struct IpcClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
    saved_dir: PathBuf,
    download_dir: PathBuf,
    save: bool,
    use_saved: bool,
}

impl IpcClient {
    pub fn new(
        config: &PipelineConfig,
        saved_dir: &Path,
        download_dir: &Path,
        save: bool,
        use_saved: bool,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .context("build HTTP client")?;
        if save {
            std::fs::create_dir_all(saved_dir)
                .with_context(|| format!("create {}", saved_dir.display()))?;
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: std::env::var(API_KEY_ENV).ok(),
            client,
            saved_dir: saved_dir.to_path_buf(),
            download_dir: download_dir.to_path_buf(),
            save,
            use_saved,
        })
    }

    fn get_json(&self, path_and_query: &str, cache_name: &str) -> Result<Value> {
        let cache_path = self.saved_dir.join(cache_name);
        if self.use_saved {
            debug!("reading saved {}", cache_path.display());
            let text = std::fs::read_to_string(&cache_path)
                .with_context(|| format!("read saved {}", cache_path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("decode saved {}", cache_path.display()));
        }
        let url = format!("{}{path_and_query}", self.base_url);
        debug!("fetching {url}");
        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }
        let value: Value = request
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .with_context(|| format!("fetch {url}"))?
            .json()
            .with_context(|| format!("decode {url}"))?;
        if self.save {
            let text = serde_json::to_string_pretty(&value)?;
            std::fs::write(&cache_path, text)
                .with_context(|| format!("save {}", cache_path.display()))?;
        }
        Ok(value)
    }

    fn get_file(&self, path_and_query: &str, filename: &str) -> Result<PathBuf> {
        let cache_path = self.saved_dir.join(filename);
        if self.use_saved {
            if !cache_path.exists() {
                return Err(anyhow!("no saved copy of {filename}"));
            }
            return Ok(cache_path);
        }
        let url = format!("{}{path_and_query}", self.base_url);
        debug!("fetching {url}");
        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }
        let bytes = request
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .with_context(|| format!("fetch {url}"))?
            .bytes()
            .with_context(|| format!("read {url}"))?;
        let path = self.download_dir.join(filename);
        std::fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
        if self.save {
            std::fs::write(&cache_path, &bytes)
                .with_context(|| format!("save {}", cache_path.display()))?;
        }
        Ok(path)
    }
}

fn as_array(value: Value, what: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        _ => Err(anyhow!("{what}: expected a JSON array")),
    }
}

impl AnalysisSource for IpcClient {
    fn analyses_overview(&self) -> Result<Vec<Value>> {
        let value = self.get_json("/analyses?type=A", "analyses.json")?;
        as_array(value, "analyses overview")
    }

    fn country_analyses(&self, countryiso2: &str) -> Result<Vec<Value>> {
        let value = self.get_json(
            &format!("/population?country={countryiso2}"),
            &format!("population_{countryiso2}.json"),
        )?;
        as_array(value, "country analyses")
    }

    fn boundary_file(
        &self,
        analysis_id: i64,
        year: i32,
        countryiso2: &str,
        filename: &str,
    ) -> Result<PathBuf> {
        self.get_file(
            &format!(
                "/areas/{analysis_id}/P?country={countryiso2}&year={year}&type=A&format=geojson"
            ),
            filename,
        )
    }
}

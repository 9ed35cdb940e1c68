// src/config/app.rs
use std::{env, path::PathBuf, time::Duration};

use anyhow::{Context, Result};

use crate::analyze::weights::{HotReloadScoring, DEFAULT_SCORING_PATH};

pub const ENV_METRICS_BASE_URL: &str = "VALIDSCOPE_METRICS_BASE_URL";
pub const ENV_SCORING_PATH: &str = "VALIDSCOPE_SCORING_PATH";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "VALIDSCOPE_HTTP_TIMEOUT_SECS";

pub const DEFAULT_METRICS_BASE_URL: &str = "http://127.0.0.1:8080/data";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Metric tables live at `{base}/{slug}.csv`.
    pub metrics_base_url: String,
    pub scoring_path: PathBuf,
    /// `None` keeps the transport default.
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            metrics_base_url: DEFAULT_METRICS_BASE_URL.to_string(),
            scoring_path: PathBuf::from(DEFAULT_SCORING_PATH),
            http_timeout: None,
        }
    }
}

impl AppConfig {
    /// Read from the environment; unset or blank variables keep defaults.
    pub fn from_env() -> Self {
        let d = Self::default();
        let var = |k: &str| env::var(k).ok().filter(|v| !v.trim().is_empty());

        let http_timeout = var(ENV_HTTP_TIMEOUT_SECS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|s| *s > 0)
            .map(Duration::from_secs);

        Self {
            metrics_base_url: var(ENV_METRICS_BASE_URL)
                .map(|v| v.trim().to_string())
                .unwrap_or(d.metrics_base_url),
            scoring_path: var(ENV_SCORING_PATH)
                .map(PathBuf::from)
                .unwrap_or(d.scoring_path),
            http_timeout,
        }
    }

    /// Scoring constants backed by `scoring_path`, shared by server and CLI.
    pub fn scoring(&self) -> HotReloadScoring {
        HotReloadScoring::new(Some(self.scoring_path.as_path()))
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut b = reqwest::Client::builder();
        if let Some(t) = self.http_timeout {
            b = b.timeout(t);
        }
        b.build().context("building metrics http client")
    }
}

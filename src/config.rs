use crate::api::ESPN_CORE_API_BASE;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, loaded from the environment (and `.env`) and then
/// overridden by command line flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub output_dir: PathBuf,
    pub http_timeout: Duration,
}

impl Config {
    /// Load from `ESPN_API_BASE_URL`, `REPORT_OUTPUT_DIR` and `HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = lookup("ESPN_API_BASE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| ESPN_CORE_API_BASE.to_string());

        let output_dir = lookup("REPORT_OUTPUT_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_output_dir);

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be whole seconds, got {raw:?}"))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        if http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            api_base_url,
            output_dir,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

/// The Desktop if there is one, else the home directory, else `.`
pub fn default_output_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

//! Runtime configuration.
//!
//! The data directory is chosen by the caller. Inside it, an optional
//! `config.toml` tunes the webhook timeout and the default log filter:
//!
//! ```toml
//! webhook_timeout_secs = 10
//! log_filter = "docket=debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{DocketError, DocketResult};

/// Name of the optional config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default tracing filter when neither `RUST_LOG` nor the config file sets one.
pub const DEFAULT_LOG_FILTER: &str = "docket=info,docket_core=info,docket_db=warn";

const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    webhook_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub webhook_timeout: Duration,
    pub log_filter: String,
    /// Endpoint that takes precedence over the stored webhook URL.
    pub webhook_url_override: Option<String>,
}

impl Config {
    /// Defaults for `data_dir`, without reading anything from disk.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            webhook_timeout: Duration::from_secs(DEFAULT_WEBHOOK_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            webhook_url_override: None,
        }
    }

    /// Defaults for `data_dir`, overlaid with `config.toml` when present.
    pub fn load(data_dir: impl Into<PathBuf>) -> DocketResult<Self> {
        let mut config = Self::new(data_dir);
        let path = config.config_path();

        if !path.exists() {
            return Ok(config);
        }

        let raw = std::fs::read_to_string(&path)?;
        let file: FileConfig = toml::from_str(&raw)
            .map_err(|e| DocketError::Config(format!("{}: {e}", path.display())))?;

        if let Some(secs) = file.webhook_timeout_secs {
            if secs == 0 {
                return Err(DocketError::Config(format!(
                    "{}: webhook_timeout_secs must be greater than zero",
                    path.display()
                )));
            }
            config.webhook_timeout = Duration::from_secs(secs);
        }
        if let Some(filter) = file.log_filter.filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        debug!(path = %path.display(), "Config file loaded");
        Ok(config)
    }

    /// Set the webhook override; blank values are ignored.
    pub fn with_webhook_override(mut self, url: Option<String>) -> Self {
        self.webhook_url_override = url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

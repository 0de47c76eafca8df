//! Run configuration.
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags, an optional YAML file passed with `--config`, and built-in defaults.
//!
//! ```yaml
//! base_url: http://xml.zeit.de/
//! issues:
//!   - 2019/49
//!   - 2019/51
//! ```

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::scrapers::zeit::{DEFAULT_BASE_URL, DEFAULT_ISSUES};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Contents of the optional YAML config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub issues: Vec<String>,
}

impl FileConfig {
    pub fn from_yaml(path: &str, yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|source| Error::ConfigFormat {
            path: path.to_string(),
            source,
        })
    }

    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::Config {
                path: path.to_string(),
                source,
            })?;
        let config = Self::from_yaml(path, &yaml)?;
        debug!(?config, "Loaded config file");
        Ok(config)
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Endpoint the issue key and `/index` are appended to. Always ends in `/`.
    pub base_url: String,
    pub issues: Vec<String>,
}

impl Settings {
    /// Merge CLI flags over the file config over the defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let mut base_url = cli
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Url::parse(&base_url).map_err(|source| Error::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let issues = if !cli.issues.is_empty() {
            cli.issues.clone()
        } else if !file.issues.is_empty() {
            file.issues
        } else {
            DEFAULT_ISSUES.iter().map(|s| s.to_string()).collect()
        };

        Ok(Self { base_url, issues })
    }
}

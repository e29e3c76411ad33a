//! TOML configuration for the harvester.
//!
//! ```toml
//! [overpass]
//! mirrors = ["https://z.overpass-api.de/api/"]
//! timeout_secs = 360
//! user_agent = "cragscout/0.1"
//!
//! [output]
//! dir = "data/climbing_facilities"
//! ```
//!
//! Every key is optional.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::geojson::DEFAULT_DIR;
use crate::overpass::{
    Mirror, TransportConfig, DEFAULT_MIRRORS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub overpass: OverpassSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OverpassSettings {
    /// Mirror base URLs in priority order
    pub mirrors: Vec<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for OverpassSettings {
    fn default() -> Self {
        Self {
            mirrors: DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OverpassSettings {
    pub fn mirrors(&self) -> Result<Vec<Mirror>> {
        Mirror::parse_all(&self.mirrors).context("Invalid mirror in config")
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_user_agent(self.user_agent.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }
}

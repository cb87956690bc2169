use crate::external::monitors::MonitorConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Key in the `[controllers]` table applying to every monitor without its own entry
pub const DEFAULT_POLICY_KEY: &str = "default";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum running time of commands issued after startup
    pub command_timeout_secs: Option<u64>,
    /// Monitor name (or [DEFAULT_POLICY_KEY]) to controller policy
    pub controllers: HashMap<String, String>,
    pub monitors: Vec<MonitorConfig>,
}

impl Config {
    pub fn parse(contents: &str) -> Result<Config> {
        toml::from_str(contents).context("Couldn't parse configuration")
    }

    pub fn load(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Couldn't read configuration from {}", path.display()))?;
        Self::parse(&contents)
    }

    /// Load the configuration from the default location, if there's any.
    pub fn load_default() -> Result<Config> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                log::info!("No configuration file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lumiere").join("config.toml"))
}

// src/e_config.rs

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the current directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fake-emb.toml";
/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FAKE_EMB_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window class of the engine's runtime window. The editor uses it too.
    pub target_class: String,
    /// Space kept free above the game inside the dock (also taken off its height).
    pub dock_height_offset: i32,
    /// Height of a native title bar, subtracted from the startup size hint.
    pub titlebar_offset: i32,
    pub tick_interval_ms: u64,
    /// Minimum gap between process-table scans while `follow` waits for a game.
    pub rescan_interval_ms: u64,
    pub verbose: bool,
    /// Process name that means "a scene is playing" for the command-line host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_process: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_class: "Engine".to_string(),
            dock_height_offset: 50,
            titlebar_offset: 25,
            tick_interval_ms: 100,
            rescan_interval_ms: 1000,
            verbose: false,
            game_process: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("parsing config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// `explicit`, then `$FAKE_EMB_CONFIG`, then `./fake-emb.toml`, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit) {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(from_env) = env::var(CONFIG_ENV) {
            if !from_env.is_empty() {
                return Some(PathBuf::from(from_env));
            }
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_class.trim().is_empty() {
            bail!("target_class must not be empty");
        }
        if self.dock_height_offset < 0 || self.titlebar_offset < 0 {
            bail!("offsets must not be negative");
        }
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be at least 1");
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing config")
    }
}

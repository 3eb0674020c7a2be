use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::keybindings::KeybindingsConfig;
use crate::utils::paths::get_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Payment page to show instead of the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    #[serde(default)]
    pub notification: NotificationConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    #[serde(default = "default_message")]
    pub message: String,

    /// Copying the value that is already marked as copied shows the banner again.
    #[serde(default = "default_rearm_on_repeat")]
    pub rearm_on_repeat: bool,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_duration_ms() -> u64 {
    3000
}

fn default_message() -> String {
    "Copied to clipboard!".to_string()
}

fn default_rearm_on_repeat() -> bool {
    true
}

impl NotificationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            message: default_message(),
            rearm_on_repeat: default_rearm_on_repeat(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            data_file: None,
            notification: NotificationConfig::default(),
            keybindings: KeybindingsConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

        config.keybindings = config.keybindings.merge_with_defaults();

        Ok(config)
    }
}

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON or CSV file with the rows; the sample dataset when unset
    pub data_path: Option<String>,
    /// Event polling interval in milliseconds
    pub tick_rate_ms: u64,
    /// Prefix shown before every amount
    pub currency_symbol: String,
    /// Log file location; `~/.data-table/data-table.log` when unset
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            tick_rate_ms: 100,
            currency_symbol: "₹".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".data-table"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        Self::from_json(&contents)
    }

    fn from_json(contents: &str) -> Option<Config> {
        serde_json::from_str(contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(config_path)
    }

    /// Resolved log file path
    pub fn log_path(&self) -> PathBuf {
        match &self.log_file {
            Some(path) => PathBuf::from(path),
            None => Self::config_dir()
                .unwrap_or_else(env::temp_dir)
                .join("data-table.log"),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};

use crate::nav::Section;

const DEFAULT_CHAT_REPLY_DELAY_MS: u64 = 1500;
const DEFAULT_ANALYSIS_DELAY_MS: u64 = 3000;
const DEFAULT_TICK_RATE_MS: u64 = 300;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub chat_reply_delay_ms: Option<u64>,
    pub analysis_delay_ms: Option<u64>,
    pub tick_rate_ms: Option<u64>,
    pub start_section: Option<String>,
    pub log_level: Option<String>,
    pub user_name: Option<String>,
    pub plan: Option<String>,
}

impl Config {
    /// Config with every default spelled out, as written by `--write-config`
    pub fn new() -> Self {
        Self {
            chat_reply_delay_ms: Some(DEFAULT_CHAT_REPLY_DELAY_MS),
            analysis_delay_ms: Some(DEFAULT_ANALYSIS_DELAY_MS),
            tick_rate_ms: Some(DEFAULT_TICK_RATE_MS),
            start_section: Some(Section::Dashboard.id().to_string()),
            log_level: Some("info".to_string()),
            user_name: Some("John Analyst".to_string()),
            plan: Some("Premium Plan".to_string()),
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    /// Like [`Config::load_from`], but an unreadable file yields the defaults.
    /// The error comes back so it can be logged once logging is up.
    pub fn load_or_default(config_path: &Path) -> (Self, Option<anyhow::Error>) {
        match Self::load_from(config_path) {
            Ok(config) => (config, None),
            Err(e) => (Self::new(), Some(e)),
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("onelens").join("config.json"))
    }

    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms.unwrap_or(DEFAULT_CHAT_REPLY_DELAY_MS))
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms.unwrap_or(DEFAULT_ANALYSIS_DELAY_MS))
    }

    pub fn tick_rate(&self) -> Duration {
        // A zero interval would panic in tokio
        Duration::from_millis(self.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS).max(1))
    }

    /// Unknown section ids fall back to the dashboard
    pub fn start_section(&self) -> Section {
        self.start_section
            .as_deref()
            .and_then(Section::from_id)
            .unwrap_or(Section::Dashboard)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("John Analyst")
    }

    pub fn plan(&self) -> &str {
        self.plan.as_deref().unwrap_or("Premium Plan")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.chat_reply_delay(), Duration::from_millis(1500));
        assert_eq!(config.analysis_delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "analysis_delay_ms": 10, "start_section": "demand" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.analysis_delay(), Duration::from_millis(10));
        assert_eq!(config.chat_reply_delay(), Duration::from_millis(1500));
        assert_eq!(config.start_section(), Section::Demand);
        assert_eq!(config.user_name(), "John Analyst");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::new();
        config.user_name = Some("Ada".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ chat_reply_delay_ms: ").unwrap();

        let (config, error) = Config::load_or_default(&path);
        assert_eq!(config, Config::new());
        assert!(error.is_some());

        fs::write(&path, r#"{ "plan": "Team Plan" }"#).unwrap();
        let (config, error) = Config::load_or_default(&path);
        assert!(error.is_none());
        assert_eq!(config.plan(), "Team Plan");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config {
            start_section: Some("monitoring".to_string()),
            tick_rate_ms: Some(0),
            ..Config::default()
        };
        assert_eq!(config.start_section(), Section::Dashboard);
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
    }
}

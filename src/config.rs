use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::data::classify::DEFAULT_GROWTH_THRESHOLD;
use crate::data::google::GoogleTrendsOptions;
use crate::data::model::WINDOW_CHOICES;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "TREND_PULSE_CONFIG";
/// Looked up in the working directory when the variable is unset.
pub const CONFIG_FILE_NAME: &str = "trend-pulse.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Runtime settings. Every key is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search term tracked across states.
    pub keyword: String,
    pub language: String,
    pub tz_offset_minutes: i32,
    pub default_window_days: u32,
    pub cache_ttl_secs: u64,
    pub growth_threshold: f64,
    /// Points averaged by the chart overlay.
    pub rolling_window: usize,
    /// Pause between per-state requests.
    pub request_delay_ms: u64,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyword: "mosquito".to_string(),
            language: "en-US".to_string(),
            tz_offset_minutes: 330,
            default_window_days: 30,
            cache_ttl_secs: 3600,
            growth_threshold: DEFAULT_GROWTH_THRESHOLD,
            rolling_window: 5,
            request_delay_ms: 50,
            connect_timeout_secs: 10,
            read_timeout_secs: 25,
        }
    }
}

impl Config {
    /// Resolve the config path and load it, falling back to defaults when absent.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keyword.trim().is_empty() {
            return Err(ConfigError::Invalid("keyword must not be empty".into()));
        }
        if !WINDOW_CHOICES.contains(&self.default_window_days) {
            return Err(ConfigError::Invalid(format!(
                "default_window_days must be one of {WINDOW_CHOICES:?}, got {}",
                self.default_window_days
            )));
        }
        if self.rolling_window == 0 {
            return Err(ConfigError::Invalid("rolling_window must be at least 1".into()));
        }
        if self.growth_threshold.is_nan() || self.growth_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "growth_threshold must be non-negative, got {}",
                self.growth_threshold
            )));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn google_options(&self) -> GoogleTrendsOptions {
        GoogleTrendsOptions {
            language: self.language.clone(),
            tz_offset_minutes: self.tz_offset_minutes,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn partial_file_overrides_some_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "keyword = \"dengue\"\ndefault_window_days = 60\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.keyword, "dengue");
        assert_eq!(config.default_window_days, 60);
        assert_eq!(config.tz_offset_minutes, 330);
    }

    #[test]
    fn rejects_unsupported_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "default_window_days = 45\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "keyword = ").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseToml { .. })
        ));
    }

    #[test]
    fn rejects_negative_threshold_and_zero_window() {
        let config = Config {
            growth_threshold: -0.1,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        let config = Config {
            rolling_window: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}

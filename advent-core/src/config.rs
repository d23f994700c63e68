use crate::constants::{
    DEFAULT_CONTENT_DOCUMENT, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_STORAGE_KEY,
    DEFAULT_UNLOCK_HOUR,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unlock hour {0} is not a valid hour of the day")]
    UnlockHour(u32),
    #[error("refresh interval must be at least one second")]
    RefreshInterval,
}

/// Tunables for a calendar instance. Every field falls back to its default
/// when absent from the JSON source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub unlock_hour: u32,
    pub storage_key: String,
    pub content_document: String,
    pub refresh_interval_secs: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            unlock_hour: DEFAULT_UNLOCK_HOUR,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            content_document: DEFAULT_CONTENT_DOCUMENT.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl CalendarConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns an error if the unlock hour is not in `0..24` or the refresh
    /// interval is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.unlock_hour >= 24 {
            return Err(ConfigError::UnlockHour(self.unlock_hour));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::RefreshInterval);
        }
        Ok(())
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_interval_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = CalendarConfig::from_json("{}").unwrap();
        assert_eq!(cfg, CalendarConfig::default());
        assert_eq!(cfg.unlock_hour, 6);
        assert_eq!(cfg.storage_key, "advent.revealed");
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(60));
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let cfg = CalendarConfig::from_json(r#"{ "unlock_hour": 9 }"#).unwrap();
        assert_eq!(cfg.unlock_hour, 9);
        assert_eq!(cfg.content_document, "questions.json");
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            CalendarConfig::from_json(r#"{ "unlock_hour": 24 }"#),
            Err(ConfigError::UnlockHour(24))
        ));
        assert!(matches!(
            CalendarConfig::from_json(r#"{ "refresh_interval_secs": 0 }"#),
            Err(ConfigError::RefreshInterval)
        ));
        assert!(matches!(
            CalendarConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}

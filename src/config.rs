//! Client configuration
//!
//! Loaded from a TOML file; every section is optional and falls back to
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ClientError, Result};
use crate::leveling::LevelThresholds;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub leveling: LevelingConfig,
    #[serde(default)]
    pub engagement: EngagementDefaults,
    #[serde(default)]
    pub views: ViewSettings,
}

/// Remote API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the signed-in user
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelingConfig {
    #[serde(default)]
    pub thresholds: LevelThresholds,
}

/// Fixed payload sent when the user starts a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementDefaults {
    #[serde(default = "default_score_increment")]
    pub score_increment: u64,
    #[serde(default = "default_time_spent")]
    pub time_spent_minutes: u64,
}

impl Default for EngagementDefaults {
    fn default() -> Self {
        Self {
            score_increment: default_score_increment(),
            time_spent_minutes: default_time_spent(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Recommended courses shown on the dashboard
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
    /// Records shown in the progress view's activity list
    #[serde(default = "default_recent_activity_limit")]
    pub recent_activity_limit: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            recommendation_limit: default_recommendation_limit(),
            recent_activity_limit: default_recent_activity_limit(),
        }
    }
}

// Defaults
fn default_base_url() -> String { "http://localhost:5000/api".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_score_increment() -> u64 { 10 }
fn default_time_spent() -> u64 { 30 }
fn default_recommendation_limit() -> usize { 3 }
fn default_recent_activity_limit() -> usize { 10 }

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ClientError::Config("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ClientError::Config("api.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.engagement.score_increment, 10);
        assert_eq!(config.engagement.time_spent_minutes, 30);
        assert_eq!(config.leveling.thresholds.as_slice(), &[0, 100, 500, 1000, 2500, 5000, 10000, 25000]);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://careerpath.example.com/api"
            token = "abc"

            [leveling]
            thresholds = [0, 50, 200]

            [views]
            recommendation_limit = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://careerpath.example.com/api");
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.leveling.thresholds.max_level(), 3);
        assert_eq!(config.views.recommendation_limit, 6);
        assert_eq!(config.views.recent_activity_limit, 10);
    }

    #[test]
    fn test_bad_thresholds_rejected() {
        let err = AppConfig::from_toml("[leveling]\nthresholds = [0, 100, 50]").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(AppConfig::from_toml("[api]\ntimeout_secs = 0").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("careerpath.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("careerpath.toml");
        std::fs::write(&path, "[engagement]\nscore_increment = 25\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.engagement.score_increment, 25);
        assert_eq!(config.engagement.time_spent_minutes, 30);
    }
}

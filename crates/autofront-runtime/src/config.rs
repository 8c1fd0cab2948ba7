//! Configuration for autofront-runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Directory name used under the platform data dir.
pub const APP_DIR_NAME: &str = "automation-front";

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Session persistence
    #[serde(default)]
    pub session: SessionConfig,

    /// Outbound sinks
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// Event tracking
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Determinism configuration
    #[serde(default)]
    pub determinism: DeterminismConfig,
}

impl RuntimeConfig {
    /// Load from a YAML file. JSON is valid YAML, but `.json` files go
    /// through serde_json for better error messages.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Self::from_yaml(&content),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Where the file-backed session store lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding one file per storage key
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl SessionConfig {
    /// Configured directory, or `<data dir>/automation-front`.
    ///
    /// Falls back to the working directory when the platform has no data dir.
    pub fn resolved_directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME),
        }
    }
}

/// Outbound submission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Lead capture form endpoint
    #[serde(default)]
    pub email_capture: SinkConfig,

    /// Workflow automation webhook
    #[serde(default)]
    pub webhook: SinkConfig,

    /// Recommendations included in the webhook payload
    #[serde(default = "default_webhook_recommendations")]
    pub webhook_recommendations: usize,
}

fn default_webhook_recommendations() -> usize {
    3
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            email_capture: SinkConfig::default(),
            webhook: SinkConfig::default(),
            webhook_recommendations: 3,
        }
    }
}

/// One outbound HTTP sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// URL the payload is POSTed to
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Request timeout
    #[serde(with = "humantime_serde", default = "default_sink_timeout")]
    pub timeout: Duration,
}

fn default_true() -> bool {
    true
}

fn default_sink_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl SinkConfig {
    /// The endpoint, if the sink is enabled and has one.
    pub fn active_endpoint(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.endpoint.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// Event tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Determinism configuration for reproducible payloads.
///
/// ```yaml
/// determinism:
///   submitted_at: "2026-01-15T10:00:00Z"
/// ```
///
/// When `submitted_at` is None (default), the current system time is used.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeterminismConfig {
    /// Fixed timestamp stamped on outbound payloads.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl DeterminismConfig {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.submitted_at.unwrap_or_else(Utc::now)
    }
}

// Custom serialization for Duration using humantime format
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert!(config.analytics.enabled);
        assert_eq!(config.submission.webhook_recommendations, 3);
        assert_eq!(config.submission.webhook.timeout, Duration::from_secs(10));
        assert!(config.submission.email_capture.active_endpoint().is_none());
        assert!(config.determinism.submitted_at.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = RuntimeConfig::from_yaml(
            r#"
submission:
  webhook:
    endpoint: "https://hooks.example.com/diagnostic"
    timeout: "2s 500ms"
  webhook_recommendations: 5
analytics:
  enabled: false
"#,
        )
        .unwrap();

        assert_eq!(
            config.submission.webhook.active_endpoint(),
            Some("https://hooks.example.com/diagnostic")
        );
        assert_eq!(config.submission.webhook.timeout, Duration::from_millis(2500));
        assert_eq!(config.submission.webhook_recommendations, 5);
        assert!(config.submission.email_capture.enabled);
        assert!(!config.analytics.enabled);
    }

    #[test]
    fn test_disabled_sink_has_no_endpoint() {
        let sink = SinkConfig {
            enabled: false,
            endpoint: Some("https://forms.example.com/f/abc".to_string()),
            ..SinkConfig::default()
        };
        assert!(sink.active_endpoint().is_none());

        let blank = SinkConfig {
            endpoint: Some("  ".to_string()),
            ..SinkConfig::default()
        };
        assert!(blank.active_endpoint().is_none());
    }

    #[test]
    fn test_session_directory_override() {
        let config = SessionConfig {
            directory: Some(PathBuf::from("/tmp/af")),
        };
        assert_eq!(config.resolved_directory(), PathBuf::from("/tmp/af"));
        assert!(SessionConfig::default().resolved_directory().ends_with(APP_DIR_NAME));
    }

    #[test]
    fn test_determinism_round_trip() {
        let mut config = RuntimeConfig::default();
        let fixed = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        config.determinism.submitted_at = Some(fixed);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("2026-01-15"));

        let parsed: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.determinism.timestamp(), fixed);
    }

    #[test]
    fn test_config_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autofront.json");
        std::fs::write(&path, r#"{"submission": {"email_capture": {"timeout": "3s"}}}"#).unwrap();

        let config = RuntimeConfig::from_file(&path).unwrap();
        assert_eq!(config.submission.email_capture.timeout, Duration::from_secs(3));
    }
}

/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed and validated application configuration
[POS]:    Configuration layer - capture, storage and logging setup
[UPDATE]: When adding new configuration options
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use fieldform_capture::CapturePolicy;
use fieldform_capture::geolocation::DEFAULT_LOOKUP_URL;
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location capture configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Give up on a position request after this many seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Reuse the first fix, or ask again on every render
    #[serde(default)]
    pub policy: CapturePolicy,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            policy: CapturePolicy::default(),
            provider: ProviderConfig::default(),
        }
    }
}

/// Where coordinates come from
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// HTTP lookup service returning latitude/longitude JSON
    Http {
        #[serde(default = "default_lookup_url")]
        url: String,
    },
    /// Fixed payload in the browser bridge shape
    Static {
        payload: serde_json::Value,
        #[serde(default)]
        delay_ms: u64,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Http {
            url: default_lookup_url(),
        }
    }
}

/// Submission storage configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON file holding accepted submissions
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured path, or `<data_dir>/fieldform/submissions.json`
    pub fn resolved_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("fieldform").join("submissions.json"))
    }
}

/// Log output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Write daily-rolling log files here instead of stderr
    pub directory: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_lookup_url() -> String {
    DEFAULT_LOOKUP_URL.to_string()
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse YAML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the provider with a fixed raw payload
    pub fn with_static_payload(mut self, raw: impl Into<String>) -> Self {
        self.capture.provider = ProviderConfig::Static {
            payload: serde_json::Value::String(raw.into()),
            delay_ms: 0,
        };
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capture.timeout_secs == 0 {
            return Err(anyhow!("capture.timeout_secs must be greater than zero"));
        }
        if let ProviderConfig::Http { url } = &self.capture.provider {
            Url::parse(url).with_context(|| format!("invalid capture.provider.url: {url}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config.capture.timeout_secs, 10);
        assert_eq!(config.capture.policy, CapturePolicy::CacheFirstSuccess);
        assert_eq!(
            config.capture.provider,
            ProviderConfig::Http {
                url: DEFAULT_LOOKUP_URL.to_string()
            }
        );
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_static_provider_config() {
        let yaml = r#"
capture:
  timeout_secs: 3
  policy: recapture_every_cycle
  provider:
    kind: static
    payload: '{"latitude":12.5,"longitude":77.6}'
storage:
  path: /tmp/fieldform/submissions.json
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.capture.timeout_secs, 3);
        assert_eq!(config.capture.policy, CapturePolicy::RecaptureEveryCycle);
        assert_eq!(
            config.capture.provider,
            ProviderConfig::Static {
                payload: serde_json::Value::String(
                    r#"{"latitude":12.5,"longitude":77.6}"#.to_string()
                ),
                delay_ms: 0,
            }
        );
        assert_eq!(
            config.storage.resolved_path().unwrap(),
            PathBuf::from("/tmp/fieldform/submissions.json")
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(AppConfig::from_yaml("capture:\n  timeout_secs: 0\n").is_err());
        assert!(
            AppConfig::from_yaml("capture:\n  provider:\n    kind: http\n    url: not a url\n")
                .is_err()
        );
        assert!(AppConfig::from_yaml("capture:\n  provider:\n    kind: carrier_pigeon\n").is_err());
    }

    #[test]
    fn test_static_payload_override() {
        let config = AppConfig::default().with_static_payload("null");
        assert!(matches!(
            config.capture.provider,
            ProviderConfig::Static { ref payload, .. } if payload == "null"
        ));
    }
}

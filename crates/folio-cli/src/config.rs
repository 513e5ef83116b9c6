//! Configuration loading for the folio CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Email delivery settings.
    #[serde(default)]
    pub smtp2go: Smtp2goConfig,

    /// Content store settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overlays secrets from the environment.
    ///
    /// Environment variables win over file values so credentials can be
    /// kept out of the config file entirely.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("SMTP2GO_API_KEY") {
            self.smtp2go.api_key = api_key;
        }
        if let Ok(space_id) = std::env::var("SPACE_ID") {
            self.content.space_id = space_id;
        }
        if let Ok(access_token) = std::env::var("ACCESS_TOKEN") {
            self.content.access_token = access_token;
        }
    }

    /// Creates a copy with secrets redacted.
    pub fn redact_secrets(&self) -> Self {
        let mut config = self.clone();

        if !config.smtp2go.api_key.is_empty() {
            config.smtp2go.api_key = "***REDACTED***".to_string();
        }
        if !config.content.access_token.is_empty() {
            config.content.access_token = "***REDACTED***".to_string();
        }

        config
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Email delivery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Smtp2goConfig {
    /// Delivery API key. Usually supplied via `SMTP2GO_API_KEY`.
    #[serde(default)]
    pub api_key: String,
}

/// Content store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content space identifier. Usually supplied via `SPACE_ID`.
    #[serde(default)]
    pub space_id: String,

    /// Delivery API access token. Usually supplied via `ACCESS_TOKEN`.
    #[serde(default)]
    pub access_token: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to use JSON format.
    #[serde(default)]
    pub json_format: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.smtp2go.api_key.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 3000

smtp2go:
  api_key: api-test-key

content:
  space_id: myspace
  access_token: cda-token

logging:
  level: debug
  json_format: true
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.smtp2go.api_key, "api-test-key");
        assert_eq!(config.content.space_id, "myspace");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("smtp2go:\n  api_key: k\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.smtp2go.api_key, "k");
    }

    #[test]
    fn test_redact_secrets() {
        let mut config = AppConfig::default();
        config.smtp2go.api_key = "secret-key".to_string();
        config.content.access_token = "secret-token".to_string();

        let redacted = config.redact_secrets();
        assert_eq!(redacted.smtp2go.api_key, "***REDACTED***");
        assert_eq!(redacted.content.access_token, "***REDACTED***");
        // Non-secret fields untouched.
        assert_eq!(redacted.content.space_id, config.content.space_id);
    }

    #[test]
    fn test_redact_leaves_empty_secrets_empty() {
        let redacted = AppConfig::default().redact_secrets();
        assert!(redacted.smtp2go.api_key.is_empty());
        assert!(redacted.content.access_token.is_empty());
    }
}

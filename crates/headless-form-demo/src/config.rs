// File: src/config.rs
// Purpose: Configuration parsing from form-demo.toml plus environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Limits applied by the signup form's validators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_username_min")]
    pub username_min: usize,

    #[serde(default = "default_username_max")]
    pub username_max: usize,

    #[serde(default = "default_password_min")]
    pub password_min: usize,

    #[serde(default = "default_password_max")]
    pub password_max: usize,

    /// Default starting date (YYYY-MM-DD); today when unset
    #[serde(default)]
    pub default_start_date: Option<String>,
}

/// Session lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions untouched for this long are dropped
    #[serde(default = "default_idle_minutes")]
    pub idle_minutes: u32,

    /// How often the background sweep runs
    #[serde(default = "default_sweep_seconds")]
    pub sweep_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_username_min() -> usize {
    2
}

fn default_username_max() -> usize {
    50
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    250
}

fn default_idle_minutes() -> u32 {
    30
}

fn default_sweep_seconds() -> u64 {
    60
}

fn default_filter() -> String {
    "info,headless_form=debug,tower_http=debug".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            username_min: default_username_min(),
            username_max: default_username_max(),
            password_min: default_password_min(),
            password_max: default_password_max(),
            default_start_date: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_minutes: default_idle_minutes(),
            sweep_seconds: default_sweep_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.idle_minutes))
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_seconds.max(1))
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./form-demo.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("form-demo.toml")
    }

    /// Apply FORM_DEMO_HOST / FORM_DEMO_PORT overrides
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var("FORM_DEMO_HOST").ok(),
            std::env::var("FORM_DEMO_PORT").ok(),
        )
    }

    fn with_overrides(mut self, host: Option<String>, port: Option<String>) -> Result<Self> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid FORM_DEMO_PORT: {:?}", port))?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.address(), "127.0.0.1:3000");
        assert_eq!(config.form.username_min, 2);
        assert_eq!(config.form.username_max, 50);
        assert_eq!(config.form.password_min, 8);
        assert_eq!(config.form.password_max, 250);
        assert!(config.form.default_start_date.is_none());
        assert_eq!(config.session.idle_timeout(), chrono::Duration::minutes(30));
        assert_eq!(config.session.sweep_interval(), std::time::Duration::from_secs(60));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [form]
            password_min = 12
            default_start_date = "2030-01-01"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.form.password_min, 12);
        assert_eq!(config.form.password_max, 250);
        assert_eq!(config.form.default_start_date.as_deref(), Some("2030-01-01"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.session.idle_minutes, 30);
    }

    #[test]
    fn test_session_config() {
        let toml = r#"
            [session]
            idle_minutes = 5
            sweep_seconds = 0
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.session.idle_timeout(), chrono::Duration::minutes(5));
        assert_eq!(config.session.sweep_interval(), std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(missing.server.port, 3000);

        let path = dir.path().join("empty.toml");
        fs::File::create(&path).unwrap().write_all(b"  \n").unwrap();
        assert_eq!(Config::load(&path).unwrap().server.port, 3000);
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[server\nport = ").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_overrides(Some("0.0.0.0".to_string()), Some("8080".to_string()))
            .unwrap();
        assert_eq!(config.server.address(), "0.0.0.0:8080");

        assert!(Config::default()
            .with_overrides(None, Some("http".to_string()))
            .is_err());
    }
}

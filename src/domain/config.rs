//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the chat service, the inference backend and system settings.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "llama3.1:latest";
pub const DEFAULT_STATUS_MESSAGE: &str = "Available";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

/// Configuration for the connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
    pub ollama: OllamaConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub homeserver: String,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_env: Option<String>, // e.g. "MATRIX_PASSWORD"
    #[serde(default)]
    pub display_name: Option<String>,
}

impl MatrixConfig {
    /// Resolves the login password, preferring the inline value over the environment.
    pub fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        if let Some(env_var) = &self.password_env {
            return std::env::var(env_var)
                .with_context(|| format!("Password env var {env_var} not set"));
        }
        bail!("No Matrix password provided - set password or password_env")
    }
}

/// Inference backend (Ollama HTTP API).
#[derive(Debug, Deserialize, Clone)]
pub struct OllamaConfig {
    pub url: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Per-request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default)]
    pub admin: Vec<String>,
    #[serde(default = "default_status_message")]
    pub status_message: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            admin: Vec::new(),
            status_message: default_status_message(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_status_message() -> String {
    DEFAULT_STATUS_MESSAGE.to_string()
}

fn default_log_dir() -> String {
    "data".to_string()
}

impl AppConfig {
    /// Reads and validates the YAML configuration at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let matrix = &self.services.matrix;
        if matrix.homeserver.trim().is_empty() {
            bail!("services.matrix.homeserver is empty");
        }
        if matrix.username.trim().is_empty() {
            bail!("services.matrix.username is empty");
        }
        matrix.resolve_password()?;
        if self.services.ollama.url.trim().is_empty() {
            bail!("services.ollama.url is empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
services:
  matrix:
    homeserver: https://matrix.example.org
    username: ollama-bot
    password: hunter2
  ollama:
    url: http://localhost:11434
system:
  admin: ["@alice:example.org"]
"#;

    #[test]
    fn test_parse_applies_defaults() {
        let config = AppConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.services.ollama.default_model, DEFAULT_MODEL);
        assert_eq!(config.services.ollama.timeout, None);
        assert_eq!(config.system.status_message, DEFAULT_STATUS_MESSAGE);
        assert_eq!(config.system.log_dir, "data");
        assert_eq!(config.system.admin, vec!["@alice:example.org".to_string()]);
        assert_eq!(config.services.matrix.display_name, None);
    }

    #[test]
    fn test_missing_password_is_rejected() {
        let yaml = SAMPLE.replace("    password: hunter2\n", "");
        let err = AppConfig::parse(&yaml).unwrap_err();
        assert!(format!("{err:#}").contains("No Matrix password"));
    }

    #[test]
    fn test_unset_password_env_is_rejected() {
        let yaml = SAMPLE.replace(
            "password: hunter2",
            "password_env: OLLAMA_CHAT_BOT_TEST_UNSET_PASSWORD",
        );
        assert!(AppConfig::parse(&yaml).is_err());
    }

    #[test]
    fn test_missing_ollama_section_is_rejected() {
        let yaml = "services:\n  matrix:\n    homeserver: h\n    username: u\n    password: p\n";
        assert!(AppConfig::parse(yaml).is_err());
    }

    #[test]
    fn test_empty_url_is_rejected() {
        let yaml = SAMPLE.replace("http://localhost:11434", "\"\"");
        let err = AppConfig::parse(&yaml).unwrap_err();
        assert!(err.to_string().contains("ollama.url"));
    }

    #[test]
    fn test_load_from_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(SAMPLE.as_bytes())?;
        let config = AppConfig::load(file.path())?;
        assert_eq!(config.services.matrix.username, "ollama-bot");
        assert_eq!(config.services.matrix.resolve_password()?, "hunter2");
        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("config.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}

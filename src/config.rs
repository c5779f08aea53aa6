use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{DEFAULT_ENDPOINT, PracticumConfig};
use crate::error::BotError;
use crate::notify::{DEFAULT_API_BASE, TelegramConfig};
use crate::poller::{ErrorCheckpoint, PollLoopConfig, SuccessCheckpoint};

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Non-secret settings, read from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub poll_interval_secs: u64,
    pub endpoint: String,
    pub telegram_api_base: String,
    pub request_timeout_ms: u64,
    pub success_checkpoint: SuccessCheckpoint,
    pub error_checkpoint: ErrorCheckpoint,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: 600,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 30000,
            success_checkpoint: SuccessCheckpoint::default(),
            error_checkpoint: ErrorCheckpoint::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            eyre::bail!("poll-interval-secs must be > 0");
        }
        if self.request_timeout_ms == 0 {
            eyre::bail!("request-timeout-ms must be > 0");
        }
        if self.endpoint.trim().is_empty() {
            eyre::bail!("endpoint must not be empty");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn poll_loop_config(&self) -> PollLoopConfig {
        PollLoopConfig::default()
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs))
            .with_success_checkpoint(self.success_checkpoint)
            .with_error_checkpoint(self.error_checkpoint)
    }

    pub fn practicum_config(&self) -> PracticumConfig {
        PracticumConfig {
            endpoint: self.endpoint.clone(),
            timeout: self.request_timeout(),
        }
    }

    pub fn telegram_config(&self) -> TelegramConfig {
        TelegramConfig {
            api_base: self.telegram_api_base.clone(),
            timeout: self.request_timeout(),
        }
    }
}

/// Load `.env` from the working directory. Variables already set win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env: {}", e),
    }
}

/// Secrets, read from the environment only
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    pub fn from_env() -> std::result::Result<Self, BotError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let telegram_chat_id = read(TELEGRAM_CHAT_ID);

        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                practicum_token,
                telegram_token,
                telegram_chat_id,
            }),
            (practicum_token, telegram_token, telegram_chat_id) => {
                let missing = [
                    (PRACTICUM_TOKEN, practicum_token.is_none()),
                    (TELEGRAM_TOKEN, telegram_token.is_none()),
                    (TELEGRAM_CHAT_ID, telegram_chat_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(BotError::ConfigMissing { missing })
            }
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.poll_interval_secs, 600);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.telegram_api_base, DEFAULT_API_BASE);
        assert_eq!(config.success_checkpoint, SuccessCheckpoint::ServerDate);
        assert_eq!(config.error_checkpoint, ErrorCheckpoint::Hold);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bot.yml");
        fs::write(
            &path,
            "poll-interval-secs: 60\nsuccess-checkpoint: now\nerror-checkpoint: rewind\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.success_checkpoint, SuccessCheckpoint::Now);
        assert_eq!(config.error_checkpoint, ErrorCheckpoint::Rewind);
        // Unspecified keys keep their defaults
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_rejects_unknown_policy() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bot.yml");
        fs::write(&path, "error-checkpoint: forget\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = Config {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            request_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_component_configs() {
        let config = Config {
            poll_interval_secs: 30,
            request_timeout_ms: 1500,
            endpoint: "http://localhost:9000/".to_string(),
            ..Default::default()
        };

        assert_eq!(config.poll_loop_config().poll_interval, Duration::from_secs(30));
        assert_eq!(config.practicum_config().endpoint, "http://localhost:9000/");
        assert_eq!(config.practicum_config().timeout, Duration::from_millis(1500));
        assert_eq!(config.telegram_config().api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_credentials_all_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (PRACTICUM_TOKEN, "p"),
            (TELEGRAM_TOKEN, "t"),
            (TELEGRAM_CHAT_ID, "42"),
        ]))
        .unwrap();
        assert_eq!(creds.practicum_token, "p");
        assert_eq!(creds.telegram_token, "t");
        assert_eq!(creds.telegram_chat_id, "42");
    }

    #[test]
    fn test_credentials_missing_are_listed() {
        let err = Credentials::from_lookup(lookup_from(&[(TELEGRAM_TOKEN, "t")])).unwrap_err();
        assert_eq!(
            err,
            BotError::ConfigMissing {
                missing: vec![PRACTICUM_TOKEN, TELEGRAM_CHAT_ID]
            }
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_credentials_empty_value_is_missing() {
        let err = Credentials::from_lookup(lookup_from(&[
            (PRACTICUM_TOKEN, "p"),
            (TELEGRAM_TOKEN, "  "),
            (TELEGRAM_CHAT_ID, "42"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            BotError::ConfigMissing {
                missing: vec![TELEGRAM_TOKEN]
            }
        );
    }

    #[test]
    fn test_credentials_debug_redacts_tokens() {
        let creds = Credentials {
            practicum_token: "practicum-secret".to_string(),
            telegram_token: "telegram-secret".to_string(),
            telegram_chat_id: "42".to_string(),
        };
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("practicum-secret"));
        assert!(!debug_str.contains("telegram-secret"));
        assert!(debug_str.contains("42"));
    }
}

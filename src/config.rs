//! Application configuration.
//!
//! Settings are resolved from, highest precedence first: command-line flags,
//! environment variables, and the JSON config file in the user's home
//! directory. Credentials have no built-in fallback.

use crate::auth::Credentials;
use crate::consts::cli_consts::env_vars;
use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting was found in none of the configuration sources.
    #[error("Missing {setting}: pass --{flag}, set {env_var}, or run `login`")]
    MissingSetting {
        setting: &'static str,
        flag: &'static str,
        env_var: &'static str,
    },

    #[error("Invalid API URL '{0}': expected http:// or https://")]
    InvalidApiUrl(String),

    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contents of the on-disk config file. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

impl Config {
    /// Create Config holding the given credentials.
    pub fn with_credentials(username: String, password: String) -> Self {
        Config {
            username: Some(username),
            password: Some(password),
            ..Config::default()
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the config file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Settings passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub download_dir: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub environment: Environment,
    pub credentials: Credentials,
    pub download_dir: PathBuf,
}

impl ResolvedConfig {
    /// Resolves settings from flags, the process environment and the config file at `path`.
    pub fn resolve(overrides: ConfigOverrides, path: &Path) -> Result<Self, ConfigError> {
        let file = if path.exists() {
            Some(Config::load_from_file(path)?)
        } else {
            None
        };
        Self::resolve_with(overrides, file, |key| std::env::var(key).ok())
    }

    /// Resolution with an injectable environment lookup.
    pub fn resolve_with<F>(
        overrides: ConfigOverrides,
        file: Option<Config>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let pick = |flag: Option<String>, var: &str, stored: Option<String>| {
            flag.or_else(|| env(var))
                .or(stored)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = match pick(overrides.api_url, env_vars::API_URL, file.api_url) {
            Some(url) => url
                .parse::<Environment>()
                .map_err(|_| ConfigError::InvalidApiUrl(url.clone()))?,
            None => Environment::default(),
        };

        let username = pick(overrides.username, env_vars::API_USERNAME, file.username).ok_or(
            ConfigError::MissingSetting {
                setting: "API username",
                flag: "username",
                env_var: env_vars::API_USERNAME,
            },
        )?;
        let password = pick(overrides.password, env_vars::API_PASSWORD, file.password).ok_or(
            ConfigError::MissingSetting {
                setting: "API password",
                flag: "password",
                env_var: env_vars::API_PASSWORD,
            },
        )?;

        let download_dir = overrides
            .download_dir
            .or(file.download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            environment,
            credentials: Credentials::new(username, password),
            download_dir,
        })
    }
}

/// Location of the config file: `~/.equipment-visualizer/config.json`.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let home_path = home::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home_path.join(".equipment-visualizer").join("config.json"))
}

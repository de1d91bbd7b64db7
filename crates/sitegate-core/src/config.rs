//! Application configuration management.
//!
//! This module handles loading and saving the configuration, which records
//! the backend base URL, where the admin token is kept, and the last used
//! username.
//!
//! Configuration is stored at `~/.config/sitegate/config.json`. The
//! `SITEGATE_API_BASE_URL` environment variable overrides the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, Session, TokenStore};

/// Application name used for config/data directory paths
const APP_NAME: &str = "sitegate";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the backend base URL
pub const BASE_URL_ENV: &str = "SITEGATE_API_BASE_URL";

/// Used when neither the environment nor the config file names a backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Where the admin token is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    #[default]
    File,
    Keyring,
    /// Not persisted at all
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub credential_backend: CredentialBackend,
    #[serde(default)]
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory the file token store writes `admin_token` into.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Resolve the backend base URL from the environment, then this file.
    pub fn base_url(&self) -> String {
        self.base_url_with(std::env::var(BASE_URL_ENV).ok())
    }

    /// Resolve the base URL given an explicit override (e.g. a CLI flag or env value).
    pub fn base_url_with(&self, override_url: Option<String>) -> String {
        override_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string()
    }

    pub fn token_store(&self) -> Result<Box<dyn TokenStore>> {
        Ok(match self.credential_backend {
            CredentialBackend::File => Box::new(FileTokenStore::new(self.data_dir()?)),
            CredentialBackend::Keyring => Box::new(KeyringTokenStore::new()),
            CredentialBackend::Memory => Box::new(MemoryTokenStore::new()),
        })
    }

    /// Build the process session, restoring any persisted token.
    pub fn restore_session(&self) -> Result<Session> {
        Ok(Session::restored(self.token_store()?))
    }
}

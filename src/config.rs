//! Application configuration.
//!
//! Configuration is stored in `<app dir>/config.yaml` and includes:
//! - Backend API base URL
//! - Request timeout, page size and search debounce window
//! - Notification display duration
//!
//! The app dir is `$SHOPFLOOR_HOME` when set, otherwise the platform
//! configuration directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ShopfloorError};

pub const HOME_ENV: &str = "SHOPFLOOR_HOME";
pub const API_URL_ENV: &str = "SHOPFLOOR_API_URL";

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api_url",
    "request_timeout",
    "page_size",
    "search_debounce_ms",
    "toast_seconds",
];

/// Root directory holding config, session and preference files.
pub fn app_root() -> PathBuf {
    if let Ok(home) = env::var(HOME_ENV)
        && !home.is_empty()
    {
        return PathBuf::from(home);
    }

    ProjectDirs::from("", "", "shopfloor")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".shopfloor"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the work-order backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Client-side request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Records requested per page (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet period before a typed search is sent (default: 400)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Seconds before a notification auto-dismisses (default: 5)
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    10
}

fn default_search_debounce_ms() -> u64 {
    400
}

fn default_toast_seconds() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: default_request_timeout(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            toast_seconds: default_toast_seconds(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        app_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ShopfloorError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;

        // Set restrictive permissions on Unix (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, permissions)?;
        }

        Ok(())
    }

    /// API base URL, with `SHOPFLOOR_API_URL` taking precedence over the file.
    pub fn api_url(&self) -> Result<Url> {
        let raw = match env::var(API_URL_ENV) {
            Ok(url) if !url.is_empty() => url,
            _ => self.api_url.clone(),
        };
        parse_base_url(&raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api_url" => Ok(self.api_url.clone()),
            "request_timeout" => Ok(self.request_timeout.to_string()),
            "page_size" => Ok(self.page_size.to_string()),
            "search_debounce_ms" => Ok(self.search_debounce_ms.to_string()),
            "toast_seconds" => Ok(self.toast_seconds.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => {
                parse_base_url(value)?;
                self.api_url = value.to_string();
            }
            "request_timeout" => self.request_timeout = parse_positive(key, value)?,
            "page_size" => {
                let size = parse_positive(key, value)?;
                self.page_size = u32::try_from(size)
                    .map_err(|_| ShopfloorError::Config(format!("{key} is too large")))?;
            }
            "search_debounce_ms" => {
                self.search_debounce_ms = value.parse().map_err(|_| {
                    ShopfloorError::Config(format!("{key} must be a number, got '{value}'"))
                })?;
            }
            "toast_seconds" => self.toast_seconds = parse_positive(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

/// Parse a base URL, making sure it ends with `/` so relative joins keep the path.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ShopfloorError::Config(format!(
            "api_url must be http or https, got '{}'",
            raw
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_positive(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ShopfloorError::Config(format!(
            "{key} must be a positive number, got '{value}'"
        ))),
    }
}

fn unknown_key(key: &str) -> ShopfloorError {
    ShopfloorError::Config(format!(
        "unknown key '{}', expected one of: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

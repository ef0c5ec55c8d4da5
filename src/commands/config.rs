//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{API_URL_ENV, CONFIG_KEYS, Config};
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let effective_url = config.api_url()?;
    let overridden = std::env::var(API_URL_ENV).is_ok_and(|v| !v.is_empty());

    let json_output = json!({
        "path": Config::config_path().to_string_lossy(),
        "api_url": effective_url.as_str(),
        "api_url_from_env": overridden,
        "request_timeout": config.request_timeout,
        "page_size": config.page_size,
        "search_debounce_ms": config.search_debounce_ms,
        "toast_seconds": config.toast_seconds,
    });

    let mut text = format!(
        "{} {}\n",
        "Configuration:".bold(),
        Config::config_path().display().dimmed()
    );
    for key in CONFIG_KEYS {
        let value = if *key == "api_url" {
            effective_url.to_string()
        } else {
            config.get(key)?
        };
        text.push_str(&format!("  {}: {}", key.cyan(), value));
        if *key == "api_url" && overridden {
            text.push_str(&format!(" {}", format!("(from {API_URL_ENV})").dimmed()));
        }
        text.push('\n');
    }

    CommandOutput::new(json_output)
        .with_text(text.trim_end())
        .print(output_json)
}

pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({ "key": key, "value": value }))
        .with_text(value.clone())
        .print(output_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let stored = config.get(key)?;
    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    }))
    .with_text(format!("Set {} = {}", key.cyan(), stored))
    .print(output_json)
}

use serde_json::json;

use super::CommandOutput;
use crate::error::Result;
use crate::session::{SessionStore, ThemePreference};

fn print_theme(theme: ThemePreference, text: String, output_json: bool) -> Result<()> {
    CommandOutput::new(json!({ "theme": theme.to_string() }))
        .with_text(text)
        .print(output_json)
}

pub fn cmd_theme_get(output_json: bool) -> Result<()> {
    let theme = SessionStore::from_env().load_theme();
    print_theme(theme, theme.to_string(), output_json)
}

pub fn cmd_theme_set(theme: ThemePreference, output_json: bool) -> Result<()> {
    SessionStore::from_env().save_theme(theme)?;
    print_theme(theme, format!("Theme set to {theme}"), output_json)
}

pub fn cmd_theme_toggle(output_json: bool) -> Result<()> {
    let store = SessionStore::from_env();
    let theme = store.load_theme().toggled();
    store.save_theme(theme)?;
    print_theme(theme, format!("Theme set to {theme}"), output_json)
}

//! `login`, `logout` and `whoami`.

use owo_colors::OwoColorize;
use serde_json::json;
use tracing::info;

use super::interactive::prompt_line;
use super::{CommandOutput, Connection};
use crate::api::WorkOrderApi;
use crate::error::{Result, ShopfloorError};

pub const PASSWORD_ENV: &str = "SHOPFLOOR_PASSWORD";

/// Log in and persist the session, replacing any previous one.
///
/// The password comes from `--password`, then `$SHOPFLOOR_PASSWORD`, then
/// a prompt.
pub async fn cmd_login(
    username: Option<String>,
    password: Option<String>,
    output_json: bool,
) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt_line("Username")?,
    };
    let password = match password.or_else(|| std::env::var(PASSWORD_ENV).ok()) {
        Some(p) => p,
        None => prompt_line("Password")?,
    };

    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ShopfloorError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let conn = Connection::open()?;
    let session = conn.api.login(username, &password).await?;
    conn.session.replace(session.clone())?;
    info!(user = %session.user.username, role = %session.user.role, "logged in");

    CommandOutput::new(json!({
        "id": session.user.id,
        "username": session.user.username,
        "role": session.user.role,
    }))
    .with_text(format!(
        "Logged in as {} ({})",
        session.user.username.bold(),
        session.user.role.label()
    ))
    .print(output_json)
}

pub fn cmd_logout(output_json: bool) -> Result<()> {
    let conn = Connection::open()?;
    let was_logged_in = conn.session.is_logged_in();
    conn.session.clear()?;

    CommandOutput::new(json!({ "logged_out": was_logged_in }))
        .with_text(if was_logged_in {
            "Logged out"
        } else {
            "Not logged in"
        })
        .print(output_json)
}

pub fn cmd_whoami(output_json: bool) -> Result<()> {
    let (conn, session) = Connection::logged_in()?;

    CommandOutput::new(json!({
        "id": session.user.id,
        "username": session.user.username,
        "role": session.user.role,
        "api_url": conn.config.api_url()?.to_string(),
    }))
    .with_text(format!(
        "{} ({}) at {}",
        session.user.username.bold(),
        session.user.role.label(),
        conn.config.api_url()?.as_str().dimmed()
    ))
    .print(output_json)
}

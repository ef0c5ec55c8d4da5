mod auth;
mod config;
mod console;
mod create;
mod delete;
mod edit;
pub mod interactive;
mod ls;
mod note;
mod operators;
mod report;
mod show;
mod status;
mod theme;

pub use auth::{cmd_login, cmd_logout, cmd_whoami};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use console::cmd_console;
pub use create::{CreateOptions, cmd_create};
pub use delete::cmd_delete;
pub use edit::{EditOptions, cmd_edit};
pub use ls::{LsOptions, cmd_ls};
pub use note::cmd_note;
pub use operators::cmd_operators;
pub use report::{cmd_report_operators, cmd_report_summary};
pub use show::cmd_show;
pub use status::cmd_status;
pub use theme::{cmd_theme_get, cmd_theme_set, cmd_theme_toggle};

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use serde_json::Value;

use crate::api::HttpApi;
use crate::config::Config;
use crate::error::{Result, ShopfloorError};
use crate::session::{Session, SessionContext, SessionStore};
use crate::types::Role;

/// Output of a command: the JSON document for `--json`, and optionally a
/// human-readable rendering used otherwise.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when requested or when there is no text form.
    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// Everything a backend command needs: configuration, the persisted
/// session, and a client bound to both.
pub(crate) struct Connection {
    pub config: Config,
    pub session: SessionContext,
    pub api: HttpApi,
}

impl Connection {
    pub fn open() -> Result<Self> {
        let config = Config::load()?;
        let session = SessionContext::load(SessionStore::from_env())?;
        let api = HttpApi::from_config(&config, session.clone())?;
        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Open a connection that has a logged-in session.
    pub fn logged_in() -> Result<(Self, Session)> {
        let conn = Self::open()?;
        let session = conn.session.require()?;
        Ok((conn, session))
    }
}

pub(crate) fn require_manager(session: &Session, what: &str) -> Result<()> {
    if session.role() == Role::ProductionManager {
        Ok(())
    } else {
        Err(ShopfloorError::Forbidden(format!(
            "only production managers can {what}"
        )))
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<Date> {
    raw.trim()
        .parse::<Date>()
        .map_err(|_| ShopfloorError::Validation(format!("'{raw}' is not a date (YYYY-MM-DD)")))
}

/// Accept an RFC 3339 timestamp, or a plain date meaning its start in `tz`.
pub(crate) fn parse_deadline(raw: &str, tz: &TimeZone) -> Result<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }
    let date = parse_date(raw)?;
    date.to_zoned(tz.clone())
        .map(|zoned| zoned.timestamp())
        .map_err(|e| ShopfloorError::Validation(format!("invalid deadline '{raw}': {e}")))
}

pub(crate) fn local_time_zone() -> TimeZone {
    Zoned::now().time_zone().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deadline_accepts_dates_and_timestamps() {
        let tz = TimeZone::fixed(jiff::tz::offset(7));
        let from_date = parse_deadline("2024-05-01", &tz).unwrap();
        assert_eq!(from_date.to_string(), "2024-04-30T17:00:00Z");

        let exact = parse_deadline("2024-05-01T08:30:00Z", &tz).unwrap();
        assert_eq!(exact.to_string(), "2024-05-01T08:30:00Z");

        assert!(parse_deadline("next week", &tz).is_err());
    }

    #[test]
    fn test_require_manager() {
        use crate::session::SessionUser;

        let operator = Session::new(
            "t",
            SessionUser {
                id: 1,
                username: "budi".to_string(),
                role: Role::Operator,
            },
        );
        let err = require_manager(&operator, "delete work orders").unwrap_err();
        assert!(matches!(err, ShopfloorError::Forbidden(_)));
    }
}

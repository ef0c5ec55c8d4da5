//! Persisted authentication record and theme preference.
//!
//! The session lives in `<app dir>/session.json` and is always written as a
//! whole record (temp file + rename), so a reader never observes a half-written
//! session. The theme preference is stored separately in `<app dir>/theme`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::app_root;
use crate::error::{Result, ShopfloorError};
use crate::types::Role;

const SESSION_FILE: &str = "session.json";
const THEME_FILE: &str = "theme";

/// Identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u64,
    pub username: String,
    pub role: Role,
}

/// Bearer token plus the user it was issued to.
pub struct Session {
    token: SecretString,
    pub user: SessionUser,
}

impl Session {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: SecretString::from(token.into()),
            user,
        }
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self::new(self.token.expose_secret(), self.user.clone())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Serialize)]
struct StoredSessionRef<'a> {
    token: &'a str,
    user: &'a SessionUser,
}

#[derive(Deserialize)]
struct StoredSession {
    token: String,
    user: SessionUser,
}

/// Console palette preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemePreference::Light => write!(f, "light"),
            ThemePreference::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemePreference {
    type Err = ShopfloorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(ShopfloorError::Validation(format!(
                "invalid theme '{}', expected light or dark",
                s.trim()
            ))),
        }
    }
}

/// File-backed storage for the session record and theme preference.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the application directory.
    pub fn from_env() -> Self {
        Self::new(app_root())
    }

    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    pub fn theme_path(&self) -> PathBuf {
        self.dir.join(THEME_FILE)
    }

    /// Read the persisted session. A missing or unreadable record means logged out.
    pub fn load(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str::<StoredSession>(&content) {
            Ok(stored) => Ok(Some(Session::new(stored.token, stored.user))),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt session record");
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let stored = StoredSessionRef {
            token: session.token.expose_secret(),
            user: &session.user,
        };
        let content = serde_json::to_string_pretty(&stored)?;
        write_replacing(&self.session_path(), &content)?;
        debug!(user = %session.user.username, "session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load_theme(&self) -> ThemePreference {
        fs::read_to_string(self.theme_path())
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn save_theme(&self, theme: ThemePreference) -> Result<()> {
        write_replacing(&self.theme_path(), &format!("{theme}\n"))
    }
}

/// Write `content` to a sibling temp file and rename it over `path`.
fn write_replacing(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp, path)?;
    Ok(())
}

/// Shared, explicitly passed session state.
///
/// Readers (every API call) take a snapshot; writers (login, logout, 401
/// handling) replace the whole record and persist it through the store.
#[derive(Debug, Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    store: Option<SessionStore>,
}

impl SessionContext {
    /// Context backed by a store, seeded from whatever is persisted there.
    pub fn load(store: SessionStore) -> Result<Self> {
        let current = store.load()?;
        Ok(Self {
            current: Arc::new(RwLock::new(current)),
            store: Some(store),
        })
    }

    /// Context that never touches disk.
    pub fn in_memory(session: Option<Session>) -> Self {
        Self {
            current: Arc::new(RwLock::new(session)),
            store: None,
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    pub fn require(&self) -> Result<Session> {
        self.current().ok_or(ShopfloorError::NotLoggedIn)
    }

    pub fn role(&self) -> Option<Role> {
        self.current.read().as_ref().map(Session::role)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.read().is_some()
    }

    /// Bearer token for the current session, if any.
    pub fn token(&self) -> Option<SecretString> {
        self.current
            .read()
            .as_ref()
            .map(|s| SecretString::from(s.token.expose_secret().to_string()))
    }

    pub fn replace(&self, session: Session) -> Result<()> {
        if let Some(store) = &self.store {
            store.save(&session)?;
        }
        *self.current.write() = Some(session);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        *self.current.write() = None;
        if let Some(store) = &self.store {
            store.clear()?;
        }
        Ok(())
    }
}

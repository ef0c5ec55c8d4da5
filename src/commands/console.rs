use crate::config::Config;
use crate::error::Result;
use crate::session::{SessionContext, SessionStore};
use crate::tui::run_console;

/// Open the interactive work-order console
pub async fn cmd_console() -> Result<()> {
    let config = Config::load()?;
    let store = SessionStore::from_env();
    let theme = store.load_theme();
    let session = SessionContext::load(store)?;
    let user = session.require()?.user;

    if let Some(message) = run_console(config, session, user, theme).await? {
        eprintln!("{message}");
    }
    Ok(())
}

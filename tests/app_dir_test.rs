//! Config and session files resolved through `SHOPFLOOR_HOME`
//!
//! These tests mutate process environment, so they run serially.

mod common;

use serial_test::serial;
use tempfile::TempDir;

use common::mock_data::{manager, operator};
use shopfloor::config::{API_URL_ENV, Config, HOME_ENV};
use shopfloor::session::{Session, SessionContext, SessionStore, ThemePreference};
use shopfloor::types::Role;

struct AppDir {
    dir: TempDir,
}

impl AppDir {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        unsafe {
            std::env::set_var(HOME_ENV, dir.path());
            std::env::remove_var(API_URL_ENV);
        }
        Self { dir }
    }
}

impl Drop for AppDir {
    fn drop(&mut self) {
        unsafe {
            std::env::remove_var(HOME_ENV);
            std::env::remove_var(API_URL_ENV);
        }
    }
}

#[test]
#[serial]
fn test_config_lives_under_app_dir() {
    let app = AppDir::new();
    assert_eq!(Config::config_path(), app.dir.path().join("config.yaml"));

    let mut config = Config::load().expect("defaults");
    config.set("toast_seconds", "8").expect("valid value");
    config.save().expect("save");

    let reloaded = Config::load().expect("reload");
    assert_eq!(reloaded.toast_seconds, 8);
}

#[test]
#[serial]
fn test_api_url_env_takes_precedence() {
    let _app = AppDir::new();
    let config = Config::default();
    assert_eq!(
        config.api_url().expect("default url").as_str(),
        "http://localhost:8080/api/"
    );

    unsafe { std::env::set_var(API_URL_ENV, "https://mes.example.com/v1") };
    assert_eq!(
        config.api_url().expect("env url").as_str(),
        "https://mes.example.com/v1/"
    );
}

#[test]
#[serial]
fn test_session_survives_reload_and_clear() {
    let _app = AppDir::new();

    let ctx = SessionContext::load(SessionStore::from_env()).expect("empty store");
    assert!(!ctx.is_logged_in());

    ctx.replace(Session::new("tok", manager())).expect("save");
    let reloaded = SessionContext::load(SessionStore::from_env()).expect("reload");
    assert_eq!(reloaded.role(), Some(Role::ProductionManager));

    reloaded
        .replace(Session::new("tok-2", operator()))
        .expect("replace");
    let replaced = SessionStore::from_env()
        .load()
        .expect("load")
        .expect("session present");
    assert_eq!(replaced.user, operator());

    reloaded.clear().expect("clear");
    assert!(SessionStore::from_env().load().expect("load").is_none());
}

#[test]
#[serial]
fn test_corrupt_session_counts_as_logged_out() {
    let app = AppDir::new();
    std::fs::write(app.dir.path().join("session.json"), "{ not json").expect("write");

    let ctx = SessionContext::load(SessionStore::from_env()).expect("load");
    assert!(!ctx.is_logged_in());
}

#[test]
#[serial]
fn test_theme_preference_round_trip() {
    let _app = AppDir::new();
    let store = SessionStore::from_env();

    assert_eq!(store.load_theme(), ThemePreference::Light);
    store.save_theme(ThemePreference::Dark).expect("save");
    assert_eq!(SessionStore::from_env().load_theme(), ThemePreference::Dark);
}

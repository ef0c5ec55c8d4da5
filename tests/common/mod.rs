#![allow(dead_code)]

pub mod mock_data;

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run shopfloor commands against an isolated app directory
pub struct ShopfloorTest {
    pub temp_dir: TempDir,
    api_url: Option<String>,
}

impl ShopfloorTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        ShopfloorTest {
            temp_dir,
            api_url: None,
        }
    }

    /// Point the binary at a mock server via `SHOPFLOOR_API_URL`
    pub fn with_api(api_url: &str) -> Self {
        let mut test = Self::new();
        test.api_url = Some(api_url.to_string());
        test
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_shopfloor"));
        command
            .args(args)
            .env("SHOPFLOOR_HOME", self.temp_dir.path())
            .env_remove("SHOPFLOOR_PASSWORD")
            .env("NO_COLOR", "1")
            .current_dir(self.temp_dir.path());
        match &self.api_url {
            Some(url) => command.env("SHOPFLOOR_API_URL", url),
            None => command.env_remove("SHOPFLOOR_API_URL"),
        };
        command.output().expect("Failed to execute shopfloor command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Write a session file as if `shopfloor login` had succeeded
    pub fn write_session(&self, token: &str, username: &str, role: &str) {
        let session = serde_json::json!({
            "token": token,
            "user": { "id": 1, "username": username, "role": role },
        });
        fs::write(
            self.temp_dir.path().join("session.json"),
            serde_json::to_string_pretty(&session).expect("session should serialize"),
        )
        .expect("Failed to write session file");
    }

    pub fn session_exists(&self) -> bool {
        self.temp_dir.path().join("session.json").exists()
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.temp_dir.path().join("config.yaml"))
            .expect("Failed to read config file")
    }
}

//! End-to-end tests of the `shopfloor` binary
//!
//! Each test gets its own `SHOPFLOOR_HOME`; backend commands talk to a
//! wiremock server through `SHOPFLOOR_API_URL`.

mod common;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::ShopfloorTest;
use common::mock_data::{page_json, work_order_json};

fn parse_json(output: &str) -> Value {
    serde_json::from_str(output).expect("command should print JSON")
}

// ============================================================================
// Config and theme
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let sf = ShopfloorTest::new();

    let output = sf.run_success(&["config", "show", "--json"]);
    let config = parse_json(&output);
    assert_eq!(config["api_url"], "http://localhost:8080/api/");
    assert_eq!(config["page_size"], 10);
    assert_eq!(config["request_timeout"], 30);
    assert_eq!(config["api_url_from_env"], false);
}

#[test]
fn test_config_set_then_get() {
    let sf = ShopfloorTest::new();

    sf.run_success(&["config", "set", "page_size", "25"]);
    assert_eq!(sf.run_success(&["config", "get", "page_size"]).trim(), "25");
    assert!(sf.read_config().contains("page_size: 25"));
}

#[test]
fn test_config_set_rejects_bad_values() {
    let sf = ShopfloorTest::new();

    let stderr = sf.run_failure(&["config", "set", "page_size", "zero"]);
    assert!(stderr.starts_with("Error:"));
    assert!(stderr.contains("page_size"));

    let stderr = sf.run_failure(&["config", "set", "api_url", "ftp://example.com"]);
    assert!(stderr.contains("http or https"));

    let stderr = sf.run_failure(&["config", "get", "colour"]);
    assert!(stderr.starts_with("Error:"));
}

#[test]
fn test_env_api_url_overrides_config() {
    let sf = ShopfloorTest::with_api("http://127.0.0.1:9/v2");

    let config = parse_json(&sf.run_success(&["config", "show", "--json"]));
    assert_eq!(config["api_url"], "http://127.0.0.1:9/v2/");
    assert_eq!(config["api_url_from_env"], true);
}

#[test]
fn test_theme_defaults_toggles_and_persists() {
    let sf = ShopfloorTest::new();

    assert_eq!(sf.run_success(&["theme", "get"]).trim(), "light");
    sf.run_success(&["theme", "toggle"]);
    assert_eq!(sf.run_success(&["theme", "get"]).trim(), "dark");
    sf.run_success(&["theme", "set", "light"]);
    let theme = parse_json(&sf.run_success(&["theme", "get", "--json"]));
    assert_eq!(theme["theme"], "light");

    let stderr = sf.run_failure(&["theme", "set", "sepia"]);
    assert!(stderr.contains("sepia"));
}

// ============================================================================
// Session handling
// ============================================================================

#[test]
fn test_commands_require_login() {
    let sf = ShopfloorTest::new();

    let stderr = sf.run_failure(&["whoami"]);
    assert!(stderr.contains("not logged in"));
    let stderr = sf.run_failure(&["ls"]);
    assert!(stderr.contains("shopfloor login"));
}

#[test]
fn test_whoami_and_logout() {
    let sf = ShopfloorTest::new();
    sf.write_session("abc", "maria", "production_manager");

    let me = parse_json(&sf.run_success(&["whoami", "--json"]));
    assert_eq!(me["username"], "maria");
    assert_eq!(me["role"], "production_manager");

    let output = sf.run_success(&["logout"]);
    assert!(output.contains("Logged out"));
    assert!(!sf.session_exists());
    assert!(sf.run_success(&["logout"]).contains("Not logged in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh",
            "user": { "id": 7, "username": "budi", "role": "operator" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sf = ShopfloorTest::with_api(&format!("{}/api", server.uri()));
    let login = parse_json(&sf.run_success(&["login", "budi", "--password", "pw", "--json"]));
    assert_eq!(login["role"], "operator");
    assert!(sf.session_exists());

    let me = parse_json(&sf.run_success(&["whoami", "--json"]));
    assert_eq!(me["username"], "budi");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let sf = ShopfloorTest::with_api(&format!("{}/api", server.uri()));
    sf.write_session("stale", "maria", "production_manager");

    let stderr = sf.run_failure(&["ls"]);
    assert!(stderr.contains("session expired"));
    assert!(!sf.session_exists());
}

// ============================================================================
// Work orders
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_ls_json_passes_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/work-orders"))
        .and(query_param("status", "pending"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![work_order_json(11, "pending", 0)],
            2,
            2,
            11,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let sf = ShopfloorTest::with_api(&format!("{}/api", server.uri()));
    sf.write_session("abc", "maria", "production_manager");

    let output = sf.run_success(&["ls", "--status", "pending", "--page", "2", "--json"]);
    let listed = parse_json(&output);
    assert_eq!(listed["work_orders"][0]["id"], 11);
    assert_eq!(listed["pagination"]["page"], 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ls_table_shows_records_and_pager() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/work-orders/assigned"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![work_order_json(3, "in_progress", 40)],
            1,
            1,
            1,
        )))
        .mount(&server)
        .await;

    let sf = ShopfloorTest::with_api(&format!("{}/api", server.uri()));
    sf.write_session("abc", "budi", "operator");

    let output = sf.run_success(&["ls"]);
    assert!(output.contains("WO-20240501-003"));
    assert!(output.contains("40/100"));
    assert!(output.contains("[1]"));
}

#[test]
fn test_operator_cannot_use_manager_filters() {
    let sf = ShopfloorTest::new();
    sf.write_session("abc", "budi", "operator");

    let stderr = sf.run_failure(&["ls", "--search", "bracket"]);
    assert!(stderr.contains("only filter"));
    let stderr = sf.run_failure(&["ls", "--view", "kanban-operator"]);
    assert!(stderr.contains("permission denied"));
}

#[test]
fn test_invalid_status_is_rejected_by_parser() {
    let sf = ShopfloorTest::new();
    let stderr = sf.run_failure(&["ls", "--status", "done"]);
    assert!(stderr.contains("Must be one of"));
}

#[test]
fn test_delete_needs_yes_without_terminal() {
    let sf = ShopfloorTest::new();
    sf.write_session("abc", "maria", "production_manager");

    let stderr = sf.run_failure(&["delete", "4"]);
    assert!(stderr.contains("--yes"));
}

#[test]
fn test_operator_cannot_delete() {
    let sf = ShopfloorTest::new();
    sf.write_session("abc", "budi", "operator");

    let stderr = sf.run_failure(&["delete", "4", "--yes"]);
    assert!(stderr.contains("permission denied"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_calls_endpoint_once() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/work-orders/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/work-orders/4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "work_order": work_order_json(4, "pending", 0) })),
        )
        .mount(&server)
        .await;

    let sf = ShopfloorTest::with_api(&format!("{}/api", server.uri()));
    sf.write_session("abc", "maria", "production_manager");

    let output = sf.run_success(&["delete", "4", "--yes", "--json"]);
    let deleted = parse_json(&output);
    assert_eq!(deleted["id"], 4);
    assert_eq!(deleted["action"], "deleted");
    assert_eq!(deleted["work_order_number"], "WO-20240501-004");
}

#[test]
fn test_empty_note_is_rejected() {
    let sf = ShopfloorTest::new();
    sf.write_session("abc", "budi", "operator");

    let stderr = sf.run_failure(&["note", "4", "   "]);
    assert!(stderr.contains("empty"));
}

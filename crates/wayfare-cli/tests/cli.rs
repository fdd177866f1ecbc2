//! CLI tests against a mock API.
//!
//! Each test gets its own data directory via `WAYFARE_HOME`.

mod common;

use std::path::Path;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli_failure, run_cli_success};

fn init_config(home: &Path, api_url: &str) {
    run_cli_success(
        &[
            "config",
            "init",
            "--client-id",
            "client-abc",
            "--api-url",
            api_url,
            "--scope",
            "profile",
        ],
        home,
    );
}

#[test]
fn test_config_init_and_show() {
    let home = tempfile::tempdir().unwrap();
    init_config(home.path(), "https://api.example.com");

    let stdout = run_cli_success(&["config", "show"], home.path());
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(config["client_id"], "client-abc");
    assert_eq!(config["scopes"], json!(["profile"]));
}

#[test]
fn test_config_init_rejects_plain_http() {
    let home = tempfile::tempdir().unwrap();
    let stderr = run_cli_failure(
        &[
            "config",
            "init",
            "--client-id",
            "client-abc",
            "--api-url",
            "http://api.example.com",
        ],
        home.path(),
    );
    assert!(stderr.contains("Invalid API URL"));
}

#[test]
fn test_token_show_never_prints_secrets() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(
        &[
            "token",
            "set",
            "--access-token",
            "secret-access",
            "--refresh-token",
            "secret-refresh",
            "--expires-in",
            "3600",
        ],
        home.path(),
    );

    let stdout = run_cli_success(&["token", "show"], home.path());
    assert!(stdout.contains("Refresh token"));
    assert!(!stdout.contains("secret-access"));
    assert!(!stdout.contains("secret-refresh"));
}

#[test]
fn test_request_without_tokens_fails() {
    let home = tempfile::tempdir().unwrap();
    init_config(home.path(), "https://api.example.com");

    let stderr = run_cli_failure(&["request", "GET", "/v1.2/me"], home.path());
    assert!(stderr.contains("token set"));
}

#[tokio::test]
async fn test_request_refreshes_and_persists_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.2/me"))
        .and(header("authorization", "Bearer old-access"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new-access",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": "new-refresh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.2/me"))
        .and(header("authorization", "Bearer new-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uuid": "rider-1"})))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let home_path = home.path().to_path_buf();
    let api_url = format!("http://127.0.0.1:{}", server.address().port());

    let stdout = tokio::task::spawn_blocking(move || {
        init_config(&home_path, &api_url);
        run_cli_success(
            &[
                "token",
                "set",
                "--access-token",
                "old-access",
                "--refresh-token",
                "old-refresh",
            ],
            &home_path,
        );
        run_cli_success(&["request", "get", "/v1.2/me"], &home_path)
    })
    .await
    .unwrap();

    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["uuid"], "rider-1");

    let stored = std::fs::read_to_string(home.path().join("session.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored["access_token"], "new-access");
    assert_eq!(stored["refresh_token"], "new-refresh");
}

#[tokio::test]
async fn test_request_with_server_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.2/products"))
        .and(header("authorization", "Token srv-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let home_path = home.path().to_path_buf();
    let api_url = format!("http://127.0.0.1:{}", server.address().port());

    let stdout = tokio::task::spawn_blocking(move || {
        init_config(&home_path, &api_url);
        run_cli_success(
            &["request", "GET", "/v1.2/products", "--server-token", "srv-secret"],
            &home_path,
        )
    })
    .await
    .unwrap();

    assert!(stdout.contains("products"));
}

#[test]
fn test_token_set_rejects_out_of_range_expiry() {
    let home = tempfile::tempdir().unwrap();
    let stderr = run_cli_failure(
        &[
            "token",
            "set",
            "--access-token",
            "access",
            "--expires-in",
            "9223372036854775807",
        ],
        home.path(),
    );

    assert!(stderr.contains("out of range"));
    assert!(!home.path().join("session.json").exists());
}

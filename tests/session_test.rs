//! Credential lifecycle across store persistence and the access gate.

use debate_chat::config::ApiConfig;
use debate_chat::session::{Access, SessionStore};
use tempfile::TempDir;

fn remote_config() -> ApiConfig {
    ApiConfig::new("https://debate.example.com")
}

fn local_config() -> ApiConfig {
    ApiConfig::new("http://localhost:8080")
}

#[test]
fn test_login_logout_round_trip_through_the_gate() {
    let dir = TempDir::new().unwrap();
    let config = remote_config();

    let mut store = SessionStore::new(dir.path().join("api_key"));
    assert_eq!(Access::evaluate(&store, &config), Access::Loading);

    store.init().unwrap();
    assert_eq!(Access::evaluate(&store, &config), Access::LoginRequired);

    store.set("sk-test-123").unwrap();
    assert_eq!(Access::evaluate(&store, &config), Access::Granted);

    // A fresh process sees the persisted credential after its initial read
    let mut reopened = SessionStore::new(dir.path().join("api_key"));
    reopened.init().unwrap();
    assert_eq!(Access::evaluate(&reopened, &config), Access::Granted);

    reopened.clear().unwrap();
    assert_eq!(Access::evaluate(&reopened, &config), Access::LoginRequired);
}

#[test]
fn test_local_host_never_requires_login() {
    let dir = TempDir::new().unwrap();
    let mut store = SessionStore::new(dir.path().join("api_key"));
    store.init().unwrap();

    assert_eq!(Access::evaluate(&store, &local_config()), Access::Granted);
    assert_eq!(Access::evaluate(&store, &ApiConfig::new("http://127.0.0.1:9000")), Access::Granted);
}

#[test]
fn test_whitespace_only_credential_file_means_logged_out() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("api_key"), "\n   \n").unwrap();

    let mut store = SessionStore::new(dir.path().join("api_key"));
    store.init().unwrap();
    assert_eq!(Access::evaluate(&store, &remote_config()), Access::LoginRequired);
}

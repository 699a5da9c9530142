// reef-client/tests/client_integration.rs
// Integration tests: construction, config, and token storage (no live server)

use reef_client::{ClientConfig, TokenStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_token_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = TokenStore::new(temp_dir.path());

    assert!(!store.exists());
    assert!(store.load().is_none());

    store.save("jwt-abc").unwrap();
    assert!(store.exists());
    assert_eq!(store.load().as_deref(), Some("jwt-abc"));

    // Overwrite keeps the newest token
    store.save("jwt-def").unwrap();
    assert_eq!(store.load().as_deref(), Some("jwt-def"));

    store.delete().unwrap();
    assert!(!store.exists());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_token_store_fixed_file_name() {
    let temp_dir = TempDir::new().unwrap();
    let store = TokenStore::new(temp_dir.path());
    assert_eq!(store.path(), temp_dir.path().join("reef-token.json"));
}

#[tokio::test]
async fn test_token_store_creates_missing_work_dir() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("deep").join("work");
    let store = TokenStore::new(&nested);

    store.save("jwt-abc").unwrap();
    assert!(nested.exists());
    assert_eq!(store.load().as_deref(), Some("jwt-abc"));
}

#[tokio::test]
async fn test_token_store_rejects_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = TokenStore::new(temp_dir.path());

    std::fs::write(store.path(), "not json").unwrap();
    assert!(store.exists());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_client_construction_without_token() {
    let client = ClientConfig::new("http://localhost:4000").build_http_client();
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_client_construction_with_token() {
    let client = ClientConfig::new("http://localhost:4000")
        .with_token("jwt-abc")
        .with_timeout(5)
        .build_http_client();
    assert_eq!(client.token(), Some("jwt-abc"));
}

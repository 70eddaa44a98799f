//! Error scenario and edge case tests
//!
//! Run with: cargo test --test error_scenarios_tests
//! Covers:
//! - Configuration errors and defaults
//! - Server error payloads in their different shapes
//! - Corrupt session storage
//! - Status and role parsing edge cases

mod common;

use common::{memory_store, token_for};
use schoolmed::auth::storage::{TOKEN_KEY, USER_KEY};
use schoolmed::auth::{FileStorage, SessionStore, Storage, UserRole};
use schoolmed::config::{load_config_from_path, save_config};
use schoolmed::error::Error;
use schoolmed::records::Status;
use schoolmed::Config;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// Configuration Error Tests
// ============================================================================

#[test]
fn test_error_config_not_found() {
    let err = load_config_from_path(std::path::Path::new("/nonexistent/schoolmed.toml")).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound));
    assert!(err.to_string().contains("Config file not found"));
    println!("✓ ConfigNotFound error: {}", err);
}

#[test]
fn test_error_config_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schoolmed.toml");
    fs::write(&path, "this is [ not valid toml").unwrap();

    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::TomlParse(_)));
    assert!(err.to_string().contains("TOML"), "Error should mention TOML");
    println!("✓ TOML parse error: {}", err);
}

#[test]
fn test_config_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schoolmed.toml");
    fs::write(&path, "[api]\ntimeout_secs = 5\n").unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.api.timeout_secs, 5);
    assert!(config.api.logout_on_forbidden);
    assert!(config.session.require_expiry);
    assert!(config.integrations.editor_license_key.is_none());
    println!("✓ Partial config filled with defaults");
}

#[test]
fn test_config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schoolmed.toml");

    let mut config = Config::default();
    config.api.base_url = "https://health.school.edu/api/".to_string();
    config.session.require_expiry = false;
    config.integrations.captcha_site_key = Some("site-key".to_string());
    save_config(&config, &path).unwrap();

    let reloaded = load_config_from_path(&path).unwrap();
    assert!(!reloaded.session.require_expiry);
    assert_eq!(reloaded.integrations.captcha_site_key.as_deref(), Some("site-key"));
    assert_eq!(
        reloaded.api.endpoint("/students"),
        "https://health.school.edu/api/students"
    );
    println!("✓ Config saved and reloaded");
}

#[test]
fn test_config_interpolates_with_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schoolmed.toml");
    fs::write(
        &path,
        "[session]\nstorage_path = \"${SCHOOLMED_UNSET_SESSION_DIR:-/tmp/sm}/session.json\"\n",
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(
        config.session.storage_path,
        std::path::PathBuf::from("/tmp/sm/session.json")
    );
    println!("✓ Env default interpolated");
}

// ============================================================================
// Server Error Payload Tests
// ============================================================================

#[test]
fn test_error_field_map_shape() {
    let err = Error::Api {
        status: 400,
        body: json!({
            "message": "Validation failed",
            "errors": {"email": ["Email is invalid", "Email is required"], "phone": "Too short"}
        }),
    };
    let fields = err.field_errors();
    assert_eq!(fields["email"], "Email is invalid");
    assert_eq!(fields["phone"], "Too short");
    println!("✓ Map-shaped validation errors: {:?}", fields);
}

#[test]
fn test_error_code_maps_to_field() {
    let err = Error::Api {
        status: 409,
        body: json!({"message": "Email already registered", "code": "EMAIL_EXISTS"}),
    };
    assert_eq!(err.field_errors()["email"], "Email already registered");
    println!("✓ Error code mapped to email field");
}

#[test]
fn test_error_unexpected_payload_shapes() {
    for body in [json!("plain text"), json!(null), json!([1, 2, 3]), json!({"errors": 42})] {
        let err = Error::Api {
            status: 500,
            body: body.clone(),
        };
        assert!(err.field_errors().is_empty(), "{} should have no field errors", body);
        assert_eq!(err.status(), Some(500));
    }
    println!("✓ Unexpected payloads yield no field errors");
}

#[test]
fn test_error_non_api_variants() {
    let err = Error::NotAuthenticated;
    assert_eq!(err.status(), None);
    assert!(!err.is_timeout());
    assert!(err.field_errors().is_empty());
    assert!(err.to_string().contains("schoolmed login"));
    println!("✓ NotAuthenticated: {}", err);
}

// ============================================================================
// Session Storage Error Tests
// ============================================================================

#[test]
fn test_corrupt_session_file_starts_logged_out() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "{ not json").unwrap();

    let store = SessionStore::new(Arc::new(FileStorage::new(&path)));
    store.initialize();
    assert!(store.is_ready());
    assert!(!store.is_authenticated());
    println!("✓ Corrupt session file ignored");
}

#[test]
fn test_unreadable_user_snapshot_falls_back_to_claims() {
    let (store, storage) = memory_store();
    storage.set(TOKEN_KEY, &token_for("n-4", "nurse", 3600)).unwrap();
    storage.set(USER_KEY, "{ broken").unwrap();

    store.initialize();
    let user = store.current_user().expect("identity from claims");
    assert_eq!(user.id, "n-4");
    assert_eq!(user.role, UserRole::Nurse);
    println!("✓ Identity re-derived from token claims");
}

#[test]
fn test_user_snapshot_without_token_is_discarded() {
    let (store, storage) = memory_store();
    storage
        .set(USER_KEY, r#"{"id":"a-1","email":"a@school.edu","role":"admin"}"#)
        .unwrap();

    store.initialize();
    assert!(!store.is_authenticated());
    assert!(storage.get(USER_KEY).is_none());
    println!("✓ Orphan user snapshot cleared");
}

// ============================================================================
// Parsing Edge Cases
// ============================================================================

#[test]
fn test_status_codes_and_synonyms() {
    assert_eq!("approved".parse::<Status>().unwrap(), Status::Approved);
    assert_eq!("IN_PROGRESS".parse::<Status>().unwrap(), Status::InProgress);
    assert!(matches!("escalated".parse::<Status>().unwrap(), Status::Other(_)));
    println!("✓ Status parsing");
}

#[test]
fn test_role_parsing_is_case_insensitive() {
    assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
    assert_eq!(" Parent ".parse::<UserRole>().unwrap(), UserRole::Parent);
    let other: UserRole = "janitor".parse().unwrap();
    assert!(!other.is_known());
    assert!(other.home_path().is_none());
    println!("✓ Role parsing");
}

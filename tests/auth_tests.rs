//! Session restore, login/logout and token validation tests
//!
//! Run with: cargo test --test auth_tests

mod common;

use common::{memory_store, mint_token, now, token_for, user};
use schoolmed::auth::storage::{TOKEN_KEY, USER_KEY};
use schoolmed::auth::{decode_claims, FileStorage, SessionStore, Storage, UserRole};
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// Token decoding
// ============================================================================

#[test]
fn test_malformed_tokens_never_authenticate() {
    let garbage = [
        "",
        "not-a-jwt-token",
        "only.two",
        "a.b.c.d",
        "invalid.token.here",
        "eyJhbGciOiJIUzI1NiJ9.!!!.sig",
        "eyJhbGciOiJIUzI1NiJ9.bm90IGpzb24.sig",
    ];

    for token in garbage {
        assert!(decode_claims(token).is_err(), "{:?} should not decode", token);

        let (store, storage) = memory_store();
        storage.set(TOKEN_KEY, token).unwrap();
        storage.set(USER_KEY, "{}").unwrap();

        store.initialize();
        assert!(store.is_ready());
        assert!(!store.is_authenticated(), "{:?} should not authenticate", token);
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }
}

#[test]
fn test_jwt_token_format() {
    let token = token_for("n-1", "nurse", 3600);
    assert_eq!(token.split('.').count(), 3); // JWT format: header.payload.signature
    let claims = decode_claims(&token).expect("Failed to decode token");
    assert_eq!(claims.role, UserRole::Nurse);
    assert_eq!(claims.email, "n-1@school.edu");
}

// ============================================================================
// Expiry enforcement
// ============================================================================

#[test]
fn test_expired_token_clears_storage() {
    let (store, storage) = memory_store();
    let token = token_for("p-1", "parent", -1);
    store.login(user("p-1", UserRole::Parent), &token).unwrap();

    // Next load
    let reloaded = SessionStore::new(storage.clone());
    reloaded.initialize();

    assert!(reloaded.is_ready());
    assert!(!reloaded.is_authenticated());
    assert!(reloaded.current_user().is_none());
    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(storage.get(USER_KEY).is_none());
}

#[test]
fn test_token_without_expiry_is_rejected_by_default() {
    let (store, storage) = memory_store();
    let token = mint_token(serde_json::json!({"sub": "a-1", "role": "admin"}));
    storage.set(TOKEN_KEY, &token).unwrap();

    store.initialize();
    assert!(!store.is_authenticated());
    assert!(storage.get(TOKEN_KEY).is_none());
}

#[test]
fn test_token_without_expiry_allowed_when_configured() {
    let storage = Arc::new(schoolmed::auth::MemoryStorage::new());
    let token = mint_token(serde_json::json!({"sub": "a-1", "role": "admin"}));
    storage.set(TOKEN_KEY, &token).unwrap();

    let store = SessionStore::new(storage.clone()).with_require_expiry(false);
    store.initialize();
    assert!(store.is_authenticated());
    assert_eq!(store.current_user().unwrap().role, UserRole::Admin);
}

// ============================================================================
// Restore
// ============================================================================

#[test]
fn test_restore_is_idempotent() {
    let (store, storage) = memory_store();
    let token = token_for("n-7", "nurse", 3600);
    store.login(user("n-7", UserRole::Nurse), &token).unwrap();

    let reloaded = SessionStore::new(storage.clone());
    reloaded.initialize();
    let first = reloaded.current_user();
    reloaded.initialize();
    let second = reloaded.current_user();

    assert!(first.is_some());
    assert_eq!(first, second);
    assert!(reloaded.is_authenticated());
    assert_eq!(storage.get(TOKEN_KEY), Some(token));
}

#[test]
fn test_restore_uses_exact_expiry_comparison() {
    let (store, storage) = memory_store();
    let exp = now() + 100;
    let token = mint_token(serde_json::json!({"sub": "1", "role": "parent", "exp": exp}));
    storage.set(TOKEN_KEY, &token).unwrap();

    store.initialize_at(exp);
    assert!(store.is_authenticated(), "exp equal to now is still valid");

    storage.set(TOKEN_KEY, &token).unwrap();
    let later = SessionStore::new(storage.clone());
    later.initialize_at(exp + 1);
    assert!(!later.is_authenticated());
}

// ============================================================================
// Login / logout
// ============================================================================

#[test]
fn test_logout_clears_storage() {
    let (store, storage) = memory_store();
    store
        .login(user("a-1", UserRole::Admin), &token_for("a-1", "admin", 3600))
        .unwrap();
    assert!(storage.get(TOKEN_KEY).is_some());
    assert!(storage.get(USER_KEY).is_some());

    store.logout();
    assert!(!store.is_authenticated());
    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(storage.get(USER_KEY).is_none());
}

#[test]
fn test_logout_when_logged_out() {
    let (store, storage) = memory_store();
    store.logout();
    store.logout();
    assert!(!store.is_authenticated());
    assert!(storage.get(TOKEN_KEY).is_none());
}

#[test]
fn test_login_does_not_validate_token() {
    let (store, storage) = memory_store();
    store.login(user("p-2", UserRole::Parent), "opaque").unwrap();
    assert!(store.is_authenticated());
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("opaque"));
}

#[test]
fn test_session_survives_restart_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".schoolmed").join("session.json");

    let store = SessionStore::new(Arc::new(FileStorage::new(&path)));
    store.initialize();
    store
        .login(user("p-3", UserRole::Parent), &token_for("p-3", "parent", 3600))
        .unwrap();

    let restarted = SessionStore::new(Arc::new(FileStorage::new(&path)));
    restarted.initialize();
    assert!(restarted.is_authenticated());
    assert_eq!(restarted.current_user().unwrap().id, "p-3");

    restarted.logout();
    assert!(!path.exists());
}

#[tokio::test]
async fn test_ready_flag_notifies_subscribers() {
    let (store, _) = memory_store();
    let mut rx = store.subscribe();
    assert!(!rx.borrow().ready);

    store.initialize();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().ready);
}

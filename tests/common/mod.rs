//! Shared helpers for integration tests

#![allow(dead_code)]

use jsonwebtoken::{encode, EncodingKey, Header};
use schoolmed::auth::{MemoryStorage, SessionStore, User, UserRole};
use std::sync::Arc;

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Mint a signed token with the given payload
pub fn mint_token(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-signing-key"),
    )
    .expect("Failed to create token")
}

/// Token for `role` expiring `ttl` seconds from now (negative for the past)
pub fn token_for(id: &str, role: &str, ttl: i64) -> String {
    mint_token(serde_json::json!({
        "sub": id,
        "email": format!("{}@school.edu", id),
        "role": role,
        "iat": now(),
        "exp": now() + ttl,
    }))
}

pub fn user(id: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        email: format!("{}@school.edu", id),
        role,
        student_ids: vec![],
        expires_at: Some(now() + 3600),
    }
}

pub fn memory_store() -> (SessionStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    (SessionStore::new(storage.clone()), storage)
}

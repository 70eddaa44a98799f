//! Session management
//!
//! [`SessionStore`] is the single owner of "who is logged in". It restores
//! the persisted token on start, and `login`/`logout` are the only paths
//! that mutate it. Consumers read snapshots or subscribe for changes.

use crate::auth::jwt::decode_claims;
use crate::auth::models::User;
use crate::auth::storage::{Storage, TOKEN_KEY, USER_KEY};
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// Observable session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Identity of the logged-in user
    pub user: Option<User>,
    pub authenticated: bool,
    /// Set once `initialize` has run, whatever its outcome
    pub ready: bool,
}

/// Why a persisted token was rejected on restore
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rejection {
    Missing,
    Malformed(String),
    NoExpiry,
    Expired { exp: i64, now: i64 },
}

/// Shared handle to the session. Clones see the same state.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    state: Arc<watch::Sender<SessionState>>,
    require_expiry: bool,
}

impl SessionStore {
    /// Create a store over `storage`. Nothing is read until `initialize`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            storage,
            state: Arc::new(state),
            require_expiry: true,
        }
    }

    pub fn with_require_expiry(mut self, require: bool) -> Self {
        self.require_expiry = require;
        self
    }

    /// Restore the session from storage.
    ///
    /// Invalid, undecodable or expired tokens clear both persisted entries
    /// and leave the session empty. Never fails; `ready` is set on every
    /// path.
    pub fn initialize(&self) {
        self.initialize_at(chrono::Utc::now().timestamp());
    }

    /// `initialize` against an explicit clock (seconds since epoch)
    pub fn initialize_at(&self, now: i64) {
        match self.restore(now) {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, role = %user.role, "Session restored");
                self.state.send_modify(|state| {
                    state.user = Some(user);
                    state.authenticated = true;
                });
            }
            Err(rejection) => {
                if rejection != Rejection::Missing {
                    tracing::info!(reason = ?rejection, "Discarding persisted session");
                }
                self.clear_persisted();
                self.state.send_modify(|state| {
                    state.user = None;
                    state.authenticated = false;
                });
            }
        }

        self.state.send_modify(|state| state.ready = true);
    }

    fn restore(&self, now: i64) -> std::result::Result<User, Rejection> {
        let token = self.storage.get(TOKEN_KEY).ok_or(Rejection::Missing)?;
        let claims = decode_claims(&token).map_err(|e| Rejection::Malformed(e.to_string()))?;

        match claims.exp {
            None if self.require_expiry => return Err(Rejection::NoExpiry),
            Some(exp) if exp < now => return Err(Rejection::Expired { exp, now }),
            _ => {}
        }

        let snapshot = self
            .storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok());

        Ok(snapshot.unwrap_or_else(|| {
            tracing::debug!("Identity snapshot missing or unreadable, using token claims");
            claims.to_user()
        }))
    }

    /// Mark the session authenticated and persist identity and token.
    ///
    /// The token is not re-validated here; it was checked where it was
    /// issued. The in-memory state changes even if persisting fails.
    pub fn login(&self, user: User, token: &str) -> Result<()> {
        let serialized = serde_json::to_string(&user)?;

        self.state.send_modify(|state| {
            state.user = Some(user);
            state.authenticated = true;
        });

        self.storage.set(USER_KEY, &serialized)?;
        self.storage.set(TOKEN_KEY, token)?;
        Ok(())
    }

    /// Drop the in-memory identity and both persisted entries. Idempotent.
    pub fn logout(&self) {
        self.state.send_modify(|state| {
            state.user = None;
            state.authenticated = false;
        });
        self.clear_persisted();
    }

    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, "Failed to clear persisted session entry: {}", e);
            }
        }
    }

    /// Currently persisted token, if any
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().authenticated
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receive every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .field("require_expiry", &self.require_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::UserRole;
    use crate::auth::storage::MemoryStorage;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const NOW: i64 = 1_700_000_000;

    fn token_with(claims: serde_json::Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap()
    }

    fn nurse() -> User {
        User {
            id: "n-1".to_string(),
            email: "nurse@school.edu".to_string(),
            role: UserRole::Nurse,
            student_ids: vec![],
            expires_at: Some(NOW + 3600),
        }
    }

    fn store() -> (SessionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (SessionStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_initialize_empty_storage() {
        let (store, _) = store();
        assert!(!store.is_ready());
        store.initialize_at(NOW);
        assert!(store.is_ready());
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_initialize_restores_snapshot() {
        let (store, storage) = store();
        let token = token_with(serde_json::json!({"sub": "n-1", "role": "nurse", "exp": NOW + 60}));
        storage.set(TOKEN_KEY, &token).unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&nurse()).unwrap())
            .unwrap();

        store.initialize_at(NOW);
        assert!(store.is_authenticated());
        assert_eq!(store.current_user(), Some(nurse()));
    }

    #[test]
    fn test_initialize_falls_back_to_claims() {
        let (store, storage) = store();
        let token = token_with(serde_json::json!({"sub": "p-9", "role": "parent", "exp": NOW + 60}));
        storage.set(TOKEN_KEY, &token).unwrap();
        storage.set(USER_KEY, "{broken").unwrap();

        store.initialize_at(NOW);
        let user = store.current_user().expect("user restored from claims");
        assert_eq!(user.id, "p-9");
        assert_eq!(user.role, UserRole::Parent);
    }

    #[test]
    fn test_missing_expiry_policy() {
        let token = token_with(serde_json::json!({"sub": "a", "role": "admin"}));

        let (strict, storage) = store();
        storage.set(TOKEN_KEY, &token).unwrap();
        strict.initialize_at(NOW);
        assert!(!strict.is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());

        let (lenient, storage) = store();
        let lenient = lenient.with_require_expiry(false);
        storage.set(TOKEN_KEY, &token).unwrap();
        lenient.initialize_at(NOW);
        assert!(lenient.is_authenticated());
    }

    #[test]
    fn test_login_then_logout() {
        let (store, storage) = store();
        store.login(nurse(), "t.o.k").unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("t.o.k"));

        store.logout();
        store.logout();
        assert!(!store.is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (store, _) = store();
        let mut rx = store.subscribe();

        store.login(nurse(), "t.o.k").unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().authenticated);

        store.logout();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().authenticated);
    }

    #[test]
    fn test_clones_share_state() {
        let (store, _) = store();
        let other = store.clone();
        store.login(nurse(), "t.o.k").unwrap();
        assert!(other.is_authenticated());
    }
}

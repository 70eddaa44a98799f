//! Authentication and session management

pub mod guard;
pub mod jwt;
pub mod login;
pub mod models;
pub mod session;
pub mod storage;

pub use guard::{evaluate, GuardDecision, Route};
pub use jwt::{decode_claims, Claims};
pub use login::login;
pub use models::{User, UserRole};
pub use session::{SessionState, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage};

//! Credential login flow

use crate::api::{self, ApiClient};
use crate::auth::jwt::decode_claims;
use crate::auth::models::{LoginRequest, User};
use crate::auth::session::SessionStore;
use crate::error::Result;

/// Exchange credentials for a token, derive the identity from it and
/// start the session.
pub async fn login(
    client: &ApiClient,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<User> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };

    let response = api::auth::login(client, &request).await?;
    let claims = decode_claims(&response.token)?;
    let mut user = claims.to_user();
    if user.email.is_empty() {
        user.email = request.email;
    }

    store.login(user.clone(), &response.token)?;
    tracing::info!(user_id = %user.id, role = %user.role, "Logged in");
    Ok(user)
}

//! `/auth` endpoints

use crate::api::envelope::unwrap_data;
use crate::api::ApiClient;
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::error::Result;

/// `POST /auth/login`
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginResponse> {
    let body: serde_json::Value = client.post("/auth/login", request).await?;
    Ok(unwrap_data(body)?)
}

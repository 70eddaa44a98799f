//! HTTP transport shared by every endpoint wrapper
//!
//! This is the only place the bearer credential is attached and the only
//! place a 403 is read as "session no longer valid".

use crate::api::envelope::{ApiErrorBody, Page, PageEnvelope, PageRequest};
use crate::auth::SessionStore;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Typed client for the backend REST API
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client with the configured base URL and request timeout
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, self.request(Method::GET, path))
            .await
    }

    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::GET, path, self.request(Method::GET, path).query(query))
            .await
    }

    /// Fetch one page of a list endpoint, whichever envelope it answers with
    pub async fn get_page<Q, T>(&self, path: &str, page: PageRequest, filters: &Q) -> Result<Page<T>>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .request(Method::GET, path)
            .query(&page)
            .query(filters);
        let envelope: PageEnvelope<T> = self.send(Method::GET, path, builder).await?;
        Ok(envelope.into_page(page))
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, self.request(Method::POST, path).json(body))
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, self.request(Method::PUT, path).json(body))
            .await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, path, self.request(Method::PATCH, path).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        tracing::debug!(%method, path, "API request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::error!(%method, path, "API request timed out: {}", e);
            } else {
                tracing::error!(%method, path, "No response from API: {}", e);
            }
            Error::Http(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(%method, path, status = status.as_u16(), "Failed to read API response: {}", e);
            Error::Http(e)
        })?;

        if status.is_success() {
            let body = if bytes.is_empty() { &b"null"[..] } else { &bytes[..] };
            return serde_json::from_slice(body).map_err(|e| {
                tracing::error!(%method, path, status = status.as_u16(), "Unexpected response shape: {}", e);
                Error::Json(e)
            });
        }

        let body = serde_json::from_slice::<serde_json::Value>(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        });
        self.report_failure(&method, path, status, &body);

        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }

    fn report_failure(&self, method: &Method, path: &str, status: StatusCode, body: &serde_json::Value) {
        let parsed = ApiErrorBody::from_value(body);

        if !parsed.errors.is_empty() {
            for error in &parsed.errors {
                tracing::warn!(%method, path, field = %error.field, "Validation error: {}", error.message);
            }
            return;
        }

        let message = parsed.message.as_deref().unwrap_or("");
        match status {
            StatusCode::FORBIDDEN => {
                tracing::warn!(%method, path, "Session expired or access denied: {}", message);
                if self.config.logout_on_forbidden {
                    self.session.logout();
                }
            }
            StatusCode::NOT_FOUND => {
                tracing::warn!(%method, path, "Resource not found: {}", message);
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(%method, path, "Server error: {}", message);
            }
            _ => {
                tracing::warn!(%method, path, status = status.as_u16(), "API request failed: {}", message);
            }
        }
    }
}

//! Backend REST API: transport, envelopes and typed endpoint wrappers

pub mod appointments;
pub mod auth;
pub mod client;
pub mod directory;
pub mod envelope;
pub mod medical_events;
pub mod medicine_submissions;
pub mod registrations;

pub use client::ApiClient;
pub use envelope::{ApiErrorBody, FieldError, Page, PageRequest};

use crate::records::Status;
use serde::Serialize;

/// Optional server-side filters accepted by list endpoints
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl ListQuery {
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }
}

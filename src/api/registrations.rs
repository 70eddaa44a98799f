//! Campaign registration endpoints
//!
//! Vaccination and medical-check registrations share one shape and differ
//! only in their base path.

use crate::api::envelope::{unwrap_data, Page, PageRequest};
use crate::api::{ApiClient, ListQuery};
use crate::error::Result;
use crate::records::{NewRegistration, Registration, StatusUpdate};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campaign {
    Vaccination,
    MedicalCheck,
}

impl Campaign {
    pub fn path(&self) -> &'static str {
        match self {
            Campaign::Vaccination => "/vaccination-registrations",
            Campaign::MedicalCheck => "/medical-check-registrations",
        }
    }
}

impl fmt::Display for Campaign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Campaign::Vaccination => write!(f, "vaccination"),
            Campaign::MedicalCheck => write!(f, "medical check"),
        }
    }
}

pub async fn list(
    client: &ApiClient,
    campaign: Campaign,
    page: PageRequest,
    query: &ListQuery,
) -> Result<Page<Registration>> {
    client.get_page(campaign.path(), page, query).await
}

pub async fn register(
    client: &ApiClient,
    campaign: Campaign,
    registration: &NewRegistration,
) -> Result<Registration> {
    let body: serde_json::Value = client.post(campaign.path(), registration).await?;
    Ok(unwrap_data(body)?)
}

pub async fn update_status(
    client: &ApiClient,
    campaign: Campaign,
    id: &str,
    update: &StatusUpdate,
) -> Result<Registration> {
    let body: serde_json::Value = client
        .patch(&format!("{}/{}/status", campaign.path(), id), update)
        .await?;
    Ok(unwrap_data(body)?)
}

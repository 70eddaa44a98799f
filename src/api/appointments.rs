//! `/appointments` endpoints

use crate::api::envelope::{unwrap_data, Page, PageRequest};
use crate::api::{ApiClient, ListQuery};
use crate::error::Result;
use crate::records::{Appointment, NewAppointment, StatusUpdate};

const PATH: &str = "/appointments";

pub async fn list(client: &ApiClient, page: PageRequest, query: &ListQuery) -> Result<Page<Appointment>> {
    client.get_page(PATH, page, query).await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Appointment> {
    let body: serde_json::Value = client.get(&format!("{}/{}", PATH, id)).await?;
    Ok(unwrap_data(body)?)
}

pub async fn create(client: &ApiClient, appointment: &NewAppointment) -> Result<Appointment> {
    let body: serde_json::Value = client.post(PATH, appointment).await?;
    Ok(unwrap_data(body)?)
}

/// `PATCH /appointments/{id}/status`
pub async fn update_status(client: &ApiClient, id: &str, update: &StatusUpdate) -> Result<Appointment> {
    let body: serde_json::Value = client
        .patch(&format!("{}/{}/status", PATH, id), update)
        .await?;
    Ok(unwrap_data(body)?)
}

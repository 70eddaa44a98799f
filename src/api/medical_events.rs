//! `/medical-events` endpoints

use crate::api::envelope::{unwrap_data, Page, PageRequest};
use crate::api::{ApiClient, ListQuery};
use crate::error::Result;
use crate::records::{MedicalEvent, NewMedicalEvent};

const PATH: &str = "/medical-events";

pub async fn list(client: &ApiClient, page: PageRequest, query: &ListQuery) -> Result<Page<MedicalEvent>> {
    client.get_page(PATH, page, query).await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<MedicalEvent> {
    let body: serde_json::Value = client.get(&format!("{}/{}", PATH, id)).await?;
    Ok(unwrap_data(body)?)
}

pub async fn create(client: &ApiClient, event: &NewMedicalEvent) -> Result<MedicalEvent> {
    let body: serde_json::Value = client.post(PATH, event).await?;
    Ok(unwrap_data(body)?)
}

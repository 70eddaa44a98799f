//! `/medicine-submissions` endpoints

use crate::api::envelope::{unwrap_data, Page, PageRequest};
use crate::api::{ApiClient, ListQuery};
use crate::error::Result;
use crate::records::{MedicineSubmission, NewMedicineSubmission, StatusUpdate};

const PATH: &str = "/medicine-submissions";

pub async fn list(
    client: &ApiClient,
    page: PageRequest,
    query: &ListQuery,
) -> Result<Page<MedicineSubmission>> {
    client.get_page(PATH, page, query).await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<MedicineSubmission> {
    let body: serde_json::Value = client.get(&format!("{}/{}", PATH, id)).await?;
    Ok(unwrap_data(body)?)
}

pub async fn create(client: &ApiClient, submission: &NewMedicineSubmission) -> Result<MedicineSubmission> {
    let body: serde_json::Value = client.post(PATH, submission).await?;
    Ok(unwrap_data(body)?)
}

pub async fn update_status(
    client: &ApiClient,
    id: &str,
    update: &StatusUpdate,
) -> Result<MedicineSubmission> {
    let body: serde_json::Value = client
        .patch(&format!("{}/{}/status", PATH, id), update)
        .await?;
    Ok(unwrap_data(body)?)
}

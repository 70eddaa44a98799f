//! Users, classes and students

use crate::api::envelope::{unwrap_data, Page, PageRequest};
use crate::api::{ApiClient, ListQuery};
use crate::error::Result;
use crate::records::{NewUser, SchoolClass, Student, UserAccount};
use futures_util::future::try_join_all;

pub async fn list_users(client: &ApiClient, page: PageRequest, query: &ListQuery) -> Result<Page<UserAccount>> {
    client.get_page("/users", page, query).await
}

pub async fn get_user(client: &ApiClient, id: &str) -> Result<UserAccount> {
    let body: serde_json::Value = client.get(&format!("/users/{}", id)).await?;
    Ok(unwrap_data(body)?)
}

pub async fn create_user(client: &ApiClient, user: &NewUser) -> Result<UserAccount> {
    let body: serde_json::Value = client.post("/users", user).await?;
    Ok(unwrap_data(body)?)
}

pub async fn delete_user(client: &ApiClient, id: &str) -> Result<()> {
    let _: serde_json::Value = client.delete(&format!("/users/{}", id)).await?;
    Ok(())
}

pub async fn list_classes(client: &ApiClient, page: PageRequest, query: &ListQuery) -> Result<Page<SchoolClass>> {
    client.get_page("/classes", page, query).await
}

pub async fn list_students(client: &ApiClient, page: PageRequest, query: &ListQuery) -> Result<Page<Student>> {
    client.get_page("/students", page, query).await
}

pub async fn get_student(client: &ApiClient, id: &str) -> Result<Student> {
    let body: serde_json::Value = client.get(&format!("/students/{}", id)).await?;
    Ok(unwrap_data(body)?)
}

/// Students linked to a parent: the parent record first, then every
/// child concurrently. Fails if any child lookup fails.
pub async fn children_of(client: &ApiClient, parent_id: &str) -> Result<Vec<Student>> {
    let parent = get_user(client, parent_id).await?;
    tracing::debug!(parent_id, count = parent.student_ids.len(), "Fetching linked students");

    try_join_all(parent.student_ids.iter().map(|id| get_student(client, id))).await
}

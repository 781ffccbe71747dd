//! `/materias` endpoints.

use serde::Serialize;

use super::{segment, search_term, ApiClient, ApiResult};
use crate::domain::Subject;

#[derive(Serialize)]
struct SubjectBody<'a> {
  name: &'a str,
}

pub async fn list_subjects(client: &ApiClient) -> ApiResult<Vec<Subject>> {
  client.get("/materias").await
}

pub async fn get_subject(client: &ApiClient, id: &str) -> ApiResult<Subject> {
  client.get(&format!("/materias/{}", segment(id))).await
}

pub async fn create_subject(client: &ApiClient, name: &str) -> ApiResult<Subject> {
  client.post("/materias", &SubjectBody { name }).await
}

pub async fn update_subject(client: &ApiClient, id: &str, name: &str) -> ApiResult<Subject> {
  client
    .put(&format!("/materias/{}", segment(id)), &SubjectBody { name })
    .await
}

pub async fn delete_subject(client: &ApiClient, id: &str) -> ApiResult<()> {
  client.delete(&format!("/materias/{}", segment(id))).await
}

/// Search subjects by name; a blank query lists everything
pub async fn search_subjects(client: &ApiClient, query: Option<&str>) -> ApiResult<Vec<Subject>> {
  match search_term(query) {
    None => list_subjects(client).await,
    Some(q) => client.get_with_query("/search/materias", &[("q", q)]).await,
  }
}

//! `/temas` endpoints, including the review scheduling ones.

use serde::{Deserialize, Serialize};

use super::{segment, search_term, ApiClient, ApiResult};
use crate::domain::{ReviewSubmission, Topic};

#[derive(Serialize)]
struct NewTopicBody<'a> {
  name: &'a str,
  #[serde(rename = "materiaId")]
  subject_id: &'a str,
}

#[derive(Serialize)]
struct RenameTopicBody<'a> {
  name: &'a str,
}

#[derive(Deserialize)]
struct DueCount {
  #[serde(default)]
  count: Option<u64>,
}

pub async fn list_topics(client: &ApiClient, subject_id: &str) -> ApiResult<Vec<Topic>> {
  client
    .get(&format!("/temas/materia/{}", segment(subject_id)))
    .await
}

pub async fn get_topic(client: &ApiClient, id: &str) -> ApiResult<Topic> {
  client.get(&format!("/temas/{}", segment(id))).await
}

pub async fn create_topic(client: &ApiClient, subject_id: &str, name: &str) -> ApiResult<Topic> {
  client
    .post("/temas", &NewTopicBody { name, subject_id })
    .await
}

pub async fn update_topic(client: &ApiClient, id: &str, name: &str) -> ApiResult<Topic> {
  client
    .put(&format!("/temas/{}", segment(id)), &RenameTopicBody { name })
    .await
}

/// Deleting a topic also deletes its flashcards (server-side)
pub async fn delete_topic(client: &ApiClient, id: &str) -> ApiResult<()> {
  client.delete(&format!("/temas/{}", segment(id))).await
}

/// Search topics of one subject by name; a blank query lists the subject's topics
pub async fn search_topics(
  client: &ApiClient,
  subject_id: &str,
  query: Option<&str>,
) -> ApiResult<Vec<Topic>> {
  match search_term(query) {
    None => list_topics(client, subject_id).await,
    Some(q) => {
      client
        .get_with_query("/search/temas", &[("materiaId", subject_id), ("q", q)])
        .await
    }
  }
}

/// Topics of a subject whose review date has passed, as decided by the server
pub async fn due_topics(client: &ApiClient, subject_id: &str) -> ApiResult<Vec<Topic>> {
  client
    .get(&format!("/temas/due/{}", segment(subject_id)))
    .await
}

/// Number of due topics in a subject; a missing count reads as zero
pub async fn due_topic_count(client: &ApiClient, subject_id: &str) -> ApiResult<u64> {
  let body: DueCount = client
    .get(&format!("/temas/due-count/{}", segment(subject_id)))
    .await?;
  Ok(body.count.unwrap_or(0))
}

/// Report a finished session; the server computes and returns the new `nextReview`
pub async fn mark_topic_reviewed(
  client: &ApiClient,
  id: &str,
  review: &ReviewSubmission,
) -> ApiResult<Topic> {
  client
    .put(&format!("/temas/review/{}", segment(id)), review)
    .await
}

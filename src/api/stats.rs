//! `/stats` endpoints.

use super::{segment, ApiClient, ApiResult};
use crate::domain::{Dashboard, GeneralStats, StudyResult, SubjectStats, TopicStats};

/// Record one answered flashcard for aggregate statistics
pub async fn save_study_result(client: &ApiClient, result: &StudyResult) -> ApiResult<()> {
  client.post_discard("/stats/study-result", result).await
}

pub async fn general_stats(client: &ApiClient) -> ApiResult<GeneralStats> {
  client.get("/stats/general").await
}

pub async fn subject_stats(client: &ApiClient, subject_id: &str) -> ApiResult<SubjectStats> {
  client
    .get(&format!("/stats/materia/{}", segment(subject_id)))
    .await
}

pub async fn topic_stats(client: &ApiClient, topic_id: &str) -> ApiResult<TopicStats> {
  client
    .get(&format!("/stats/tema/{}", segment(topic_id)))
    .await
}

pub async fn dashboard(client: &ApiClient) -> ApiResult<Dashboard> {
  client.get("/stats/dashboard").await
}

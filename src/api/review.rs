//! Cross-subject review lookups built on the per-subject topic endpoints.

use futures::future::join_all;

use super::{due_topic_count, due_topics, list_subjects, ApiClient, ApiResult, LogOnError};
use crate::domain::{Subject, Topic};

/// Due-topic count for one subject
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectReviewCount {
  pub subject: Subject,
  pub count: u64,
}

/// Review counts across all subjects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewCounts {
  /// Sum of due topics over every subject
  pub total_topics: u64,
  /// Subjects with at least one due topic, in the order the server listed them
  pub subjects: Vec<SubjectReviewCount>,
}

impl ReviewCounts {
  pub fn has_reviewable(&self) -> bool {
    !self.subjects.is_empty()
  }
}

/// Fetch due counts for every subject concurrently.
///
/// A subject whose count cannot be fetched is logged and counted as zero;
/// only the subject listing itself can fail the whole call.
pub async fn all_review_counts(client: &ApiClient) -> ApiResult<ReviewCounts> {
  let subjects = list_subjects(client).await?;

  let counts = join_all(subjects.into_iter().map(|subject| async move {
    let count = due_topic_count(client, &subject.id)
      .await
      .log_warn_default(&format!("Failed to fetch due count for {}", subject.name));
    SubjectReviewCount { subject, count }
  }))
  .await;

  let total_topics = counts.iter().map(|c| c.count).sum();
  let subjects = counts.into_iter().filter(|c| c.count > 0).collect();

  Ok(ReviewCounts {
    total_topics,
    subjects,
  })
}

/// The first due topic of the first subject that has any, if there is one
pub async fn next_review_topic(client: &ApiClient) -> ApiResult<Option<(Subject, Topic)>> {
  let counts = all_review_counts(client).await?;
  first_due_topic(client, &counts).await
}

/// Like [`next_review_topic`], reusing counts the caller already has
pub async fn first_due_topic(
  client: &ApiClient,
  counts: &ReviewCounts,
) -> ApiResult<Option<(Subject, Topic)>> {
  let Some(first) = counts.subjects.first() else {
    return Ok(None);
  };

  let topics = due_topics(client, &first.subject.id).await?;
  Ok(topics.into_iter().next().map(|topic| (first.subject.clone(), topic)))
}

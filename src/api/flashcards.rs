//! `/flashcards` endpoints.

use serde::Serialize;

use super::{segment, search_term, ApiClient, ApiResult};
use crate::domain::{Flashcard, FlashcardDraft, PopulatedFlashcard};

#[derive(Serialize)]
struct NewFlashcardBody<'a> {
  question: &'a str,
  answer: &'a str,
  #[serde(rename = "temaId")]
  topic_id: &'a str,
}

pub async fn list_flashcards(client: &ApiClient, topic_id: &str) -> ApiResult<Vec<Flashcard>> {
  client
    .get(&format!("/flashcards/tema/{}", segment(topic_id)))
    .await
}

/// Same endpoint as [`list_flashcards`], read with topic and subject expanded.
/// Used by study sessions, which need the subject id for result reporting.
pub async fn study_flashcards(
  client: &ApiClient,
  topic_id: &str,
) -> ApiResult<Vec<PopulatedFlashcard>> {
  client
    .get(&format!("/flashcards/tema/{}", segment(topic_id)))
    .await
}

pub async fn get_flashcard(client: &ApiClient, id: &str) -> ApiResult<Flashcard> {
  client.get(&format!("/flashcards/{}", segment(id))).await
}

pub async fn create_flashcard(
  client: &ApiClient,
  topic_id: &str,
  draft: &FlashcardDraft,
) -> ApiResult<Flashcard> {
  let body = NewFlashcardBody {
    question: &draft.question,
    answer: &draft.answer,
    topic_id,
  };
  client.post("/flashcards", &body).await
}

pub async fn update_flashcard(
  client: &ApiClient,
  id: &str,
  draft: &FlashcardDraft,
) -> ApiResult<Flashcard> {
  client
    .put(&format!("/flashcards/{}", segment(id)), draft)
    .await
}

pub async fn delete_flashcard(client: &ApiClient, id: &str) -> ApiResult<()> {
  client.delete(&format!("/flashcards/{}", segment(id))).await
}

/// Search a topic's flashcards by question text; a blank query lists the topic's cards
pub async fn search_flashcards(
  client: &ApiClient,
  topic_id: &str,
  query: Option<&str>,
) -> ApiResult<Vec<Flashcard>> {
  match search_term(query) {
    None => list_flashcards(client, topic_id).await,
    Some(q) => {
      client
        .get_with_query("/search/flashcards", &[("temaId", topic_id), ("q", q)])
        .await
    }
  }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::stats::StudyOutcome;
use super::Timestamped;

/// Question/answer pair belonging to a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
  #[serde(rename = "_id")]
  pub id: String,
  pub question: String,
  pub answer: String,
  /// Accepts either a bare id or the expanded topic object
  #[serde(rename = "temaId", deserialize_with = "id_or_ref")]
  pub topic_id: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdOrRef {
  Id(String),
  Ref {
    #[serde(rename = "_id")]
    id: String,
  },
}

fn id_or_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(match IdOrRef::deserialize(deserializer)? {
    IdOrRef::Id(id) | IdOrRef::Ref { id } => id,
  })
}

impl Timestamped for Flashcard {
  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

/// Editable fields of a flashcard (create and update body)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashcardDraft {
  pub question: String,
  pub answer: String,
}

impl FlashcardDraft {
  pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      question: question.into(),
      answer: answer.into(),
    }
  }

  /// Both sides must contain something besides whitespace
  pub fn is_complete(&self) -> bool {
    !self.question.trim().is_empty() && !self.answer.trim().is_empty()
  }
}

/// Subject reference embedded in a populated flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub user_id: String,
}

/// Topic reference embedded in a populated flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRef {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(rename = "materiaId")]
  pub subject: SubjectRef,
}

/// Flashcard as returned for a study session, with its topic and subject expanded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedFlashcard {
  #[serde(rename = "_id")]
  pub id: String,
  pub question: String,
  pub answer: String,
  #[serde(rename = "temaId")]
  pub topic: TopicRef,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl PopulatedFlashcard {
  /// Build the per-answer record reported to the stats endpoint
  pub fn study_result(&self, outcome: StudyOutcome) -> StudyResult {
    StudyResult {
      subject_id: self.topic.subject.id.clone(),
      topic_id: self.topic.id.clone(),
      flashcard_id: self.id.clone(),
      result: outcome,
    }
  }
}

/// Body of `POST /stats/study-result`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyResult {
  #[serde(rename = "materiaId")]
  pub subject_id: String,
  #[serde(rename = "temaId")]
  pub topic_id: String,
  #[serde(rename = "flashcardId")]
  pub flashcard_id: String,
  pub result: StudyOutcome,
}

#[cfg(test)]
mod tests {
  use super::*;

  const POPULATED: &str = r#"{
    "_id": "f1",
    "question": "2 + 2?",
    "answer": "4",
    "temaId": {
      "_id": "t1",
      "name": "Arithmetic",
      "materiaId": { "_id": "m1", "name": "Math", "userId": "u1" }
    },
    "createdAt": "2024-03-01T10:00:00Z",
    "updatedAt": "2024-03-01T10:00:00Z"
  }"#;

  #[test]
  fn test_populated_flashcard_parses_nested_refs() {
    let card: PopulatedFlashcard = serde_json::from_str(POPULATED).unwrap();
    assert_eq!(card.topic.id, "t1");
    assert_eq!(card.topic.subject.id, "m1");
    assert_eq!(card.topic.subject.name, "Math");
  }

  #[test]
  fn test_study_result_from_populated_card() {
    let card: PopulatedFlashcard = serde_json::from_str(POPULATED).unwrap();
    let result = card.study_result(StudyOutcome::Skipped);
    assert_eq!(
      serde_json::to_value(&result).unwrap(),
      serde_json::json!({
        "materiaId": "m1",
        "temaId": "t1",
        "flashcardId": "f1",
        "result": "skipped"
      })
    );
  }

  #[test]
  fn test_plain_flashcard_topic_id() {
    let json = r#"{
      "_id": "f2",
      "question": "q",
      "answer": "a",
      "temaId": "t9",
      "createdAt": "2024-03-01T10:00:00Z",
      "updatedAt": "2024-03-01T10:00:00Z"
    }"#;
    let card: Flashcard = serde_json::from_str(json).unwrap();
    assert_eq!(card.topic_id, "t9");
  }

  #[test]
  fn test_plain_flashcard_from_populated_body() {
    let card: Flashcard = serde_json::from_str(POPULATED).unwrap();
    assert_eq!(card.topic_id, "t1");
  }

  #[test]
  fn test_draft_completeness() {
    assert!(FlashcardDraft::new("q", "a").is_complete());
    assert!(!FlashcardDraft::new("  ", "a").is_complete());
    assert!(!FlashcardDraft::new("q", "\n").is_complete());
    assert!(!FlashcardDraft::default().is_complete());
  }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Timestamped;
use crate::config;

/// Self-assessed difficulty chosen after finishing a study session.
///
/// The server turns this into the topic's next review date; the client only
/// uses the interval for the confirmation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
  #[serde(rename = "facil")]
  Easy,
  #[serde(rename = "medio")]
  Medium,
  #[serde(rename = "dificil")]
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

  /// Wire value sent to the review endpoint
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Easy => "facil",
      Self::Medium => "medio",
      Self::Hard => "dificil",
    }
  }

  /// Accepts both the wire value and the English name
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "facil" | "easy" => Some(Self::Easy),
      "medio" | "medium" => Some(Self::Medium),
      "dificil" | "hard" => Some(Self::Hard),
      _ => None,
    }
  }

  /// Days until the next review, for display only
  pub fn interval_days(&self) -> u32 {
    match self {
      Self::Easy => config::EASY_INTERVAL_DAYS,
      Self::Medium => config::MEDIUM_INTERVAL_DAYS,
      Self::Hard => config::HARD_INTERVAL_DAYS,
    }
  }

  /// Choice label offered when a session completes
  pub fn choice_label(&self) -> String {
    match self {
      Self::Easy => format!("Easy (review in {} days)", self.interval_days()),
      Self::Medium => format!("Medium (review in {} days)", self.interval_days()),
      Self::Hard => "Hard (review tomorrow)".to_string(),
    }
  }
}

/// Grouping of flashcards within a subject (`tema` on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(rename = "materiaId")]
  pub subject_id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next_review: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub review_count: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_difficulty: Option<Difficulty>,
  /// Score of the last completed session, 0-100
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_review_score: Option<u8>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Topic {
  pub fn is_never_studied(&self) -> bool {
    self.next_review.is_none()
  }
}

impl Timestamped for Topic {
  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

/// Body of `PUT /temas/review/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
  pub difficulty: Difficulty,
  pub score: u8,
  pub total_questions: u32,
  pub correct_answers: u32,
}

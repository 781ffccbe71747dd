use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the user answered a single flashcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyOutcome {
  Correct,
  Incorrect,
  Skipped,
}

impl StudyOutcome {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Correct => "correct",
      Self::Incorrect => "incorrect",
      Self::Skipped => "skipped",
    }
  }
}

/// Aggregate answer counts as computed by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyStats {
  pub total: u64,
  pub correct: u64,
  pub incorrect: u64,
  pub skipped: u64,
  pub accuracy: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStats {
  #[serde(rename = "materias")]
  pub subjects: u64,
  #[serde(rename = "temas")]
  pub topics: u64,
  pub flashcards: u64,
}

/// `GET /stats/general`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralStats {
  pub content: ContentStats,
  pub studies: StudyStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectContent {
  #[serde(rename = "temas")]
  pub topics: u64,
  pub flashcards: u64,
}

/// `GET /stats/materia/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
  pub content: SubjectContent,
  pub studies: StudyStats,
  pub last_studied: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicContent {
  pub flashcards: u64,
}

/// `GET /stats/tema/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
  pub content: TopicContent,
  pub studies: StudyStats,
  pub last_studied: Option<DateTime<Utc>>,
}

// ==================== Dashboard ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
  pub date: String,
  #[serde(rename = "temasEstudados")]
  pub topics_studied: u64,
  #[serde(rename = "scoreMedio")]
  pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPerformance {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(rename = "temasEstudados")]
  pub topics_studied: u64,
  #[serde(rename = "scoreMedio")]
  pub average_score: f64,
  /// Milliseconds since the epoch of the last session in this subject
  #[serde(rename = "ultimoEstudo", default)]
  pub last_studied_ms: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
  #[serde(rename = "totalTemasEstudados")]
  pub topics_studied: u64,
  #[serde(rename = "scoreGeral")]
  pub overall_score: f64,
  #[serde(rename = "melhorMateria", default)]
  pub best_subject: Option<SubjectPerformance>,
  /// Consecutive days with at least one session
  #[serde(rename = "sequenciaEstudo")]
  pub streak_days: u64,
  #[serde(rename = "temasParaRever")]
  pub topics_due: u64,
}

/// `GET /stats/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  #[serde(rename = "dailyProgress", default)]
  pub daily_progress: Vec<DailyProgress>,
  #[serde(rename = "materiaStats", default)]
  pub subjects: Vec<SubjectPerformance>,
  #[serde(default)]
  pub summary: DashboardSummary,
}

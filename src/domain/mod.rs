pub mod flashcard;
pub mod stats;
pub mod subject;
pub mod topic;
pub mod user;

use chrono::{DateTime, Utc};

pub use flashcard::{Flashcard, FlashcardDraft, PopulatedFlashcard, StudyResult, SubjectRef, TopicRef};
pub use stats::{
  ContentStats, Dashboard, DailyProgress, DashboardSummary, GeneralStats, StudyOutcome, StudyStats,
  SubjectPerformance, SubjectStats, TopicStats,
};
pub use subject::Subject;
pub use topic::{Difficulty, ReviewSubmission, Topic};
pub use user::{AuthResponse, LoginForm, RegisterForm, User};

/// Entities that carry a server-assigned creation time
pub trait Timestamped {
  fn created_at(&self) -> DateTime<Utc>;
}

/// Server-side records addressed by their `_id`
pub trait Entity: Timestamped {
  fn id(&self) -> &str;
}

impl Entity for Subject {
  fn id(&self) -> &str {
    &self.id
  }
}

impl Entity for Topic {
  fn id(&self) -> &str {
    &self.id
  }
}

impl Entity for Flashcard {
  fn id(&self) -> &str {
    &self.id
  }
}

/// Sort so the most recently created item comes first (list screens show newest on top)
pub fn sort_newest_first<T: Timestamped>(items: &mut [T]) {
  items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

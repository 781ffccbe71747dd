//! Client-side view of topic review scheduling.
//!
//! The server owns the schedule. The client only compares a topic's
//! `next_review` against the clock to decide which bucket to show it in and
//! which countdown label to render.

use chrono::{DateTime, Utc};

use crate::domain::Topic;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// True iff the topic has a review date and that date is not in the future
pub fn is_due(topic: &Topic, now: DateTime<Utc>) -> bool {
  topic.next_review.is_some_and(|next| next <= now)
}

/// Topics split into those due for review and the rest
#[derive(Debug, Clone, PartialEq)]
pub struct DueBuckets<'a> {
  pub due: Vec<&'a Topic>,
  /// Includes never-studied topics
  pub not_due: Vec<&'a Topic>,
}

/// Partition topics by due-ness, keeping their relative order
pub fn partition_due(topics: &[Topic], now: DateTime<Utc>) -> DueBuckets<'_> {
  let (due, not_due): (Vec<&Topic>, Vec<&Topic>) =
    topics.iter().partition(|topic| is_due(topic, now));
  DueBuckets { due, not_due }
}

/// Countdown shown next to a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
  NeverStudied,
  ReadyNow,
  Tomorrow,
  InDays(i64),
}

impl ReviewStatus {
  /// Classify by whole days remaining, rounding partial days up
  pub fn of(next_review: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
    let Some(next) = next_review else {
      return Self::NeverStudied;
    };

    let remaining = (next - now).num_milliseconds();
    // ceil(remaining / day) for both signs
    let days =
      remaining.div_euclid(MS_PER_DAY) + i64::from(remaining.rem_euclid(MS_PER_DAY) != 0);

    match days {
      d if d <= 0 => Self::ReadyNow,
      1 => Self::Tomorrow,
      d => Self::InDays(d),
    }
  }

  pub fn for_topic(topic: &Topic, now: DateTime<Utc>) -> Self {
    Self::of(topic.next_review, now)
  }

  pub fn label(&self) -> String {
    match self {
      Self::NeverStudied => "Never studied".to_string(),
      Self::ReadyNow => "Ready to review!".to_string(),
      Self::Tomorrow => "Review tomorrow".to_string(),
      Self::InDays(days) => format!("Review in {} days", days),
    }
  }

  /// Whether the study action is offered for a topic in this state
  pub fn offers_study(&self) -> bool {
    matches!(self, Self::NeverStudied | Self::ReadyNow)
  }
}

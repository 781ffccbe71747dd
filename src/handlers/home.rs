//! Home overview: greeting, totals and what to review next.

use super::{AlertOnError, Ui};
use crate::api::{self, ApiClient, ReviewCounts, SubjectReviewCount};
use crate::auth::AuthStore;
use crate::domain::{GeneralStats, Subject, Topic, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeOverview {
  pub user: Option<User>,
  pub stats: Option<GeneralStats>,
  pub review: ReviewCounts,
}

impl HomeOverview {
  /// Subject opened by the "quick review" action
  pub fn quick_review_target(&self) -> Option<&SubjectReviewCount> {
    self.review.subjects.first()
  }

  /// Choices offered when the user asks what to review
  pub fn review_options(&self) -> Vec<String> {
    self.review.subjects.iter().map(review_option_label).collect()
  }
}

pub fn review_option_label(entry: &SubjectReviewCount) -> String {
  format!(
    "{} ({} {})",
    entry.subject.name,
    entry.count,
    if entry.count == 1 { "topic" } else { "topics" }
  )
}

/// Gather everything the home screen shows.
///
/// Each part fails independently: a failure is alerted and leaves that part empty.
pub async fn load_home(client: &ApiClient, store: &AuthStore, ui: &mut dyn Ui) -> HomeOverview {
  let user = store.user();

  let stats = api::general_stats(client)
    .await
    .or_alert(ui, "Could not load statistics");

  let review = api::all_review_counts(client)
    .await
    .or_alert(ui, "Could not load review counts")
    .unwrap_or_default();

  HomeOverview {
    user,
    stats,
    review,
  }
}

/// First due topic across subjects, or `None` when everything is up to date
pub async fn next_review(client: &ApiClient, ui: &mut dyn Ui) -> Option<(Subject, Topic)> {
  api::next_review_topic(client)
    .await
    .or_alert(ui, "Could not find a topic to review")
    .flatten()
}

/// First due topic of the overview's quick review subject, without recounting
pub async fn next_review_for(
  client: &ApiClient,
  ui: &mut dyn Ui,
  overview: &HomeOverview,
) -> Option<(Subject, Topic)> {
  api::first_due_topic(client, &overview.review)
    .await
    .or_alert(ui, "Could not find a topic to review")
    .flatten()
}

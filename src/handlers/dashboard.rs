//! Dashboard and per-subject / per-topic statistics.

use super::{AlertOnError, Ui};
use crate::api::{self, ApiClient};
use crate::domain::{Dashboard, SubjectStats, TopicStats};

/// "No days", "1 day" or "N days"
pub fn streak_label(days: u64) -> String {
  match days {
    0 => "No days".to_string(),
    1 => "1 day".to_string(),
    n => format!("{} days", n),
  }
}

pub async fn load_dashboard(client: &ApiClient, ui: &mut dyn Ui) -> Option<Dashboard> {
  api::dashboard(client)
    .await
    .or_alert(ui, "Could not load the dashboard")
}

pub async fn load_subject_stats(
  client: &ApiClient,
  ui: &mut dyn Ui,
  subject_id: &str,
) -> Option<SubjectStats> {
  api::subject_stats(client, subject_id)
    .await
    .or_alert(ui, "Could not load subject statistics")
}

pub async fn load_topic_stats(
  client: &ApiClient,
  ui: &mut dyn Ui,
  topic_id: &str,
) -> Option<TopicStats> {
  api::topic_stats(client, topic_id)
    .await
    .or_alert(ui, "Could not load topic statistics")
}

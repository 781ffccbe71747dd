//! Topic list screen for one subject.

use chrono::{DateTime, Utc};

use super::{apply_listing, AlertOnError, Listing, Ui};
use crate::api::{self, ApiClient, ApiResult};
use crate::domain::{Topic, TopicStats};
use crate::search::SearchRequest;
use crate::srs::{partition_due, DueBuckets, ReviewStatus};
use crate::validation::validate_name;

pub struct TopicsScreen {
  client: ApiClient,
  subject_id: String,
  listing: Listing<Topic>,
}

impl TopicsScreen {
  pub fn new(client: ApiClient, subject_id: impl Into<String>) -> Self {
    Self {
      client,
      subject_id: subject_id.into(),
      listing: Listing::default(),
    }
  }

  pub fn topics(&self) -> &[Topic] {
    self.listing.items()
  }

  pub fn find(&self, id: &str) -> Option<&Topic> {
    self.listing.find(id)
  }

  /// Topics split into "ready for review" and "others" at `now`
  pub fn grouped(&self, now: DateTime<Utc>) -> DueBuckets<'_> {
    partition_due(self.listing.items(), now)
  }

  /// Topics paired with their countdown at `now`
  pub fn statuses(&self, now: DateTime<Utc>) -> Vec<(&Topic, ReviewStatus)> {
    self
      .listing
      .items()
      .iter()
      .map(|topic| (topic, ReviewStatus::for_topic(topic, now)))
      .collect()
  }

  pub async fn load(&mut self, ui: &mut dyn Ui) -> bool {
    self.search(ui, None).await
  }

  pub async fn search(&mut self, ui: &mut dyn Ui, query: Option<&str>) -> bool {
    let request = self.begin_search(query);
    let result = Self::fetch(&self.client, &self.subject_id, &request).await;
    self.apply(ui, &request, result)
  }

  pub fn begin_search(&mut self, query: Option<&str>) -> SearchRequest {
    self.listing.begin(query)
  }

  pub async fn fetch(
    client: &ApiClient,
    subject_id: &str,
    request: &SearchRequest,
  ) -> ApiResult<Vec<Topic>> {
    api::search_topics(client, subject_id, request.query()).await
  }

  pub fn apply(
    &mut self,
    ui: &mut dyn Ui,
    request: &SearchRequest,
    result: ApiResult<Vec<Topic>>,
  ) -> bool {
    apply_listing(
      &mut self.listing,
      ui,
      request.seq,
      result,
      "Could not load topics",
    )
  }

  /// Replace the listing with the subject's due topics only
  pub async fn load_due(&mut self, ui: &mut dyn Ui) -> bool {
    let request = self.listing.begin(None);
    let result = api::due_topics(&self.client, &self.subject_id).await;
    apply_listing(
      &mut self.listing,
      ui,
      request.seq,
      result,
      "Could not load topics due for review",
    )
  }

  pub async fn create(&mut self, ui: &mut dyn Ui, name: &str) -> Option<Topic> {
    if let Some(message) = validate_name(name) {
      ui.alert("Required field", &message);
      return None;
    }

    let topic = api::create_topic(&self.client, &self.subject_id, name.trim())
      .await
      .or_alert(ui, "Could not create the topic")?;
    tracing::info!(id = %topic.id, subject = %self.subject_id, "Topic created");
    self.listing.prepend(topic.clone());
    Some(topic)
  }

  pub async fn rename(&mut self, ui: &mut dyn Ui, id: &str, name: &str) -> Option<Topic> {
    if let Some(message) = validate_name(name) {
      ui.alert("Required field", &message);
      return None;
    }

    let topic = api::update_topic(&self.client, id, name.trim())
      .await
      .or_alert(ui, "Could not update the topic")?;
    self.listing.replace(topic.clone());
    Some(topic)
  }

  pub async fn delete(&mut self, ui: &mut dyn Ui, id: &str) -> bool {
    if !ui.confirm(
      "Confirm deletion",
      "Are you sure you want to delete this topic? All of its flashcards will be deleted too.",
    ) {
      return false;
    }

    if api::delete_topic(&self.client, id)
      .await
      .or_alert(ui, "Could not delete the topic")
      .is_none()
    {
      return false;
    }
    tracing::info!(id, "Topic deleted");
    self.listing.remove(id);
    true
  }

  pub async fn stats(&self, ui: &mut dyn Ui, id: &str) -> Option<TopicStats> {
    api::topic_stats(&self.client, id)
      .await
      .or_alert(ui, "Could not load topic statistics")
  }
}

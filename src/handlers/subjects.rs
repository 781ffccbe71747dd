//! Subject list screen.

use super::{apply_listing, AlertOnError, Listing, Ui};
use crate::api::{self, ApiClient, ApiResult};
use crate::domain::Subject;
use crate::search::SearchRequest;
use crate::validation::validate_name;

pub struct SubjectsScreen {
  client: ApiClient,
  listing: Listing<Subject>,
}

impl SubjectsScreen {
  pub fn new(client: ApiClient) -> Self {
    Self {
      client,
      listing: Listing::default(),
    }
  }

  pub fn subjects(&self) -> &[Subject] {
    self.listing.items()
  }

  pub fn find(&self, id: &str) -> Option<&Subject> {
    self.listing.find(id)
  }

  /// Load every subject (also used for refresh and clearing the search)
  pub async fn load(&mut self, ui: &mut dyn Ui) -> bool {
    self.search(ui, None).await
  }

  pub async fn search(&mut self, ui: &mut dyn Ui, query: Option<&str>) -> bool {
    let request = self.begin_search(query);
    let result = Self::fetch(&self.client, &request).await;
    self.apply(ui, &request, result)
  }

  /// Sequence a search so its response can be fetched concurrently with others
  pub fn begin_search(&mut self, query: Option<&str>) -> SearchRequest {
    self.listing.begin(query)
  }

  pub async fn fetch(client: &ApiClient, request: &SearchRequest) -> ApiResult<Vec<Subject>> {
    api::search_subjects(client, request.query()).await
  }

  pub fn apply(
    &mut self,
    ui: &mut dyn Ui,
    request: &SearchRequest,
    result: ApiResult<Vec<Subject>>,
  ) -> bool {
    apply_listing(
      &mut self.listing,
      ui,
      request.seq,
      result,
      "Could not load subjects",
    )
  }

  pub async fn create(&mut self, ui: &mut dyn Ui, name: &str) -> Option<Subject> {
    if let Some(message) = validate_name(name) {
      ui.alert("Required field", &message);
      return None;
    }

    let subject = api::create_subject(&self.client, name.trim())
      .await
      .or_alert(ui, "Could not create the subject")?;
    tracing::info!(id = %subject.id, name = %subject.name, "Subject created");
    self.listing.prepend(subject.clone());
    Some(subject)
  }

  pub async fn rename(&mut self, ui: &mut dyn Ui, id: &str, name: &str) -> Option<Subject> {
    if let Some(message) = validate_name(name) {
      ui.alert("Required field", &message);
      return None;
    }

    let subject = api::update_subject(&self.client, id, name.trim())
      .await
      .or_alert(ui, "Could not update the subject")?;
    self.listing.replace(subject.clone());
    Some(subject)
  }

  /// Delete after confirmation; topics and flashcards go with it
  pub async fn delete(&mut self, ui: &mut dyn Ui, id: &str) -> bool {
    if !ui.confirm(
      "Confirm deletion",
      "Are you sure you want to delete this subject? All of its topics and flashcards will be deleted too.",
    ) {
      return false;
    }

    if api::delete_subject(&self.client, id)
      .await
      .or_alert(ui, "Could not delete the subject")
      .is_none()
    {
      return false;
    }
    tracing::info!(id, "Subject deleted");
    self.listing.remove(id);
    true
  }
}

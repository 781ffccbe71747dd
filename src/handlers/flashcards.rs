//! Flashcard list screen for one topic.

use super::{apply_listing, AlertOnError, Listing, Ui};
use crate::api::{self, ApiClient, ApiResult};
use crate::domain::{Flashcard, FlashcardDraft};
use crate::search::SearchRequest;
use crate::validation::validate_flashcard;

pub struct FlashcardsScreen {
  client: ApiClient,
  topic_id: String,
  listing: Listing<Flashcard>,
}

impl FlashcardsScreen {
  pub fn new(client: ApiClient, topic_id: impl Into<String>) -> Self {
    Self {
      client,
      topic_id: topic_id.into(),
      listing: Listing::default(),
    }
  }

  pub fn topic_id(&self) -> &str {
    &self.topic_id
  }

  pub fn flashcards(&self) -> &[Flashcard] {
    self.listing.items()
  }

  pub fn find(&self, id: &str) -> Option<&Flashcard> {
    self.listing.find(id)
  }

  pub async fn load(&mut self, ui: &mut dyn Ui) -> bool {
    self.search(ui, None).await
  }

  pub async fn search(&mut self, ui: &mut dyn Ui, query: Option<&str>) -> bool {
    let request = self.begin_search(query);
    let result = Self::fetch(&self.client, &self.topic_id, &request).await;
    self.apply(ui, &request, result)
  }

  pub fn begin_search(&mut self, query: Option<&str>) -> SearchRequest {
    self.listing.begin(query)
  }

  pub async fn fetch(
    client: &ApiClient,
    topic_id: &str,
    request: &SearchRequest,
  ) -> ApiResult<Vec<Flashcard>> {
    api::search_flashcards(client, topic_id, request.query()).await
  }

  pub fn apply(
    &mut self,
    ui: &mut dyn Ui,
    request: &SearchRequest,
    result: ApiResult<Vec<Flashcard>>,
  ) -> bool {
    apply_listing(
      &mut self.listing,
      ui,
      request.seq,
      result,
      "Could not load flashcards",
    )
  }

  fn check_draft(ui: &mut dyn Ui, draft: &FlashcardDraft) -> Option<FlashcardDraft> {
    if let Err(errors) = validate_flashcard(draft) {
      ui.alert("Required field", &errors.to_string());
      return None;
    }
    Some(FlashcardDraft::new(draft.question.trim(), draft.answer.trim()))
  }

  pub async fn create(&mut self, ui: &mut dyn Ui, draft: &FlashcardDraft) -> Option<Flashcard> {
    let draft = Self::check_draft(ui, draft)?;
    let card = api::create_flashcard(&self.client, &self.topic_id, &draft)
      .await
      .or_alert(ui, "Could not create the flashcard")?;
    tracing::info!(id = %card.id, topic = %self.topic_id, "Flashcard created");
    self.listing.prepend(card.clone());
    Some(card)
  }

  pub async fn edit(
    &mut self,
    ui: &mut dyn Ui,
    id: &str,
    draft: &FlashcardDraft,
  ) -> Option<Flashcard> {
    let draft = Self::check_draft(ui, draft)?;
    let card = api::update_flashcard(&self.client, id, &draft)
      .await
      .or_alert(ui, "Could not update the flashcard")?;
    self.listing.replace(card.clone());
    Some(card)
  }

  pub async fn delete(&mut self, ui: &mut dyn Ui, id: &str) -> bool {
    if !ui.confirm(
      "Confirm deletion",
      "Are you sure you want to delete this flashcard?",
    ) {
      return false;
    }

    if api::delete_flashcard(&self.client, id)
      .await
      .or_alert(ui, "Could not delete the flashcard")
      .is_none()
    {
      return false;
    }
    self.listing.remove(id);
    true
  }
}

//! Study session screen.
//!
//! Wraps a [`StudySession`] over the topic's flashcards. Each answer is
//! reported to the stats endpoint from a spawned task so a slow or failing
//! report never holds up the next card.

use tokio::task::JoinHandle;

use super::{AlertOnError, Ui};
use crate::api::{self, ApiClient, LogOnError};
use crate::domain::{Difficulty, PopulatedFlashcard, StudyOutcome, Topic};
use crate::srs::{Answered, SessionError, StudySession};

pub struct StudyScreen {
  client: ApiClient,
  topic_id: String,
  session: StudySession<PopulatedFlashcard>,
  reports: Vec<JoinHandle<()>>,
}

impl StudyScreen {
  pub fn new(client: ApiClient, topic_id: impl Into<String>) -> Self {
    Self {
      client,
      topic_id: topic_id.into(),
      session: StudySession::new(),
      reports: Vec::new(),
    }
  }

  /// Topic name, known once cards are loaded
  pub fn topic_name(&self) -> Option<&str> {
    self.session.deck().first().map(|card| card.topic.name.as_str())
  }

  pub fn session(&self) -> &StudySession<PopulatedFlashcard> {
    &self.session
  }

  /// Fetch and shuffle the topic's cards; false (after an alert) if there is nothing to study
  pub async fn load(&mut self, ui: &mut dyn Ui) -> bool {
    let Some(cards) = api::study_flashcards(&self.client, &self.topic_id)
      .await
      .or_alert(ui, "Could not load flashcards")
    else {
      return false;
    };

    match self.session.start(cards) {
      Ok(()) => {
        tracing::info!(topic = %self.topic_id, cards = self.session.len(), "Study session started");
        true
      }
      Err(e) => {
        ui.alert("Notice", &e.to_string());
        false
      }
    }
  }

  pub fn reveal(&mut self) -> Result<(), SessionError> {
    self.session.reveal()
  }

  /// Record an answer, report it in the background and advance
  pub fn answer(
    &mut self,
    outcome: StudyOutcome,
  ) -> Result<Answered<PopulatedFlashcard>, SessionError> {
    let answered = self.session.answer(outcome)?;
    self.report(&answered);
    Ok(answered)
  }

  pub fn mark_correct(&mut self) -> Result<Answered<PopulatedFlashcard>, SessionError> {
    self.answer(StudyOutcome::Correct)
  }

  pub fn mark_incorrect(&mut self) -> Result<Answered<PopulatedFlashcard>, SessionError> {
    self.answer(StudyOutcome::Incorrect)
  }

  pub fn skip(&mut self) -> Result<Answered<PopulatedFlashcard>, SessionError> {
    self.answer(StudyOutcome::Skipped)
  }

  fn report(&mut self, answered: &Answered<PopulatedFlashcard>) {
    self.reports.retain(|handle| !handle.is_finished());

    let result = answered.card.study_result(answered.outcome);
    let client = self.client.clone();
    self.reports.push(tokio::spawn(async move {
      api::save_study_result(&client, &result)
        .await
        .log_warn("Failed to record study result");
    }));
  }

  /// Reports still in flight
  pub fn pending_reports(&self) -> usize {
    self.reports.iter().filter(|handle| !handle.is_finished()).count()
  }

  /// Wait for every background report to finish
  pub async fn flush_reports(&mut self) {
    for handle in self.reports.drain(..) {
      if let Err(e) = handle.await {
        tracing::warn!(error = %e, "Study result task failed");
      }
    }
  }

  /// Study the same cards again, reshuffled.
  ///
  /// Mid-session this discards the current tally, so the user is asked
  /// first. Returns false if they declined.
  pub fn restart(&mut self, ui: &mut dyn Ui) -> Result<bool, SessionError> {
    let in_progress = !self.session.is_completed() && !self.session.is_empty();
    if in_progress
      && !ui.confirm(
        "Restart study",
        "Progress in this session will be lost. Start over?",
      )
    {
      return Ok(false);
    }
    self.session.restart()?;
    tracing::info!(topic = %self.topic_id, "Study session restarted");
    Ok(true)
  }

  /// Submit the finished session with the chosen difficulty.
  ///
  /// Shows the confirmation (score and next review interval) and returns the
  /// topic as rescheduled by the server.
  pub async fn complete(&mut self, ui: &mut dyn Ui, difficulty: Difficulty) -> Option<Topic> {
    if !self.session.is_completed() {
      ui.alert("Notice", "Finish the session before rating it");
      return None;
    }

    let summary = self.session.summary();
    let topic = api::mark_topic_reviewed(
      &self.client,
      &self.topic_id,
      &summary.review_submission(difficulty),
    )
    .await
    .or_alert(ui, "Could not save the review")?;

    tracing::info!(
      topic = %self.topic_id,
      score = summary.score,
      difficulty = difficulty.as_str(),
      "Topic reviewed"
    );
    ui.alert("Review recorded", &summary.review_confirmation(difficulty));
    Some(topic)
  }
}

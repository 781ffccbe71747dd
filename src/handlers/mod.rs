//! Screen controllers.
//!
//! Each controller owns the local state of one screen and drives the API.
//! User interaction goes through the [`Ui`] seam: failures become a single
//! alert and destructive actions ask for confirmation first.

pub mod auth;
pub mod dashboard;
pub mod flashcards;
pub mod home;
pub mod study;
pub mod subjects;
pub mod topics;

use crate::domain::{sort_newest_first, Entity};
use crate::search::{SearchGate, SearchRequest};

pub use auth::{login, logout, register, AuthFailure};
pub use dashboard::{load_dashboard, load_subject_stats, load_topic_stats, streak_label};
pub use flashcards::FlashcardsScreen;
pub use home::{load_home, next_review, next_review_for, review_option_label, HomeOverview};
pub use study::StudyScreen;
pub use subjects::SubjectsScreen;
pub use topics::TopicsScreen;

/// Title used for failure alerts
pub const ERROR_TITLE: &str = "Error";

/// User-facing prompts and notices
pub trait Ui {
  fn alert(&mut self, title: &str, message: &str);
  /// Returns true if the user accepted
  fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// Extension trait turning a failed call into a logged error plus one alert
pub trait AlertOnError<T> {
  fn or_alert(self, ui: &mut dyn Ui, message: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> AlertOnError<T> for std::result::Result<T, E> {
  fn or_alert(self, ui: &mut dyn Ui, message: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        alert_failure(ui, message, &e);
        None
      }
    }
  }
}

/// Log a failed call and show the fixed `message` for it
pub fn alert_failure(ui: &mut dyn Ui, message: &str, error: &dyn std::fmt::Display) {
  tracing::error!(error = %error, "{}", message);
  ui.alert(ERROR_TITLE, message);
}

/// Items shown on a list screen plus the sequencing of their searches
#[derive(Debug, Clone)]
pub struct Listing<T> {
  items: Vec<T>,
  gate: SearchGate,
}

impl<T> Default for Listing<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      gate: SearchGate::new(),
    }
  }
}

impl<T: Entity> Listing<T> {
  pub fn items(&self) -> &[T] {
    &self.items
  }

  pub fn find(&self, id: &str) -> Option<&T> {
    self.items.iter().find(|item| item.id() == id)
  }

  pub fn begin(&mut self, query: Option<&str>) -> SearchRequest {
    self.gate.issue(query)
  }

  /// Apply a listing response, newest first; false if it arrived stale
  pub fn apply(&mut self, seq: u64, mut items: Vec<T>) -> bool {
    if !self.gate.accept(seq) {
      return false;
    }
    sort_newest_first(&mut items);
    self.items = items;
    true
  }

  /// Whether a response for `seq` should still be shown (errors included)
  pub fn accepts(&mut self, seq: u64) -> bool {
    self.gate.accept(seq)
  }

  pub fn prepend(&mut self, item: T) {
    self.items.insert(0, item);
  }

  /// Replace the item with the same id in place
  pub fn replace(&mut self, item: T) -> bool {
    match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
      Some(slot) => {
        *slot = item;
        true
      }
      None => false,
    }
  }

  pub fn remove(&mut self, id: &str) -> Option<T> {
    let index = self.items.iter().position(|item| item.id() == id)?;
    Some(self.items.remove(index))
  }
}

/// Apply a fetched listing through `listing`, alerting on a fresh failure
pub(crate) fn apply_listing<T: Entity, E: std::fmt::Display>(
  listing: &mut Listing<T>,
  ui: &mut dyn Ui,
  seq: u64,
  result: Result<Vec<T>, E>,
  failure: &str,
) -> bool {
  match result {
    Ok(items) => listing.apply(seq, items),
    Err(e) => {
      if listing.accepts(seq) {
        alert_failure(ui, failure, &e);
      } else {
        tracing::debug!(seq, error = %e, "Ignoring failure of stale search");
      }
      false
    }
  }
}

//! Debounced search input.
//!
//! Typing restarts a timer and only the text present when the timer fires
//! is searched. Blank text loads everything at once, and text shorter than
//! the configured minimum issues nothing. Requests carry sequence numbers so
//! a slow response can never overwrite a newer one.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::SearchConfig;

/// What a search box asks the list to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTrigger {
  /// Unfiltered listing
  LoadAll,
  /// Filtered by this trimmed, non-empty term
  Query(String),
}

impl SearchTrigger {
  pub fn as_query(&self) -> Option<&str> {
    match self {
      Self::LoadAll => None,
      Self::Query(q) => Some(q),
    }
  }
}

/// Reaction to an edit of the search text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEffect {
  /// Cancel any pending search and load everything now
  LoadAllNow,
  /// Cancel any pending search and do nothing
  Cancel,
  /// (Re)start the debounce timer for this term
  Debounce(String),
}

pub fn classify_input(text: &str, min_chars: usize) -> InputEffect {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    InputEffect::LoadAllNow
  } else if trimmed.chars().count() < min_chars {
    InputEffect::Cancel
  } else {
    InputEffect::Debounce(trimmed.to_string())
  }
}

/// Explicit submit: search right away regardless of length
pub fn submit_trigger(text: &str) -> SearchTrigger {
  match text.trim() {
    "" => SearchTrigger::LoadAll,
    q => SearchTrigger::Query(q.to_string()),
  }
}

// ============================================================================
// Sequencing
// ============================================================================

/// A search as issued to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
  pub seq: u64,
  pub query: Option<String>,
}

impl SearchRequest {
  pub fn query(&self) -> Option<&str> {
    self.query.as_deref()
  }
}

/// Hands out sequence numbers and rejects responses older than the newest
/// one already applied.
#[derive(Debug, Clone, Default)]
pub struct SearchGate {
  issued: u64,
  applied: u64,
}

impl SearchGate {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn issue(&mut self, query: Option<&str>) -> SearchRequest {
    self.issued += 1;
    SearchRequest {
      seq: self.issued,
      query: query.map(str::to_string),
    }
  }

  /// Whether a response for `seq` may be applied; marks it applied if so
  pub fn accept(&mut self, seq: u64) -> bool {
    if seq < self.applied {
      tracing::debug!(seq, applied = self.applied, "Dropping stale search response");
      return false;
    }
    self.applied = seq;
    true
  }

  pub fn latest_issued(&self) -> u64 {
    self.issued
  }
}

// ============================================================================
// Debounce task
// ============================================================================

#[derive(Debug)]
enum InputEvent {
  Change(String),
  Submit(String),
  Clear,
}

/// Search box driven by a background task.
///
/// Edits go in through [`change`](Self::change), [`submit`](Self::submit) and
/// [`clear`](Self::clear); the resulting searches come out of
/// [`next_trigger`](Self::next_trigger). Dropping the handle stops the task.
pub struct DebouncedSearch {
  events: mpsc::UnboundedSender<InputEvent>,
  triggers: mpsc::UnboundedReceiver<SearchTrigger>,
  task: JoinHandle<()>,
}

impl DebouncedSearch {
  pub fn spawn(config: SearchConfig) -> Self {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (triggers_tx, triggers_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_debounce(config, events_rx, triggers_tx));
    Self {
      events: events_tx,
      triggers: triggers_rx,
      task,
    }
  }

  pub fn change(&self, text: impl Into<String>) {
    self.send(InputEvent::Change(text.into()));
  }

  pub fn submit(&self, text: impl Into<String>) {
    self.send(InputEvent::Submit(text.into()));
  }

  pub fn clear(&self) {
    self.send(InputEvent::Clear);
  }

  /// Wait for the next search to run; `None` once the task has stopped
  pub async fn next_trigger(&mut self) -> Option<SearchTrigger> {
    self.triggers.recv().await
  }

  pub fn try_next_trigger(&mut self) -> Option<SearchTrigger> {
    self.triggers.try_recv().ok()
  }

  fn send(&self, event: InputEvent) {
    if self.events.send(event).is_err() {
      tracing::warn!("Search task is no longer running");
    }
  }
}

impl Drop for DebouncedSearch {
  fn drop(&mut self) {
    self.task.abort();
  }
}

async fn run_debounce(
  config: SearchConfig,
  mut events: mpsc::UnboundedReceiver<InputEvent>,
  triggers: mpsc::UnboundedSender<SearchTrigger>,
) {
  let mut pending: Option<(String, Instant)> = None;

  loop {
    let deadline = pending.as_ref().map(|(_, deadline)| *deadline);
    let event = match deadline {
      Some(deadline) => tokio::select! {
        event = events.recv() => event,
        _ = tokio::time::sleep_until(deadline) => {
          if let Some((query, _)) = pending.take() {
            tracing::debug!(%query, "Debounced search fired");
            if triggers.send(SearchTrigger::Query(query)).is_err() {
              return;
            }
          }
          continue;
        }
      },
      None => events.recv().await,
    };

    let Some(event) = event else {
      return;
    };

    let immediate = match event {
      InputEvent::Change(text) => match classify_input(&text, config.min_chars) {
        InputEffect::LoadAllNow => {
          pending = None;
          Some(SearchTrigger::LoadAll)
        }
        InputEffect::Cancel => {
          pending = None;
          None
        }
        InputEffect::Debounce(query) => {
          pending = Some((query, Instant::now() + config.debounce));
          None
        }
      },
      InputEvent::Submit(text) => {
        pending = None;
        Some(submit_trigger(&text))
      }
      InputEvent::Clear => {
        pending = None;
        Some(SearchTrigger::LoadAll)
      }
    };

    if let Some(trigger) = immediate {
      if triggers.send(trigger).is_err() {
        return;
      }
    }
  }
}

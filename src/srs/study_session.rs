//! Study session state machine.
//!
//! A session walks a shuffled deck of cards for one topic:
//!
//! ```text
//! Loading -> Presenting -> Revealed -> Presenting (next card) -> ... -> Completed
//! ```
//!
//! Any answer (correct, incorrect, skipped) is accepted with or without the
//! answer revealed. `restart` reshuffles the same deck and zeroes the tally
//! from any state once a deck is loaded. This type does no I/O; reporting
//! answers and submitting the review belong to the caller.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::domain::{Difficulty, ReviewSubmission, StudyOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
  Loading,
  Presenting,
  Revealed,
  Completed,
}

impl SessionPhase {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Loading => "loading",
      Self::Presenting => "presenting",
      Self::Revealed => "revealed",
      Self::Completed => "completed",
    }
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
  #[error("This topic has no flashcards to study")]
  EmptyDeck,
  #[error("Cannot {action} while the session is {}", .phase.as_str())]
  InvalidTransition {
    action: &'static str,
    phase: SessionPhase,
  },
}

/// Score as a rounded percentage; zero when nothing was answered
pub fn session_score(correct: u32, total: u32) -> u8 {
  if total == 0 {
    return 0;
  }
  (f64::from(correct) / f64::from(total) * 100.0).round() as u8
}

/// Running answer counts for the current pass over the deck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTally {
  pub correct: u32,
  pub incorrect: u32,
  pub skipped: u32,
}

impl SessionTally {
  pub fn record(&mut self, outcome: StudyOutcome) {
    match outcome {
      StudyOutcome::Correct => self.correct += 1,
      StudyOutcome::Incorrect => self.incorrect += 1,
      StudyOutcome::Skipped => self.skipped += 1,
    }
  }

  pub fn total(&self) -> u32 {
    self.correct + self.incorrect + self.skipped
  }

  pub fn score(&self) -> u8 {
    session_score(self.correct, self.total())
  }
}

/// Outcome of a finished pass, used for the completion prompt and review submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
  pub tally: SessionTally,
  pub score: u8,
}

impl SessionSummary {
  pub fn total(&self) -> u32 {
    self.tally.total()
  }

  /// Text of the "how did it go?" prompt shown on completion
  pub fn completion_message(&self) -> String {
    format!(
      "Performance: {}%\n\nCorrect: {}\nIncorrect: {}\nSkipped: {}\n\nHow was studying this topic?",
      self.score, self.tally.correct, self.tally.incorrect, self.tally.skipped
    )
  }

  pub fn review_submission(&self, difficulty: Difficulty) -> ReviewSubmission {
    ReviewSubmission {
      difficulty,
      score: self.score,
      total_questions: self.total(),
      correct_answers: self.tally.correct,
    }
  }

  /// Confirmation shown once the server accepted the review
  pub fn review_confirmation(&self, difficulty: Difficulty) -> String {
    let days = difficulty.interval_days();
    format!(
      "Your performance: {}%\n\nCorrect: {}/{}\nNext review: {} day{}",
      self.score,
      self.tally.correct,
      self.total(),
      days,
      if days > 1 { "s" } else { "" }
    )
  }
}

/// Result of answering the current card
#[derive(Debug, Clone, PartialEq)]
pub struct Answered<C> {
  pub card: C,
  pub outcome: StudyOutcome,
  /// True when this was the last card of the deck
  pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct StudySession<C> {
  deck: Vec<C>,
  index: usize,
  phase: SessionPhase,
  tally: SessionTally,
}

impl<C> Default for StudySession<C> {
  fn default() -> Self {
    Self {
      deck: Vec::new(),
      index: 0,
      phase: SessionPhase::Loading,
      tally: SessionTally::default(),
    }
  }
}

impl<C: Clone> StudySession<C> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Load a deck and present its first card, shuffled with the thread RNG
  pub fn start(&mut self, cards: Vec<C>) -> Result<(), SessionError> {
    self.start_with_rng(cards, &mut rand::rng())
  }

  pub fn start_with_rng<R: Rng + ?Sized>(
    &mut self,
    cards: Vec<C>,
    rng: &mut R,
  ) -> Result<(), SessionError> {
    if cards.is_empty() {
      return Err(SessionError::EmptyDeck);
    }
    self.deck = cards;
    self.reset(rng);
    Ok(())
  }

  /// Show the answer of the current card
  pub fn reveal(&mut self) -> Result<(), SessionError> {
    match self.phase {
      SessionPhase::Presenting => {
        self.phase = SessionPhase::Revealed;
        Ok(())
      }
      phase => Err(SessionError::InvalidTransition {
        action: "reveal",
        phase,
      }),
    }
  }

  /// Record an answer for the current card and advance
  pub fn answer(&mut self, outcome: StudyOutcome) -> Result<Answered<C>, SessionError> {
    if !matches!(self.phase, SessionPhase::Presenting | SessionPhase::Revealed) {
      return Err(SessionError::InvalidTransition {
        action: "answer",
        phase: self.phase,
      });
    }

    let card = self.deck[self.index].clone();
    self.tally.record(outcome);

    let completed = self.index + 1 >= self.deck.len();
    if completed {
      self.phase = SessionPhase::Completed;
    } else {
      self.index += 1;
      self.phase = SessionPhase::Presenting;
    }

    Ok(Answered {
      card,
      outcome,
      completed,
    })
  }

  pub fn mark_correct(&mut self) -> Result<Answered<C>, SessionError> {
    self.answer(StudyOutcome::Correct)
  }

  pub fn mark_incorrect(&mut self) -> Result<Answered<C>, SessionError> {
    self.answer(StudyOutcome::Incorrect)
  }

  pub fn skip(&mut self) -> Result<Answered<C>, SessionError> {
    self.answer(StudyOutcome::Skipped)
  }

  /// Reshuffle the loaded deck and start over with a zeroed tally
  pub fn restart(&mut self) -> Result<(), SessionError> {
    self.restart_with_rng(&mut rand::rng())
  }

  pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
    if self.deck.is_empty() {
      return Err(SessionError::InvalidTransition {
        action: "restart",
        phase: self.phase,
      });
    }
    self.reset(rng);
    Ok(())
  }

  fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    self.deck.shuffle(rng);
    self.index = 0;
    self.tally = SessionTally::default();
    self.phase = SessionPhase::Presenting;
  }
}

impl<C> StudySession<C> {
  pub fn phase(&self) -> SessionPhase {
    self.phase
  }

  pub fn is_answer_shown(&self) -> bool {
    self.phase == SessionPhase::Revealed
  }

  pub fn is_completed(&self) -> bool {
    self.phase == SessionPhase::Completed
  }

  /// Card currently on screen; `None` before loading and after completion
  pub fn current(&self) -> Option<&C> {
    match self.phase {
      SessionPhase::Presenting | SessionPhase::Revealed => self.deck.get(self.index),
      _ => None,
    }
  }

  pub fn deck(&self) -> &[C] {
    &self.deck
  }

  pub fn len(&self) -> usize {
    self.deck.len()
  }

  pub fn is_empty(&self) -> bool {
    self.deck.is_empty()
  }

  /// One-based position of the current card
  pub fn position(&self) -> usize {
    if self.deck.is_empty() {
      0
    } else {
      self.index + 1
    }
  }

  /// Percentage of the deck reached, counting the current card
  pub fn progress(&self) -> f64 {
    if self.deck.is_empty() {
      return 0.0;
    }
    self.position() as f64 / self.deck.len() as f64 * 100.0
  }

  pub fn tally(&self) -> SessionTally {
    self.tally
  }

  pub fn answered(&self) -> u32 {
    self.tally.total()
  }

  pub fn score(&self) -> u8 {
    self.tally.score()
  }

  pub fn summary(&self) -> SessionSummary {
    SessionSummary {
      tally: self.tally,
      score: self.tally.score(),
    }
  }
}

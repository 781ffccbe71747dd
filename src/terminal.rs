//! Terminal front end: prompts, confirmation and plain-text rendering.

use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};

use flashdeck::config::SearchConfig;
use flashdeck::domain::{Dashboard, Flashcard, GeneralStats, StudyStats, Subject, Topic};
use flashdeck::handlers::{streak_label, HomeOverview, Ui};
use flashdeck::search::{DebouncedSearch, SearchTrigger};
use flashdeck::srs::{partition_due, ReviewStatus};

/// Alerts go to stderr; confirmations read a line from stdin
pub struct TerminalUi {
  assume_yes: bool,
}

impl TerminalUi {
  pub fn new(assume_yes: bool) -> Self {
    Self { assume_yes }
  }
}

impl Ui for TerminalUi {
  fn alert(&mut self, title: &str, message: &str) {
    eprintln!("{}: {}", title, message);
  }

  fn confirm(&mut self, title: &str, message: &str) -> bool {
    if self.assume_yes {
      return true;
    }
    println!("{}", title);
    match prompt(&format!("{} [y/N] ", message)) {
      Some(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
      None => false,
    }
  }
}

/// Print `label` and read one trimmed line; `None` on end of input
pub fn prompt(label: &str) -> Option<String> {
  print!("{}", label);
  let _ = io::stdout().flush();
  let mut line = String::new();
  match io::stdin().lock().read_line(&mut line) {
    Ok(0) | Err(_) => None,
    Ok(_) => Some(line.trim().to_string()),
  }
}

/// Screens that can re-run their search and print the result
pub trait LiveList {
  async fn search_and_show(&mut self, ui: &mut TerminalUi, query: Option<&str>);
}

/// Interactive search: every stdin line replaces the search text.
///
/// Lines are debounced like keystrokes; `/q` or end of input stops.
pub async fn live_search<L: LiveList>(list: &mut L, ui: &mut TerminalUi, config: SearchConfig) {
  println!("Type to search (blank line lists everything, /q to quit)");
  let mut search = DebouncedSearch::spawn(config);
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  search.clear();

  loop {
    tokio::select! {
      line = lines.next_line() => match line {
        Ok(Some(text)) if text.trim() == "/q" => break,
        Ok(Some(text)) => search.change(text),
        Ok(None) => break,
        Err(e) => {
          tracing::warn!(error = %e, "Failed to read search input");
          break;
        }
      },
      Some(trigger) = search.next_trigger() => {
        if let SearchTrigger::Query(q) = &trigger {
          println!("-- results for \"{}\"", q);
        }
        list.search_and_show(ui, trigger.as_query()).await;
      }
    }
  }
}

// ============================================================================
// Rendering
// ============================================================================

pub fn print_subjects(subjects: &[Subject]) {
  if subjects.is_empty() {
    println!("No subjects yet.");
    return;
  }
  for subject in subjects {
    println!("{}  {}", subject.id, subject.name);
  }
}

fn print_topic(topic: &Topic, now: DateTime<Utc>) {
  let status = ReviewStatus::for_topic(topic, now);
  let score = topic
    .last_review_score
    .map(|s| format!("  last score {}%", s))
    .unwrap_or_default();
  let marker = if status.offers_study() { "*" } else { " " };
  println!(
    "{} {}  {}  ({}){}",
    marker,
    topic.id,
    topic.name,
    status.label(),
    score
  );
}

pub fn print_topics(topics: &[Topic], now: DateTime<Utc>) {
  if topics.is_empty() {
    println!("No topics yet.");
    return;
  }
  let groups = partition_due(topics, now);
  println!("(* can be studied now)");
  if !groups.due.is_empty() {
    println!("Ready for review:");
    for topic in groups.due {
      print_topic(topic, now);
    }
  }
  if !groups.not_due.is_empty() {
    println!("Other topics:");
    for topic in groups.not_due {
      print_topic(topic, now);
    }
  }
}

pub fn print_flashcards(cards: &[Flashcard]) {
  if cards.is_empty() {
    println!("No flashcards yet.");
    return;
  }
  for card in cards {
    println!("{}  Q: {}", card.id, card.question);
    println!("{}  A: {}", " ".repeat(card.id.len()), card.answer);
  }
}

pub fn print_studies(studies: &StudyStats) {
  println!(
    "Answers: {} (correct {}, incorrect {}, skipped {}), accuracy {:.0}%",
    studies.total, studies.correct, studies.incorrect, studies.skipped, studies.accuracy
  );
}

pub fn print_general_stats(stats: &GeneralStats) {
  println!(
    "Subjects: {}  Topics: {}  Flashcards: {}",
    stats.content.subjects, stats.content.topics, stats.content.flashcards
  );
  print_studies(&stats.studies);
}

pub fn print_home(overview: &HomeOverview) {
  match &overview.user {
    Some(user) => println!("Hello, {}!", user.name),
    None => println!("Hello!"),
  }
  if let Some(stats) = &overview.stats {
    print_general_stats(stats);
  }

  if !overview.review.has_reviewable() {
    println!("Nothing to review right now.");
    return;
  }
  println!("Topics to review: {}", overview.review.total_topics);
  for option in overview.review_options() {
    println!("  {}", option);
  }
  if let Some(target) = overview.quick_review_target() {
    println!("Quick review: {} ({})", target.subject.name, target.subject.id);
  }
}

pub fn print_dashboard(dashboard: &Dashboard) {
  let summary = &dashboard.summary;
  println!("Topics studied: {}", summary.topics_studied);
  println!("Overall score: {:.0}%", summary.overall_score);
  println!("Study streak: {}", streak_label(summary.streak_days));
  println!("Topics to review: {}", summary.topics_due);
  if let Some(best) = &summary.best_subject {
    println!("Best subject: {} ({:.0}%)", best.name, best.average_score);
  }

  if !dashboard.daily_progress.is_empty() {
    println!("Daily progress:");
    for day in &dashboard.daily_progress {
      println!(
        "  {}  {} topics  {:.0}%",
        day.date, day.topics_studied, day.average_score
      );
    }
  }
  if !dashboard.subjects.is_empty() {
    println!("By subject:");
    for subject in &dashboard.subjects {
      println!(
        "  {}  {} topics  {:.0}%",
        subject.name, subject.topics_studied, subject.average_score
      );
    }
  }
}

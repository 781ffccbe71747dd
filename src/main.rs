mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flashdeck::api;
use flashdeck::auth::AuthStore;
use flashdeck::config::Config;
use flashdeck::domain::{Difficulty, FlashcardDraft, LoginForm, RegisterForm, User};
use flashdeck::handlers::{
  self, AlertOnError, AuthFailure, FlashcardsScreen, StudyScreen, SubjectsScreen, TopicsScreen, Ui,
};
use flashdeck::paths;
use flashdeck::state::AppState;
use flashdeck::validation::FieldErrors;

use terminal::{prompt, LiveList, TerminalUi};

#[derive(Parser)]
#[command(name = "flashdeck", about = "Flashcards with spaced review", version)]
struct Cli {
  /// Configuration file
  #[arg(long, global = true, default_value = paths::CONFIG_FILE)]
  config: PathBuf,

  /// Answer yes to every confirmation
  #[arg(long, short = 'y', global = true)]
  yes: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Log in and remember the session
  Login {
    #[arg(long)]
    email: String,
    /// Prompted for when omitted
    #[arg(long)]
    password: Option<String>,
  },
  /// Create an account and log in
  Register {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: Option<String>,
  },
  /// Forget the stored session
  Logout,
  /// Show the logged-in user
  Whoami,
  /// Greeting, totals and what to review
  Home,
  /// Study progress over time
  Dashboard,
  /// Answer counts overall, for a subject or for a topic
  Stats {
    #[arg(long, conflicts_with = "topic")]
    subject: Option<String>,
    #[arg(long)]
    topic: Option<String>,
  },
  /// Manage subjects
  #[command(subcommand)]
  Subjects(SubjectsCommand),
  /// Manage the topics of a subject
  #[command(subcommand)]
  Topics(TopicsCommand),
  /// Manage the flashcards of a topic
  #[command(subcommand)]
  Cards(CardsCommand),
  /// Study a topic's flashcards
  Study {
    /// Topic id; defaults to the next topic due for review
    topic: Option<String>,
  },
}

#[derive(Subcommand)]
enum SubjectsCommand {
  List,
  /// Search by name; without a query, search interactively
  Search { query: Option<String> },
  Add { name: String },
  Rename { id: String, name: String },
  Rm { id: String },
}

#[derive(Subcommand)]
enum TopicsCommand {
  List { subject: String },
  Search { subject: String, query: Option<String> },
  /// Topics due for review
  Due { subject: String },
  Add { subject: String, name: String },
  Rename { subject: String, id: String, name: String },
  Rm { subject: String, id: String },
  Stats { id: String },
}

#[derive(Subcommand)]
enum CardsCommand {
  List { topic: String },
  Search { topic: String, query: Option<String> },
  Add {
    topic: String,
    #[arg(long, short)]
    question: String,
    #[arg(long, short)]
    answer: String,
  },
  Edit {
    topic: String,
    id: String,
    #[arg(long, short)]
    question: String,
    #[arg(long, short)]
    answer: String,
  },
  Rm { topic: String, id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "flashdeck=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let cli = Cli::parse();
  let config = Config::load_from(&cli.config);
  let (state, user) = match AppState::new(config, AuthStore::default()) {
    Ok(started) => started,
    Err(e) => {
      eprintln!("Error: {}", e);
      return ExitCode::FAILURE;
    }
  };
  let mut ui = TerminalUi::new(cli.yes);

  let ok = match cli.command {
    Command::Login { email, password } => cmd_login(&state, &mut ui, email, password).await,
    Command::Register {
      name,
      email,
      password,
    } => cmd_register(&state, &mut ui, name, email, password).await,
    Command::Logout => handlers::logout(&state.client, &state.store, &mut ui),
    Command::Whoami => cmd_whoami(user.as_ref()),
    _ if !state.is_logged_in() => {
      eprintln!("Not logged in. Run `flashdeck login` first.");
      false
    }
    Command::Home => cmd_home(&state, &mut ui).await,
    Command::Dashboard => match handlers::load_dashboard(&state.client, &mut ui).await {
      Some(dashboard) => {
        terminal::print_dashboard(&dashboard);
        true
      }
      None => false,
    },
    Command::Stats { subject, topic } => cmd_stats(&state, &mut ui, subject, topic).await,
    Command::Subjects(command) => cmd_subjects(&state, &mut ui, command).await,
    Command::Topics(command) => cmd_topics(&state, &mut ui, command).await,
    Command::Cards(command) => cmd_cards(&state, &mut ui, command).await,
    Command::Study { topic } => cmd_study(&state, &mut ui, topic).await,
  };

  if ok {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}

fn read_password(password: Option<String>) -> String {
  password
    .or_else(|| prompt("Password: "))
    .unwrap_or_default()
}

fn print_field_errors(errors: &FieldErrors) {
  for (field, message) in errors.iter() {
    eprintln!("{}: {}", field, message);
  }
}

fn report_auth(result: Result<User, AuthFailure>) -> bool {
  match result {
    Ok(user) => {
      println!("Logged in as {} <{}>", user.name, user.email);
      true
    }
    Err(AuthFailure::Invalid(errors)) => {
      print_field_errors(&errors);
      false
    }
    Err(AuthFailure::Rejected(_)) => false,
  }
}

async fn cmd_login(
  state: &AppState,
  ui: &mut TerminalUi,
  email: String,
  password: Option<String>,
) -> bool {
  let form = LoginForm {
    email,
    password: read_password(password),
  };
  report_auth(handlers::login(&state.client, &state.store, ui, &form).await)
}

async fn cmd_register(
  state: &AppState,
  ui: &mut TerminalUi,
  name: String,
  email: String,
  password: Option<String>,
) -> bool {
  let form = RegisterForm {
    name,
    email,
    password: read_password(password),
  };
  report_auth(handlers::register(&state.client, &state.store, ui, &form).await)
}

fn cmd_whoami(user: Option<&User>) -> bool {
  match user {
    Some(user) => {
      println!("{} <{}>", user.name, user.email);
      true
    }
    None => {
      println!("Not logged in");
      false
    }
  }
}

async fn cmd_home(state: &AppState, ui: &mut TerminalUi) -> bool {
  let overview = handlers::load_home(&state.client, &state.store, ui).await;
  terminal::print_home(&overview);
  let next = handlers::next_review_for(&state.client, ui, &overview).await;
  if let Some((subject, topic)) = next {
    println!("Next up: {} / {} (flashdeck study {})", subject.name, topic.name, topic.id);
  }
  true
}

async fn cmd_stats(
  state: &AppState,
  ui: &mut TerminalUi,
  subject: Option<String>,
  topic: Option<String>,
) -> bool {
  if let Some(id) = subject {
    let Some(stats) = handlers::load_subject_stats(&state.client, ui, &id).await else {
      return false;
    };
    println!("Topics: {}  Flashcards: {}", stats.content.topics, stats.content.flashcards);
    terminal::print_studies(&stats.studies);
    return true;
  }

  if let Some(id) = topic {
    let Some(stats) = handlers::load_topic_stats(&state.client, ui, &id).await else {
      return false;
    };
    println!("Flashcards: {}", stats.content.flashcards);
    terminal::print_studies(&stats.studies);
    return true;
  }

  match api::general_stats(&state.client)
    .await
    .or_alert(ui, "Could not load statistics")
  {
    Some(stats) => {
      terminal::print_general_stats(&stats);
      true
    }
    None => false,
  }
}

// ==================== Subjects ====================

impl LiveList for SubjectsScreen {
  async fn search_and_show(&mut self, ui: &mut TerminalUi, query: Option<&str>) {
    if self.search(ui, query).await {
      terminal::print_subjects(self.subjects());
    }
  }
}

async fn cmd_subjects(state: &AppState, ui: &mut TerminalUi, command: SubjectsCommand) -> bool {
  let mut screen = SubjectsScreen::new(state.client.clone());
  match command {
    SubjectsCommand::List => {
      let ok = screen.load(ui).await;
      if ok {
        terminal::print_subjects(screen.subjects());
      }
      ok
    }
    SubjectsCommand::Search { query: Some(query) } => {
      let ok = screen.search(ui, Some(&query)).await;
      if ok {
        terminal::print_subjects(screen.subjects());
      }
      ok
    }
    SubjectsCommand::Search { query: None } => {
      terminal::live_search(&mut screen, ui, state.config.search).await;
      true
    }
    SubjectsCommand::Add { name } => match screen.create(ui, &name).await {
      Some(subject) => {
        println!("Created {}  {}", subject.id, subject.name);
        true
      }
      None => false,
    },
    SubjectsCommand::Rename { id, name } => screen.rename(ui, &id, &name).await.is_some(),
    SubjectsCommand::Rm { id } => screen.delete(ui, &id).await,
  }
}

// ==================== Topics ====================

impl LiveList for TopicsScreen {
  async fn search_and_show(&mut self, ui: &mut TerminalUi, query: Option<&str>) {
    if self.search(ui, query).await {
      terminal::print_topics(self.topics(), Utc::now());
    }
  }
}

async fn cmd_topics(state: &AppState, ui: &mut TerminalUi, command: TopicsCommand) -> bool {
  let client = state.client.clone();
  match command {
    TopicsCommand::List { subject } => {
      let mut screen = TopicsScreen::new(client, subject);
      let ok = screen.load(ui).await;
      if ok {
        terminal::print_topics(screen.topics(), Utc::now());
      }
      ok
    }
    TopicsCommand::Search {
      subject,
      query: Some(query),
    } => {
      let mut screen = TopicsScreen::new(client, subject);
      let ok = screen.search(ui, Some(&query)).await;
      if ok {
        terminal::print_topics(screen.topics(), Utc::now());
      }
      ok
    }
    TopicsCommand::Search {
      subject,
      query: None,
    } => {
      let mut screen = TopicsScreen::new(client, subject);
      terminal::live_search(&mut screen, ui, state.config.search).await;
      true
    }
    TopicsCommand::Due { subject } => {
      let mut screen = TopicsScreen::new(client, subject);
      let ok = screen.load_due(ui).await;
      if ok {
        terminal::print_topics(screen.topics(), Utc::now());
      }
      ok
    }
    TopicsCommand::Add { subject, name } => {
      let mut screen = TopicsScreen::new(client, subject);
      match screen.create(ui, &name).await {
        Some(topic) => {
          println!("Created {}  {}", topic.id, topic.name);
          true
        }
        None => false,
      }
    }
    TopicsCommand::Rename { subject, id, name } => {
      let mut screen = TopicsScreen::new(client, subject);
      screen.rename(ui, &id, &name).await.is_some()
    }
    TopicsCommand::Rm { subject, id } => {
      let mut screen = TopicsScreen::new(client, subject);
      screen.delete(ui, &id).await
    }
    TopicsCommand::Stats { id } => {
      let Some(stats) = handlers::load_topic_stats(&client, ui, &id).await else {
        return false;
      };
      println!("Flashcards: {}", stats.content.flashcards);
      terminal::print_studies(&stats.studies);
      true
    }
  }
}

// ==================== Flashcards ====================

impl LiveList for FlashcardsScreen {
  async fn search_and_show(&mut self, ui: &mut TerminalUi, query: Option<&str>) {
    if self.search(ui, query).await {
      terminal::print_flashcards(self.flashcards());
    }
  }
}

async fn cmd_cards(state: &AppState, ui: &mut TerminalUi, command: CardsCommand) -> bool {
  let client = state.client.clone();
  match command {
    CardsCommand::List { topic } => {
      let mut screen = FlashcardsScreen::new(client, topic);
      let ok = screen.load(ui).await;
      if ok {
        terminal::print_flashcards(screen.flashcards());
      }
      ok
    }
    CardsCommand::Search {
      topic,
      query: Some(query),
    } => {
      let mut screen = FlashcardsScreen::new(client, topic);
      let ok = screen.search(ui, Some(&query)).await;
      if ok {
        terminal::print_flashcards(screen.flashcards());
      }
      ok
    }
    CardsCommand::Search { topic, query: None } => {
      let mut screen = FlashcardsScreen::new(client, topic);
      terminal::live_search(&mut screen, ui, state.config.search).await;
      true
    }
    CardsCommand::Add {
      topic,
      question,
      answer,
    } => {
      let mut screen = FlashcardsScreen::new(client, topic);
      match screen.create(ui, &FlashcardDraft::new(question, answer)).await {
        Some(card) => {
          println!("Created {}", card.id);
          true
        }
        None => false,
      }
    }
    CardsCommand::Edit {
      topic,
      id,
      question,
      answer,
    } => {
      let mut screen = FlashcardsScreen::new(client, topic);
      screen
        .edit(ui, &id, &FlashcardDraft::new(question, answer))
        .await
        .is_some()
    }
    CardsCommand::Rm { topic, id } => {
      let mut screen = FlashcardsScreen::new(client, topic);
      screen.delete(ui, &id).await
    }
  }
}

// ==================== Study ====================

async fn cmd_study(state: &AppState, ui: &mut TerminalUi, topic: Option<String>) -> bool {
  let topic_id = match topic {
    Some(id) => id,
    None => match handlers::next_review(&state.client, ui).await {
      Some((subject, topic)) => {
        println!("Reviewing {} / {}", subject.name, topic.name);
        topic.id
      }
      None => {
        println!("Nothing is due for review.");
        return true;
      }
    },
  };

  let mut screen = StudyScreen::new(state.client.clone(), topic_id);
  if !screen.load(ui).await {
    return false;
  }
  if let Some(name) = screen.topic_name() {
    println!("Studying {} ({} cards)", name, screen.session().len());
  }

  let reviewed = study_loop(&mut screen, ui).await;
  screen.flush_reports().await;
  reviewed
}

/// Drive the session from stdin until the user rates it or quits
async fn study_loop(screen: &mut StudyScreen, ui: &mut TerminalUi) -> bool {
  loop {
    if screen.session().is_completed() {
      let summary = screen.session().summary();
      println!();
      println!("{}", summary.completion_message());
      for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        println!("  {}) {}", i + 1, difficulty.choice_label());
      }
      println!("  a) Study again");

      let Some(choice) = prompt("> ") else {
        return false;
      };
      match choice.as_str() {
        "a" => {
          if let Err(e) = screen.restart(ui) {
            ui.alert(handlers::ERROR_TITLE, &e.to_string());
            return false;
          }
        }
        "q" => return false,
        other => {
          let difficulty = other
            .parse::<usize>()
            .ok()
            .and_then(|n| Difficulty::ALL.get(n.wrapping_sub(1)).copied())
            .or_else(|| Difficulty::from_str(other));
          match difficulty {
            Some(difficulty) => return screen.complete(ui, difficulty).await.is_some(),
            None => println!("Pick 1-3, or a"),
          }
        }
      }
      continue;
    }

    let session = screen.session();
    let Some(card) = session.current() else {
      return false;
    };
    println!();
    println!(
      "[{}/{}  {:.0}%]  {}",
      session.position(),
      session.len(),
      session.progress(),
      card.question
    );
    if session.is_answer_shown() {
      println!("  -> {}", card.answer);
    }

    let label = if session.is_answer_shown() {
      "[c]orrect [i]ncorrect [s]kip [a]gain [q]uit > "
    } else {
      "[r]eveal [c]orrect [i]ncorrect [s]kip [a]gain [q]uit > "
    };
    let Some(choice) = prompt(label) else {
      return false;
    };

    let result = match choice.as_str() {
      "r" => screen.reveal(),
      "c" => screen.mark_correct().map(|_| ()),
      "i" => screen.mark_incorrect().map(|_| ()),
      "s" => screen.skip().map(|_| ()),
      "a" => screen.restart(ui).map(|_| ()),
      "q" => return false,
      _ => Ok(()),
    };
    if let Err(e) = result {
      tracing::debug!(error = %e, "Ignored study input");
    }
  }
}

//! Test utilities: an in-process mock of the REST API and a recording [`Ui`].
//!
//! The mock listens on an ephemeral localhost port, keeps its data in memory
//! and logs every request as `"METHOD /path"` (without the `/api` prefix or
//! query string). Failures can be injected per method and path prefix.

use axum::{
  extract::{Path, Query, Request, State},
  http::{header::AUTHORIZATION, Method, StatusCode},
  middleware::{self, Next},
  response::{IntoResponse, Response},
  routing::{get, post, put},
  Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::domain::stats::{SubjectContent, TopicContent};
use crate::domain::{
  ContentStats, Flashcard, FlashcardDraft, GeneralStats, LoginForm, RegisterForm,
  ReviewSubmission, StudyOutcome, StudyResult, StudyStats, Subject, SubjectStats, Topic,
  TopicStats, User,
};
use crate::handlers::Ui;

/// Token carried by [`MockApi::client`]
pub const TEST_TOKEN: &str = "test-token";

// ============================================================================
// Recording UI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
  pub title: String,
  pub message: String,
}

/// [`Ui`] that records every prompt and answers confirmations with `accept`
#[derive(Debug)]
pub struct RecordingUi {
  pub alerts: Vec<Alert>,
  pub confirms: Vec<Alert>,
  pub accept: bool,
}

impl Default for RecordingUi {
  fn default() -> Self {
    Self {
      alerts: Vec::new(),
      confirms: Vec::new(),
      accept: true,
    }
  }
}

impl RecordingUi {
  /// Declines every confirmation
  pub fn declining() -> Self {
    Self {
      accept: false,
      ..Self::default()
    }
  }
}

impl Ui for RecordingUi {
  fn alert(&mut self, title: &str, message: &str) {
    self.alerts.push(Alert {
      title: title.to_string(),
      message: message.to_string(),
    });
  }

  fn confirm(&mut self, title: &str, message: &str) -> bool {
    self.confirms.push(Alert {
      title: title.to_string(),
      message: message.to_string(),
    });
    self.accept
  }
}

// ============================================================================
// Mock state
// ============================================================================

struct Account {
  user: User,
  password: String,
}

#[derive(Default)]
struct MockState {
  next_id: u64,
  accounts: Vec<Account>,
  subjects: Vec<Subject>,
  topics: Vec<Topic>,
  flashcards: Vec<Flashcard>,
  study_results: Vec<StudyResult>,
  reviews: Vec<(String, ReviewSubmission)>,
  dashboard: Option<Value>,
  requests: Vec<String>,
  failures: Vec<(Method, String)>,
}

impl MockState {
  fn next_id(&mut self, prefix: &str) -> String {
    self.next_id += 1;
    format!("{}{}", prefix, self.next_id)
  }

  /// Creation times strictly increase with insertion order
  fn stamp(&self) -> DateTime<Utc> {
    let base = DateTime::from_timestamp(1_704_067_200, 0).unwrap();
    base + Duration::seconds(self.next_id as i64)
  }

  fn insert_subject(&mut self, name: &str) -> Subject {
    let id = self.next_id("m");
    let now = self.stamp();
    let subject = Subject {
      id,
      name: name.to_string(),
      user_id: "u1".to_string(),
      created_at: now,
      updated_at: now,
    };
    self.subjects.push(subject.clone());
    subject
  }

  fn insert_topic(
    &mut self,
    subject_id: &str,
    name: &str,
    next_review: Option<DateTime<Utc>>,
  ) -> Topic {
    let id = self.next_id("t");
    let now = self.stamp();
    let topic = Topic {
      id,
      name: name.to_string(),
      subject_id: subject_id.to_string(),
      next_review,
      review_count: None,
      last_difficulty: None,
      last_review_score: None,
      created_at: now,
      updated_at: now,
    };
    self.topics.push(topic.clone());
    topic
  }

  fn insert_flashcard(&mut self, topic_id: &str, question: &str, answer: &str) -> Flashcard {
    let id = self.next_id("f");
    let now = self.stamp();
    let card = Flashcard {
      id,
      question: question.to_string(),
      answer: answer.to_string(),
      topic_id: topic_id.to_string(),
      created_at: now,
      updated_at: now,
    };
    self.flashcards.push(card.clone());
    card
  }

  /// Flashcard with its topic and subject expanded, as the list endpoint returns it
  fn populated(&self, card: &Flashcard) -> Value {
    let topic = self.topics.iter().find(|t| t.id == card.topic_id);
    let subject = topic.and_then(|t| self.subjects.iter().find(|s| s.id == t.subject_id));
    json!({
      "_id": card.id,
      "question": card.question,
      "answer": card.answer,
      "temaId": {
        "_id": card.topic_id,
        "name": topic.map(|t| t.name.as_str()).unwrap_or_default(),
        "materiaId": {
          "_id": subject.map(|s| s.id.as_str()).unwrap_or_default(),
          "name": subject.map(|s| s.name.as_str()).unwrap_or_default(),
          "userId": subject.map(|s| s.user_id.as_str()).unwrap_or_default(),
        },
      },
      "createdAt": card.created_at,
      "updatedAt": card.updated_at,
    })
  }

  fn studies(&self, filter: impl Fn(&StudyResult) -> bool) -> StudyStats {
    let mut stats = StudyStats::default();
    for result in self.study_results.iter().filter(|r| filter(r)) {
      stats.total += 1;
      match result.result {
        StudyOutcome::Correct => stats.correct += 1,
        StudyOutcome::Incorrect => stats.incorrect += 1,
        StudyOutcome::Skipped => stats.skipped += 1,
      }
    }
    if stats.total > 0 {
      stats.accuracy = stats.correct as f64 / stats.total as f64 * 100.0;
    }
    stats
  }
}

type Shared = Arc<Mutex<MockState>>;

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
  state.lock().unwrap()
}

fn error(status: StatusCode, message: &str) -> Response {
  (status, Json(json!({ "message": message }))).into_response()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ============================================================================
// Server
// ============================================================================

/// Running mock server; stopped when dropped
pub struct MockApi {
  base_url: String,
  state: Shared,
  server: JoinHandle<()>,
}

impl MockApi {
  pub async fn start() -> Self {
    let state: Shared = Arc::new(Mutex::new(MockState::default()));
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });

    Self {
      base_url: format!("http://{}/api", addr),
      state,
      server,
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Client already holding a bearer token
  pub fn client(&self) -> ApiClient {
    let client = self.anonymous_client();
    client.set_token(Some(TEST_TOKEN.to_string()));
    client
  }

  pub fn anonymous_client(&self) -> ApiClient {
    ApiClient::new(&ApiConfig {
      base_url: self.base_url.clone(),
      timeout: std::time::Duration::from_secs(5),
    })
    .unwrap()
  }

  pub fn add_subject(&self, name: &str) -> Subject {
    lock(&self.state).insert_subject(name)
  }

  pub fn add_topic(
    &self,
    subject_id: &str,
    name: &str,
    next_review: Option<DateTime<Utc>>,
  ) -> Topic {
    lock(&self.state).insert_topic(subject_id, name, next_review)
  }

  pub fn add_flashcard(&self, topic_id: &str, question: &str, answer: &str) -> Flashcard {
    lock(&self.state).insert_flashcard(topic_id, question, answer)
  }

  pub fn record_study_result(&self, subject_id: &str, topic_id: &str, outcome: StudyOutcome) {
    let mut state = lock(&self.state);
    let flashcard_id = state.next_id("f");
    state.study_results.push(StudyResult {
      subject_id: subject_id.to_string(),
      topic_id: topic_id.to_string(),
      flashcard_id,
      result: outcome,
    });
  }

  pub fn set_dashboard(&self, body: Value) {
    lock(&self.state).dashboard = Some(body);
  }

  /// Answer 500 to every `method` request whose path starts with `path_prefix`
  pub fn fail(&self, method: &str, path_prefix: &str) {
    let method = Method::from_bytes(method.as_bytes()).unwrap();
    lock(&self.state)
      .failures
      .push((method, path_prefix.to_string()));
  }

  pub fn requests(&self) -> Vec<String> {
    lock(&self.state).requests.clone()
  }

  pub fn study_results(&self) -> Vec<StudyResult> {
    lock(&self.state).study_results.clone()
  }

  pub fn reviews(&self) -> Vec<(String, ReviewSubmission)> {
    lock(&self.state).reviews.clone()
  }

  pub fn subject_count(&self) -> usize {
    lock(&self.state).subjects.len()
  }

  pub fn topic(&self, id: &str) -> Option<Topic> {
    lock(&self.state).topics.iter().find(|t| t.id == id).cloned()
  }
}

impl Drop for MockApi {
  fn drop(&mut self) {
    self.server.abort();
  }
}

fn router(state: Shared) -> Router {
  let api = Router::new()
    .route("/auth/login", post(login))
    .route("/auth/register", post(register))
    .route("/materias", get(list_subjects).post(create_subject))
    .route(
      "/materias/{id}",
      get(get_subject).put(update_subject).delete(delete_subject),
    )
    .route("/search/materias", get(search_subjects))
    .route("/temas", post(create_topic))
    .route("/temas/materia/{id}", get(list_topics))
    .route("/temas/due/{id}", get(due_topics))
    .route("/temas/due-count/{id}", get(due_count))
    .route("/temas/review/{id}", put(review_topic))
    .route(
      "/temas/{id}",
      get(get_topic).put(update_topic).delete(delete_topic),
    )
    .route("/search/temas", get(search_topics))
    .route("/flashcards", post(create_flashcard))
    .route("/flashcards/tema/{id}", get(list_flashcards))
    .route(
      "/flashcards/{id}",
      get(get_flashcard).put(update_flashcard).delete(delete_flashcard),
    )
    .route("/search/flashcards", get(search_flashcards))
    .route("/stats/study-result", post(save_study_result))
    .route("/stats/general", get(general_stats))
    .route("/stats/materia/{id}", get(subject_stats))
    .route("/stats/tema/{id}", get(topic_stats))
    .route("/stats/dashboard", get(dashboard))
    .layer(middleware::from_fn_with_state(state.clone(), gatekeeper))
    .with_state(state);

  Router::new().nest("/api", api)
}

/// Logs the request, applies injected failures and requires a bearer token
async fn gatekeeper(State(state): State<Shared>, request: Request, next: Next) -> Response {
  let method = request.method().clone();
  let raw = request.uri().path();
  let path = raw.strip_prefix("/api").unwrap_or(raw).to_string();
  let authorized = request
    .headers()
    .get(AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .is_some_and(|value| value.starts_with("Bearer "));

  {
    let mut state = lock(&state);
    state.requests.push(format!("{} {}", method, path));
    let injected = state
      .failures
      .iter()
      .any(|(m, prefix)| *m == method && path.starts_with(prefix.as_str()));
    if injected {
      return error(StatusCode::INTERNAL_SERVER_ERROR, "Injected failure");
    }
  }

  if !path.starts_with("/auth/") && !authorized {
    return error(StatusCode::UNAUTHORIZED, "Token not provided");
  }
  next.run(request).await
}

// ============================================================================
// Route handlers
// ============================================================================

#[derive(Deserialize)]
struct NameBody {
  name: String,
}

#[derive(Deserialize)]
struct NewTopicBody {
  name: String,
  #[serde(rename = "materiaId")]
  subject_id: String,
}

#[derive(Deserialize)]
struct NewFlashcardBody {
  question: String,
  answer: String,
  #[serde(rename = "temaId")]
  topic_id: String,
}

#[derive(Deserialize)]
struct SearchParams {
  #[serde(default)]
  q: String,
  #[serde(rename = "materiaId")]
  subject_id: Option<String>,
  #[serde(rename = "temaId")]
  topic_id: Option<String>,
}

async fn register(State(state): State<Shared>, Json(form): Json<RegisterForm>) -> Response {
  let mut state = lock(&state);
  if state.accounts.iter().any(|a| a.user.email == form.email) {
    return error(StatusCode::BAD_REQUEST, "Email already registered");
  }
  let user = User {
    id: state.next_id("u"),
    name: form.name,
    email: form.email,
  };
  let token = format!("token-{}", user.id);
  state.accounts.push(Account {
    user: user.clone(),
    password: form.password,
  });
  (
    StatusCode::CREATED,
    Json(json!({ "message": "User created", "token": token, "user": user })),
  )
    .into_response()
}

async fn login(State(state): State<Shared>, Json(form): Json<LoginForm>) -> Response {
  let state = lock(&state);
  match state
    .accounts
    .iter()
    .find(|a| a.user.email == form.email && a.password == form.password)
  {
    Some(account) => Json(json!({
      "message": "Login successful",
      "token": format!("token-{}", account.user.id),
      "user": account.user,
    }))
    .into_response(),
    None => error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
  }
}

async fn list_subjects(State(state): State<Shared>) -> Json<Vec<Subject>> {
  Json(lock(&state).subjects.clone())
}

async fn search_subjects(
  State(state): State<Shared>,
  Query(params): Query<SearchParams>,
) -> Json<Vec<Subject>> {
  let state = lock(&state);
  Json(
    state
      .subjects
      .iter()
      .filter(|s| contains_ci(&s.name, &params.q))
      .cloned()
      .collect(),
  )
}

async fn get_subject(State(state): State<Shared>, Path(id): Path<String>) -> Response {
  match lock(&state).subjects.iter().find(|s| s.id == id) {
    Some(subject) => Json(subject.clone()).into_response(),
    None => error(StatusCode::NOT_FOUND, "Subject not found"),
  }
}

async fn create_subject(State(state): State<Shared>, Json(body): Json<NameBody>) -> Response {
  let subject = lock(&state).insert_subject(&body.name);
  (StatusCode::CREATED, Json(subject)).into_response()
}

async fn update_subject(
  State(state): State<Shared>,
  Path(id): Path<String>,
  Json(body): Json<NameBody>,
) -> Response {
  let mut state = lock(&state);
  let now = state.stamp();
  match state.subjects.iter_mut().find(|s| s.id == id) {
    Some(subject) => {
      subject.name = body.name;
      subject.updated_at = now;
      Json(subject.clone()).into_response()
    }
    None => error(StatusCode::NOT_FOUND, "Subject not found"),
  }
}

async fn delete_subject(State(state): State<Shared>, Path(id): Path<String>) -> Response {
  let mut state = lock(&state);
  let before = state.subjects.len();
  state.subjects.retain(|s| s.id != id);
  if state.subjects.len() == before {
    return error(StatusCode::NOT_FOUND, "Subject not found");
  }
  let topic_ids: Vec<String> = state
    .topics
    .iter()
    .filter(|t| t.subject_id == id)
    .map(|t| t.id.clone())
    .collect();
  state.topics.retain(|t| t.subject_id != id);
  state.flashcards.retain(|f| !topic_ids.contains(&f.topic_id));
  Json(json!({ "message": "Subject deleted" })).into_response()
}

async fn list_topics(State(state): State<Shared>, Path(id): Path<String>) -> Json<Vec<Topic>> {
  let state = lock(&state);
  Json(
    state
      .topics
      .iter()
      .filter(|t| t.subject_id == id)
      .cloned()
      .collect(),
  )
}

async fn search_topics(
  State(state): State<Shared>,
  Query(params): Query<SearchParams>,
) -> Json<Vec<Topic>> {
  let state = lock(&state);
  Json(
    state
      .topics
      .iter()
      .filter(|t| params.subject_id.as_deref() == Some(t.subject_id.as_str()))
      .filter(|t| contains_ci(&t.name, &params.q))
      .cloned()
      .collect(),
  )
}

fn is_due(topic: &Topic, now: DateTime<Utc>) -> bool {
  topic.next_review.is_some_and(|next| next <= now)
}

async fn due_topics(State(state): State<Shared>, Path(id): Path<String>) -> Json<Vec<Topic>> {
  let now = Utc::now();
  let state = lock(&state);
  Json(
    state
      .topics
      .iter()
      .filter(|t| t.subject_id == id && is_due(t, now))
      .cloned()
      .collect(),
  )
}

async fn due_count(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
  let now = Utc::now();
  let state = lock(&state);
  let count = state
    .topics
    .iter()
    .filter(|t| t.subject_id == id && is_due(t, now))
    .count();
  Json(json!({ "count": count }))
}

async fn get_topic(State(state): State<Shared>, Path(id): Path<String>) -> Response {
  match lock(&state).topics.iter().find(|t| t.id == id) {
    Some(topic) => Json(topic.clone()).into_response(),
    None => error(StatusCode::NOT_FOUND, "Topic not found"),
  }
}

async fn create_topic(State(state): State<Shared>, Json(body): Json<NewTopicBody>) -> Response {
  let topic = lock(&state).insert_topic(&body.subject_id, &body.name, None);
  (StatusCode::CREATED, Json(topic)).into_response()
}

async fn update_topic(
  State(state): State<Shared>,
  Path(id): Path<String>,
  Json(body): Json<NameBody>,
) -> Response {
  let mut state = lock(&state);
  let now = state.stamp();
  match state.topics.iter_mut().find(|t| t.id == id) {
    Some(topic) => {
      topic.name = body.name;
      topic.updated_at = now;
      Json(topic.clone()).into_response()
    }
    None => error(StatusCode::NOT_FOUND, "Topic not found"),
  }
}

async fn delete_topic(State(state): State<Shared>, Path(id): Path<String>) -> Response {
  let mut state = lock(&state);
  let before = state.topics.len();
  state.topics.retain(|t| t.id != id);
  if state.topics.len() == before {
    return error(StatusCode::NOT_FOUND, "Topic not found");
  }
  state.flashcards.retain(|f| f.topic_id != id);
  Json(json!({ "message": "Topic deleted" })).into_response()
}

async fn review_topic(
  State(state): State<Shared>,
  Path(id): Path<String>,
  Json(review): Json<ReviewSubmission>,
) -> Response {
  let mut state = lock(&state);
  let now = Utc::now();
  let Some(topic) = state.topics.iter_mut().find(|t| t.id == id) else {
    return error(StatusCode::NOT_FOUND, "Topic not found");
  };
  topic.next_review = Some(now + Duration::days(i64::from(review.difficulty.interval_days())));
  topic.review_count = Some(topic.review_count.unwrap_or(0) + 1);
  topic.last_difficulty = Some(review.difficulty);
  topic.last_review_score = Some(review.score);
  topic.updated_at = now;
  let topic = topic.clone();
  state.reviews.push((id, review));
  Json(topic).into_response()
}

async fn list_flashcards(State(state): State<Shared>, Path(id): Path<String>) -> Json<Vec<Value>> {
  let state = lock(&state);
  Json(
    state
      .flashcards
      .iter()
      .filter(|f| f.topic_id == id)
      .map(|f| state.populated(f))
      .collect(),
  )
}

async fn search_flashcards(
  State(state): State<Shared>,
  Query(params): Query<SearchParams>,
) -> Json<Vec<Flashcard>> {
  let state = lock(&state);
  Json(
    state
      .flashcards
      .iter()
      .filter(|f| params.topic_id.as_deref() == Some(f.topic_id.as_str()))
      .filter(|f| contains_ci(&f.question, &params.q))
      .cloned()
      .collect(),
  )
}

async fn get_flashcard(State(state): State<Shared>, Path(id): Path<String>) -> Response {
  match lock(&state).flashcards.iter().find(|f| f.id == id) {
    Some(card) => Json(card.clone()).into_response(),
    None => error(StatusCode::NOT_FOUND, "Flashcard not found"),
  }
}

async fn create_flashcard(
  State(state): State<Shared>,
  Json(body): Json<NewFlashcardBody>,
) -> Response {
  let card = lock(&state).insert_flashcard(&body.topic_id, &body.question, &body.answer);
  (StatusCode::CREATED, Json(card)).into_response()
}

async fn update_flashcard(
  State(state): State<Shared>,
  Path(id): Path<String>,
  Json(draft): Json<FlashcardDraft>,
) -> Response {
  let mut state = lock(&state);
  let now = state.stamp();
  match state.flashcards.iter_mut().find(|f| f.id == id) {
    Some(card) => {
      card.question = draft.question;
      card.answer = draft.answer;
      card.updated_at = now;
      Json(card.clone()).into_response()
    }
    None => error(StatusCode::NOT_FOUND, "Flashcard not found"),
  }
}

async fn delete_flashcard(State(state): State<Shared>, Path(id): Path<String>) -> Response {
  let mut state = lock(&state);
  let before = state.flashcards.len();
  state.flashcards.retain(|f| f.id != id);
  if state.flashcards.len() == before {
    return error(StatusCode::NOT_FOUND, "Flashcard not found");
  }
  Json(json!({ "message": "Flashcard deleted" })).into_response()
}

async fn save_study_result(
  State(state): State<Shared>,
  Json(result): Json<StudyResult>,
) -> StatusCode {
  lock(&state).study_results.push(result);
  StatusCode::CREATED
}

async fn general_stats(State(state): State<Shared>) -> Json<GeneralStats> {
  let state = lock(&state);
  Json(GeneralStats {
    content: ContentStats {
      subjects: state.subjects.len() as u64,
      topics: state.topics.len() as u64,
      flashcards: state.flashcards.len() as u64,
    },
    studies: state.studies(|_| true),
  })
}

async fn subject_stats(State(state): State<Shared>, Path(id): Path<String>) -> Json<SubjectStats> {
  let state = lock(&state);
  let topic_ids: Vec<&str> = state
    .topics
    .iter()
    .filter(|t| t.subject_id == id)
    .map(|t| t.id.as_str())
    .collect();
  let flashcards = state
    .flashcards
    .iter()
    .filter(|f| topic_ids.contains(&f.topic_id.as_str()))
    .count();
  Json(SubjectStats {
    content: SubjectContent {
      topics: topic_ids.len() as u64,
      flashcards: flashcards as u64,
    },
    studies: state.studies(|r| r.subject_id == id),
    last_studied: None,
  })
}

async fn topic_stats(State(state): State<Shared>, Path(id): Path<String>) -> Json<TopicStats> {
  let state = lock(&state);
  let flashcards = state.flashcards.iter().filter(|f| f.topic_id == id).count();
  Json(TopicStats {
    content: TopicContent {
      flashcards: flashcards as u64,
    },
    studies: state.studies(|r| r.topic_id == id),
    last_studied: None,
  })
}

async fn dashboard(State(state): State<Shared>) -> Json<Value> {
  Json(lock(&state).dashboard.clone().unwrap_or_else(|| json!({})))
}

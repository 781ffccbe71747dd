//! REST client for the flashcard service.
//!
//! One free function per endpoint, grouped by resource. Every request carries
//! the bearer token installed on the [`ApiClient`], if any.

pub mod auth;
pub mod error;
pub mod flashcards;
pub mod review;
pub mod stats;
pub mod subjects;
pub mod topics;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::config::ApiConfig;

// Re-export all public items from submodules
pub use auth::*;
pub use error::{ApiError, ApiResult};
pub use flashcards::*;
pub use review::*;
pub use stats::*;
pub use subjects::*;
pub use topics::*;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
  /// Log the error at warn level and return None
  fn log_warn(self, context: &str) -> Option<T>;
  /// Log the error at warn level and return the default
  fn log_warn_default(self, context: &str) -> T
  where
    T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
  fn log_warn(self, context: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!(error = %e, "{}", context);
        None
      }
    }
  }

  fn log_warn_default(self, context: &str) -> T
  where
    T: Default,
  {
    self.log_warn(context).unwrap_or_default()
  }
}

/// Shape of error bodies returned by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: Option<String>,
}

/// Thin wrapper over `reqwest::Client` that knows the base URL and token.
///
/// Cloning is cheap and clones share the token, so a login through one clone
/// is visible to all of them.
#[derive(Clone)]
pub struct ApiClient {
  http: Client,
  base_url: String,
  token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
  pub fn new(config: &ApiConfig) -> ApiResult<Self> {
    // Normalize URL - ensure no trailing slash
    let base_url = config.base_url.trim_end_matches('/').to_string();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
      return Err(ApiError::InvalidUrl(format!(
        "{} (must start with http:// or https://)",
        config.base_url
      )));
    }

    let http = Client::builder().timeout(config.timeout).build()?;

    Ok(Self {
      http,
      base_url,
      token: Arc::new(RwLock::new(None)),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Install (or remove) the bearer token attached to subsequent requests
  pub fn set_token(&self, token: Option<String>) {
    let mut guard = match self.token.write() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    };
    *guard = token;
  }

  pub fn token(&self) -> Option<String> {
    match self.token.read() {
      Ok(guard) => guard.clone(),
      Err(poisoned) => poisoned.into_inner().clone(),
    }
  }

  pub fn has_token(&self) -> bool {
    self.token().is_some()
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    match self.token() {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }

  /// Send a request and return the raw successful response
  async fn execute(&self, path: &str, request: RequestBuilder) -> ApiResult<reqwest::Response> {
    let response = match self.authorize(request).send().await {
      Ok(response) => response,
      Err(e) => {
        tracing::warn!(path, error = %e, "API request failed");
        return Err(e.into());
      }
    };

    let status = response.status();
    if !status.is_success() {
      let text = response.text().await.unwrap_or_default();
      let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message);
      tracing::warn!(path, status = status.as_u16(), ?message, "API error response");
      return Err(ApiError::Status {
        status: status.as_u16(),
        message,
      });
    }

    tracing::debug!(path, status = status.as_u16(), "API response");
    Ok(response)
  }

  async fn execute_json<T: DeserializeOwned>(
    &self,
    path: &str,
    request: RequestBuilder,
  ) -> ApiResult<T> {
    let response = self.execute(path, request).await?;
    Ok(response.json::<T>().await?)
  }

  pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
    let request = self.http.get(self.url(path));
    self.execute_json(path, request).await
  }

  pub(crate) async fn get_with_query<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> ApiResult<T> {
    let request = self.http.get(self.url(path)).query(query);
    self.execute_json(path, request).await
  }

  pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
  ) -> ApiResult<T> {
    let request = self.http.post(self.url(path)).json(body);
    self.execute_json(path, request).await
  }

  /// POST whose response body is not needed
  pub(crate) async fn post_discard<B: Serialize + ?Sized>(
    &self,
    path: &str,
    body: &B,
  ) -> ApiResult<()> {
    let request = self.http.post(self.url(path)).json(body);
    self.execute(path, request).await?;
    Ok(())
  }

  pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
  ) -> ApiResult<T> {
    let request = self.http.put(self.url(path)).json(body);
    self.execute_json(path, request).await
  }

  pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
    let request = self.http.delete(self.url(path));
    self.execute(path, request).await?;
    Ok(())
  }
}

/// Percent-encode an id for use as a path segment
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
  urlencoding::encode(id)
}

/// Normalize an optional search term: `None` when blank
pub(crate) fn search_term(query: Option<&str>) -> Option<&str> {
  query.map(str::trim).filter(|q| !q.is_empty())
}

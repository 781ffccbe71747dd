use thiserror::Error;

use crate::auth::store::StoreError;

/// Fallback text when neither the server nor the transport gave a usable message
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),
  #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
  Status { status: u16, message: Option<String> },
  #[error("Invalid API base URL: {0}")]
  InvalidUrl(String),
  #[error("Auth storage error: {0}")]
  Store(#[from] StoreError),
}

impl ApiError {
  /// Text suitable for showing to the user.
  ///
  /// Prefers the server's own `message`, then the transport error, then a
  /// generic fallback.
  pub fn user_message(&self) -> String {
    match self {
      Self::Status {
        message: Some(message),
        ..
      } if !message.trim().is_empty() => message.clone(),
      Self::Status { .. } => GENERIC_ERROR_MESSAGE.to_string(),
      Self::Http(e) => e.to_string(),
      other => other.to_string(),
    }
  }

  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Http(e) => e.status().map(|s| s.as_u16()),
      _ => None,
    }
  }

  pub fn is_unauthorized(&self) -> bool {
    self.status() == Some(401)
  }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

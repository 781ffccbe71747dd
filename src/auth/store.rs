//! File-backed storage for the bearer token and logged-in user.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::User;
use crate::paths;

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
  #[error("Invalid auth data: {0}")]
  Json(#[from] serde_json::Error),
}

/// What gets persisted after a successful login or registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAuth {
  pub token: String,
  pub user: User,
}

#[derive(Debug, Clone)]
pub struct AuthStore {
  path: PathBuf,
}

impl Default for AuthStore {
  fn default() -> Self {
    Self::new(paths::auth_store_path())
  }
}

impl AuthStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn save(&self, token: &str, user: &User) -> Result<(), StoreError> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    let auth = StoredAuth {
      token: token.to_string(),
      user: user.clone(),
    };
    std::fs::write(&self.path, serde_json::to_vec_pretty(&auth)?)?;
    tracing::debug!(path = %self.path.display(), "Auth data saved");
    Ok(())
  }

  /// Read the stored auth; `Ok(None)` when nobody is logged in
  pub fn load(&self) -> Result<Option<StoredAuth>, StoreError> {
    match std::fs::read(&self.path) {
      Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  pub fn token(&self) -> Option<String> {
    self.load().ok().flatten().map(|auth| auth.token)
  }

  pub fn user(&self) -> Option<User> {
    self.load().ok().flatten().map(|auth| auth.user)
  }

  /// Remove stored auth. Clearing an empty store is not an error.
  pub fn clear(&self) -> Result<(), StoreError> {
    match std::fs::remove_file(&self.path) {
      Ok(()) => {
        tracing::debug!(path = %self.path.display(), "Auth data removed");
        Ok(())
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}

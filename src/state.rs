//! Application state shared by every command.

use crate::api::{ApiClient, ApiResult};
use crate::auth::{restore_session, AuthStore};
use crate::config::Config;
use crate::domain::User;

/// Resolved configuration, the API client and the persisted session
#[derive(Clone)]
pub struct AppState {
  pub config: Config,
  pub client: ApiClient,
  pub store: AuthStore,
}

impl AppState {
  /// Build the client and install the stored token, if any.
  ///
  /// Returns the stored user alongside the state.
  pub fn new(config: Config, store: AuthStore) -> ApiResult<(Self, Option<User>)> {
    let client = ApiClient::new(&config.api)?;
    let user = restore_session(&client, &store);
    Ok((
      Self {
        config,
        client,
        store,
      },
      user,
    ))
  }

  pub fn is_logged_in(&self) -> bool {
    self.client.has_token()
  }
}

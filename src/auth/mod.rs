//! Persistent authentication state for the client.

pub mod store;

pub use store::{AuthStore, StoreError, StoredAuth};

use crate::api::ApiClient;
use crate::domain::User;

/// Install the persisted token (if any) on the client.
///
/// Returns the stored user so callers can greet them. A corrupt store is
/// logged and treated as logged out.
pub fn restore_session(client: &ApiClient, store: &AuthStore) -> Option<User> {
  match store.load() {
    Ok(Some(auth)) => {
      tracing::debug!(user = %auth.user.email, "Restored stored session");
      client.set_token(Some(auth.token));
      Some(auth.user)
    }
    Ok(None) => None,
    Err(e) => {
      tracing::warn!(error = %e, "Ignoring unreadable auth store");
      None
    }
  }
}

//! Login, registration and logout.

use super::Ui;
use crate::api::{self, ApiClient};
use crate::auth::AuthStore;
use crate::domain::{AuthResponse, LoginForm, RegisterForm, User};
use crate::validation::{validate_login, validate_register, FieldErrors};

/// Why a login or registration did not go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
  /// Field problems caught before any request was sent
  Invalid(FieldErrors),
  /// The server refused; the message was already shown to the user
  Rejected(String),
}

pub async fn login(
  client: &ApiClient,
  store: &AuthStore,
  ui: &mut dyn Ui,
  form: &LoginForm,
) -> Result<User, AuthFailure> {
  validate_login(form).map_err(AuthFailure::Invalid)?;

  let form = LoginForm {
    email: form.email.trim().to_string(),
    password: form.password.clone(),
  };
  match api::login(client, &form).await {
    Ok(response) => Ok(establish_session(client, store, response)),
    Err(e) => {
      let message = e.user_message();
      tracing::error!(error = %e, "Login failed");
      ui.alert("Login failed", &message);
      Err(AuthFailure::Rejected(message))
    }
  }
}

pub async fn register(
  client: &ApiClient,
  store: &AuthStore,
  ui: &mut dyn Ui,
  form: &RegisterForm,
) -> Result<User, AuthFailure> {
  validate_register(form).map_err(AuthFailure::Invalid)?;

  let form = RegisterForm {
    name: form.name.trim().to_string(),
    email: form.email.trim().to_string(),
    password: form.password.clone(),
  };
  match api::register(client, &form).await {
    Ok(response) => Ok(establish_session(client, store, response)),
    Err(e) => {
      let message = e.user_message();
      tracing::error!(error = %e, "Registration failed");
      ui.alert("Registration failed", &message);
      Err(AuthFailure::Rejected(message))
    }
  }
}

/// Persist the new session and install its token on the client.
///
/// A store failure only costs persistence; the session stays usable in
/// this process.
fn establish_session(client: &ApiClient, store: &AuthStore, response: AuthResponse) -> User {
  if let Err(e) = store.save(&response.token, &response.user) {
    tracing::error!(error = %e, path = %store.path().display(), "Failed to persist session");
  }
  client.set_token(Some(response.token));
  response.user
}

/// Log out after confirmation; returns false if the user declined
pub fn logout(client: &ApiClient, store: &AuthStore, ui: &mut dyn Ui) -> bool {
  if !ui.confirm("Log out", "Are you sure you want to log out?") {
    return false;
  }

  if let Err(e) = store.clear() {
    tracing::error!(error = %e, "Failed to clear stored session");
  }
  client.set_token(None);
  tracing::info!("Logged out");
  true
}

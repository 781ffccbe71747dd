//! `/auth` endpoints.

use super::{ApiClient, ApiResult};
use crate::domain::{AuthResponse, LoginForm, RegisterForm};

pub async fn login(client: &ApiClient, credentials: &LoginForm) -> ApiResult<AuthResponse> {
  let response: AuthResponse = client.post("/auth/login", credentials).await?;
  tracing::info!(user = %response.user.email, "Logged in");
  Ok(response)
}

pub async fn register(client: &ApiClient, form: &RegisterForm) -> ApiResult<AuthResponse> {
  let response: AuthResponse = client.post("/auth/register", form).await?;
  tracing::info!(user = %response.user.email, "Registered");
  Ok(response)
}

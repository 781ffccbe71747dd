//! Client-side form validation.
//!
//! Each validator returns `None` when the value is acceptable and the
//! user-facing message otherwise. Messages are collected per field in
//! [`FieldErrors`] so a form can show them inline and block submission.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::domain::{FlashcardDraft, LoginForm, RegisterForm};

// ============================================================================
// Field validators
// ============================================================================

/// Required text: anything but blank
pub fn validate_required(value: &str, label: &str) -> Option<String> {
  if value.trim().is_empty() {
    Some(format!("{} is required", label))
  } else {
    None
  }
}

pub fn validate_name(name: &str) -> Option<String> {
  validate_required(name, "Name")
}

pub fn validate_email(email: &str) -> Option<String> {
  if email.trim().is_empty() {
    return Some("Email is required".to_string());
  }
  if !looks_like_email(email) {
    return Some("Invalid email".to_string());
  }
  None
}

pub fn validate_password(password: &str) -> Option<String> {
  if password.trim().is_empty() {
    return Some("Password is required".to_string());
  }
  if password.chars().count() < MIN_PASSWORD_LENGTH {
    return Some(format!(
      "Password must be at least {} characters",
      MIN_PASSWORD_LENGTH
    ));
  }
  None
}

/// `x@y.z` anywhere in the input, each part free of whitespace
static EMAIL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

fn looks_like_email(input: &str) -> bool {
  EMAIL.is_match(input)
}

// ============================================================================
// Form-level validation
// ============================================================================

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
  errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record the validator's message for `field`, if it produced one
  pub fn check(&mut self, field: &'static str, result: Option<String>) -> &mut Self {
    if let Some(message) = result {
      self.errors.insert(field, message);
    }
    self
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.errors.get(field).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
    self.errors.iter().map(|(field, message)| (*field, message.as_str()))
  }

  /// `Ok(())` when no field failed
  pub fn into_result(self) -> Result<(), FieldErrors> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }
}

impl std::fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let messages: Vec<&str> = self.errors.values().map(String::as_str).collect();
    write!(f, "{}", messages.join("\n"))
  }
}

pub fn validate_login(form: &LoginForm) -> Result<(), FieldErrors> {
  let mut errors = FieldErrors::new();
  errors
    .check("email", validate_email(&form.email))
    .check("password", validate_password(&form.password));
  errors.into_result()
}

pub fn validate_register(form: &RegisterForm) -> Result<(), FieldErrors> {
  let mut errors = FieldErrors::new();
  errors
    .check("name", validate_name(&form.name))
    .check("email", validate_email(&form.email))
    .check("password", validate_password(&form.password));
  errors.into_result()
}

pub fn validate_flashcard(draft: &FlashcardDraft) -> Result<(), FieldErrors> {
  let mut errors = FieldErrors::new();
  errors
    .check("question", validate_required(&draft.question, "Question"))
    .check("answer", validate_required(&draft.answer, "Answer"));
  errors.into_result()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_required() {
    assert_eq!(validate_required("Algebra", "Name"), None);
    assert_eq!(validate_required("   ", "Name"), Some("Name is required".to_string()));
    assert_eq!(validate_required("", "Question"), Some("Question is required".to_string()));
  }

  #[test]
  fn test_email_accepts() {
    assert_eq!(validate_email("ana@example.com"), None);
    assert_eq!(validate_email("a@b.c"), None);
    assert_eq!(validate_email("first.last@sub.example.org"), None);
    // Unanchored match, like the form's pattern
    assert_eq!(validate_email("name: a@b.co"), None);
  }

  #[test]
  fn test_email_rejects() {
    assert_eq!(validate_email(""), Some("Email is required".to_string()));
    assert_eq!(validate_email("ana"), Some("Invalid email".to_string()));
    assert_eq!(validate_email("ana@example"), Some("Invalid email".to_string()));
    assert_eq!(validate_email("@example.com"), Some("Invalid email".to_string()));
    assert_eq!(validate_email("ana@.com"), Some("Invalid email".to_string()));
    assert_eq!(validate_email("ana@example."), Some("Invalid email".to_string()));
    assert_eq!(validate_email("ana @example.com"), Some("Invalid email".to_string()));
  }

  #[test]
  fn test_password_length() {
    assert_eq!(validate_password(""), Some("Password is required".to_string()));
    assert_eq!(
      validate_password("12345"),
      Some("Password must be at least 6 characters".to_string())
    );
    assert_eq!(validate_password("123456"), None);
    // Counted in characters, not bytes
    assert!(validate_password("ção12").is_some());
  }

  #[test]
  fn test_password_whitespace_only_is_missing() {
    assert_eq!(validate_password("      "), Some("Password is required".to_string()));
    assert_eq!(validate_password("  pass  "), None);
  }

  #[test]
  fn test_login_form() {
    let ok = LoginForm {
      email: "ana@example.com".to_string(),
      password: "secret1".to_string(),
    };
    assert!(validate_login(&ok).is_ok());

    let bad = LoginForm {
      email: "nope".to_string(),
      password: "123".to_string(),
    };
    let errors = validate_login(&bad).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("email"), Some("Invalid email"));
    assert!(errors.get("password").is_some());
    assert!(errors.get("name").is_none());
  }

  #[test]
  fn test_register_requires_name() {
    let form = RegisterForm {
      name: " ".to_string(),
      email: "ana@example.com".to_string(),
      password: "secret1".to_string(),
    };
    let errors = validate_register(&form).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("name"), Some("Name is required"));
  }

  #[test]
  fn test_flashcard_draft() {
    assert!(validate_flashcard(&FlashcardDraft::new("2+2?", "4")).is_ok());
    let errors = validate_flashcard(&FlashcardDraft::new("2+2?", "")).unwrap_err();
    assert_eq!(errors.get("answer"), Some("Answer is required"));
    assert_eq!(errors.to_string(), "Answer is required");
  }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Timestamped;

/// Top-level study category (`materia` on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  pub user_id: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Timestamped for Subject {
  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

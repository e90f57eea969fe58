use serde::{Deserialize, Serialize};

use crate::shared::role::Role;

/// Stored account. `password_hash` only ever holds a bcrypt hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(rename = "_id")]
  pub id: String,
  pub email: String,
  pub password_hash: String,
  pub role: Role,
  pub first_name: String,
  pub last_name: String,
}

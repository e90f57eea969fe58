use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::role::Role;

/// Employee document, serialized the same way to MongoDB and to clients.
#[derive(ToSchema, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  #[serde(rename = "_id")]
  pub id: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub role: Role,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRto {
  pub id: String,
  pub email: String,
  pub token: String,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{shared::role::Role, users::model::user::User};

/// Public view of a user, never carries the password hash.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRto {
  #[serde(rename = "_id")]
  pub id: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub role: Role,
}

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredUserRto {
  pub message: String,
  pub user: UserRto,
}

impl From<User> for UserRto {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      first_name: user.first_name,
      last_name: user.last_name,
      email: user.email,
      role: user.role,
    }
  }
}

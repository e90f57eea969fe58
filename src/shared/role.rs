use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
  ToSchema, Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize,
)]
pub enum Role {
  Admin,
  #[default]
  Staff,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
  type Err = UnknownRole;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "Admin" => Ok(Role::Admin),
      "Staff" => Ok(Role::Staff),
      other => Err(UnknownRole(other.to_string())),
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Role::Admin => write!(f, "Admin"),
      Role::Staff => write!(f, "Staff"),
    }
  }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain acknowledgment body, e.g. after a delete.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRto {
  pub message: String,
}

impl From<&str> for MessageRto {
  fn from(message: &str) -> Self {
    Self {
      message: message.to_string(),
    }
  }
}

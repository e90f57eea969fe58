use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator_derive::Validate;

#[derive(ToSchema, Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginDto {
  #[validate(length(min = 1))]
  pub email: String,
  #[validate(length(min = 1))]
  pub password: String,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator_derive::Validate;

#[derive(ToSchema, Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterUserDto {
  #[validate(length(min = 1, message = "All fields are required"))]
  pub first_name: String,
  #[validate(length(min = 1, message = "All fields are required"))]
  pub last_name: String,
  #[validate(length(min = 1, message = "All fields are required"))]
  pub email: String,
  #[validate(length(min = 1, message = "All fields are required"))]
  pub password: String,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator_derive::Validate;

#[derive(ToSchema, Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateRoleDto {
  #[validate(length(min = 1, message = "All fields are required"))]
  pub role: String,
}

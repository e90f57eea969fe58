use actix_web::{web, HttpResponse};
use dto::login_dto::LoginDto;
use once_cell::sync::Lazy;
use regex::Regex;
use rto::login_rto::LoginRto;
use validator::Validate;

use crate::employees::repository::employee_repository::EmployeeRepository;
use crate::shared::http_error::{ApiError, HttpError};
use crate::users::model::user::User;
use crate::users::repository::user_repository::{
  FindOneProperty, UserRepository,
};
use crate::AppState;

pub mod dto;
pub mod rto;

static EMAIL_FORMAT: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[utoipa::path(
  post,
  path = "/api/auth/login",
  request_body = LoginDto,
  responses(
    (status = 200, description = "Signed session token", body = LoginRto),
    (status = 400, description = "Missing field or malformed email",
      body = HttpError),
    (status = 401, description = "Unknown email or wrong password",
      body = HttpError),
    (status = 500, description = "Server error", body = HttpError)
  )
)]
pub async fn auth_login<UR: UserRepository, ER: EmployeeRepository>(
  data: web::Data<AppState<UR, ER>>,
  dto: web::Json<LoginDto>,
) -> Result<HttpResponse, ApiError> {
  if dto.validate().is_err() {
    return Err(ApiError::InvalidInput(
      "Please provide both email and password",
    ));
  }
  if !EMAIL_FORMAT.is_match(&dto.email) {
    return Err(ApiError::InvalidInput("Invalid email format"));
  }

  // No lockout nor rate limiting on this route.
  let user = data
    .user_repository
    .find_one(FindOneProperty::Email(&dto.email))
    .await
    .map_err(|error| ApiError::internal("Server error", error))?
    .ok_or_else(unauthorized)?;

  if !verify_password(&data, &dto, &user).await? {
    tracing::debug!(user_id = %user.id, "Password mismatch");
    return Err(unauthorized());
  }

  let token = data
    .token_service
    .issue(&user.id, &user.email)
    .map_err(|error| ApiError::internal("Server error", error))?;

  Ok(HttpResponse::Ok().json(LoginRto {
    id: user.id,
    email: user.email,
    token,
  }))
}

async fn verify_password<UR: UserRepository, ER: EmployeeRepository>(
  data: &web::Data<AppState<UR, ER>>,
  dto: &LoginDto,
  user: &User,
) -> Result<bool, ApiError> {
  data
    .hasher
    .verify_password(&dto.password, &user.password_hash)
    .await
    .map_err(|error| ApiError::internal("Server error", error))
}

fn unauthorized() -> ApiError {
  ApiError::AuthenticationFailed("Invalid email or password")
}

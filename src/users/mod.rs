pub mod dto;
pub mod model;
pub mod repository;
pub mod rto;

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use dto::register_user_dto::RegisterUserDto;
use model::user::User;
use nanoid::nanoid;
use repository::user_repository::{
  FindOneProperty, UserRepository, UserRepositoryError,
};
use rto::registered_user_rto::{RegisteredUserRto, UserRto};
use validator::Validate;

use crate::employees::repository::employee_repository::EmployeeRepository;
use crate::shared::http_error::{ApiError, HttpError};
use crate::shared::role::Role;
use crate::AppState;

#[utoipa::path(
  post,
  path = "/api/user/register",
  request_body = RegisterUserDto,
  responses(
    (status = 201, description = "User created", body = RegisteredUserRto),
    (status = 400, description = "Missing field or user already exists",
      body = HttpError),
    (status = 500, description = "Server error", body = HttpError)
  )
)]
pub async fn register_user<UR: UserRepository, ER: EmployeeRepository>(
  data: web::Data<AppState<UR, ER>>,
  dto: web::Json<RegisterUserDto>,
) -> Result<HttpResponse, ApiError> {
  if dto.validate().is_err() {
    return Err(ApiError::InvalidInput("All fields are required"));
  }

  let existing = data
    .user_repository
    .find_one(FindOneProperty::Email(&dto.email))
    .await
    .map_err(|error| ApiError::internal("Error registering user", error))?;
  if existing.is_some() {
    return Err(user_already_exists());
  }

  let password_hash = data
    .hasher
    .hash_password(&dto.password)
    .await
    .map_err(|error| ApiError::internal("Error registering user", error))?;
  let user = User::from(dto.into_inner(), password_hash);

  match data.user_repository.create(user.clone()).await {
    Ok(()) => {
      tracing::info!(user_id = %user.id, "Registered user");
      Ok(
        HttpResponse::Created()
          .append_header((
            header::LOCATION,
            format!("/api/users/{}", user.id),
          ))
          .json(RegisteredUserRto {
            message: String::from("User created successfully"),
            user: UserRto::from(user),
          }),
      )
    }
    Err(UserRepositoryError::Duplicate) => Err(user_already_exists()),
    Err(error) => Err(ApiError::internal("Error registering user", error)),
  }
}

fn user_already_exists() -> ApiError {
  ApiError::Conflict("User already exists")
}

impl User {
  fn from(dto: RegisterUserDto, password_hash: String) -> Self {
    Self {
      id: nanoid!(),
      email: dto.email,
      password_hash,
      role: Role::Staff,
      first_name: dto.first_name,
      last_name: dto.last_name,
    }
  }
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test, App};
  use fake::{
    faker::{
      internet::en::{Password, SafeEmail},
      name::en::{FirstName, LastName},
    },
    Fake,
  };

  use super::*;
  use crate::tests::{
    test_app_state, TestAppState, TestEmployeeRepository, TestUserRepository,
  };

  fn register_dto() -> RegisterUserDto {
    RegisterUserDto {
      first_name: FirstName().fake(),
      last_name: LastName().fake(),
      email: SafeEmail().fake(),
      password: Password(12..13).fake(),
    }
  }

  macro_rules! register_app {
    ($state:expr) => {
      test::init_service(App::new().app_data($state.clone()).route(
        "/api/user/register",
        web::post()
          .to(register_user::<TestUserRepository, TestEmployeeRepository>),
      ))
      .await
    };
  }

  #[actix_web::test]
  async fn test_register_user_successful() {
    let state: TestAppState = test_app_state();
    let app = register_app!(state);
    let dto = register_dto();

    let request = test::TestRequest::post()
      .uri("/api/user/register")
      .set_json(serde_json::json!({
        "firstName": dto.first_name,
        "lastName": dto.last_name,
        "email": dto.email,
        "password": dto.password,
      }))
      .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["email"], dto.email.as_str());
    assert_eq!(body["user"]["role"], "Staff");
    assert!(body["user"].get("passwordHash").is_none());

    let stored = state
      .user_repository
      .find_one(FindOneProperty::Email(&dto.email))
      .await
      .unwrap()
      .expect("user should be stored");
    assert_ne!(stored.password_hash, dto.password);
    let by_id = state
      .user_repository
      .find_one(FindOneProperty::Id(&stored.id))
      .await
      .unwrap();
    assert_eq!(by_id, Some(stored));
  }

  #[actix_web::test]
  async fn test_register_user_already_exists() {
    let state: TestAppState = test_app_state();
    let app = register_app!(state);
    let dto = register_dto();
    state
      .user_repository
      .create(User::from(dto.clone(), String::new()))
      .await
      .unwrap();

    let request = test::TestRequest::post()
      .uri("/api/user/register")
      .set_json(serde_json::json!({
        "firstName": dto.first_name,
        "lastName": dto.last_name,
        "email": dto.email,
        "password": dto.password,
      }))
      .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: HttpError = test::read_body_json(response).await;
    assert_eq!(error.message, "User already exists");
    assert_eq!(state.user_repository.users.read().unwrap().len(), 1);
  }

  #[actix_web::test]
  async fn test_register_user_missing_field() {
    let state: TestAppState = test_app_state();
    let app = register_app!(state);

    let request = test::TestRequest::post()
      .uri("/api/user/register")
      .set_json(serde_json::json!({
        "firstName": "Ada",
        "email": "ada@x.com",
        "password": "secret",
      }))
      .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: HttpError = test::read_body_json(response).await;
    assert_eq!(error.message, "All fields are required");
    assert!(state.user_repository.users.read().unwrap().is_empty());
  }
}

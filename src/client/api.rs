use async_trait::async_trait;
use mockall::automock;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
  auth::{dto::login_dto::LoginDto, rto::login_rto::LoginRto},
  employees::model::employee::Employee,
  shared::{http_error::HttpError, role::Role},
  users::{
    dto::register_user_dto::RegisterUserDto,
    rto::registered_user_rto::RegisteredUserRto,
  },
};

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("Request error: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Server answered {status}: {message}")]
  Status { status: StatusCode, message: String },
}

impl ClientError {
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      ClientError::Status { status, .. } => Some(*status),
      ClientError::Request(error) => error.status(),
    }
  }
}

/// Fields collected by the intake form, posted as-is to the create route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub role: Role,
}

#[automock]
#[async_trait]
pub trait EmployeeApi: Send + Sync {
  async fn list(&self) -> Result<Vec<Employee>, ClientError>;
  async fn create(&self, draft: &EmployeeDraft)
    -> Result<Employee, ClientError>;
  async fn update_role(
    &self,
    id: &str,
    role: Role,
  ) -> Result<Employee, ClientError>;
  async fn delete(&self, id: &str) -> Result<(), ClientError>;
}

/// `EmployeeApi` over HTTP, every call carries the session token.
pub struct HttpEmployeeApi {
  http: reqwest::Client,
  base_url: String,
  token: String,
}

impl HttpEmployeeApi {
  pub fn new(base_url: &str, token: &str) -> Self {
    Self {
      http: reqwest::Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
      token: token.to_string(),
    }
  }

  /// Creates an account. Needs no session, the new user logs in afterwards.
  pub async fn register(
    base_url: &str,
    dto: &RegisterUserDto,
  ) -> Result<RegisteredUserRto, ClientError> {
    let api = Self::new(base_url, "");
    let response = api
      .http
      .post(api.url("/api/user/register"))
      .json(dto)
      .send()
      .await?;
    read_json(response).await
  }

  /// Exchanges credentials for a session token.
  pub async fn login(
    base_url: &str,
    email: &str,
    password: &str,
  ) -> Result<Self, ClientError> {
    let api = Self::new(base_url, "");
    let response = api
      .http
      .post(api.url("/api/auth/login"))
      .json(&LoginDto {
        email: email.to_string(),
        password: password.to_string(),
      })
      .send()
      .await?;
    let session: LoginRto = read_json(response).await?;
    Ok(Self {
      token: session.token,
      ..api
    })
  }

  pub fn token(&self) -> &str {
    &self.token
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  fn authorized(
    &self,
    request: reqwest::RequestBuilder,
  ) -> reqwest::RequestBuilder {
    request.header(header::AUTHORIZATION, format!("Bearer {}", self.token))
  }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
  async fn list(&self) -> Result<Vec<Employee>, ClientError> {
    let response = self
      .authorized(self.http.get(self.url("/api/employees")))
      .send()
      .await?;
    read_json(response).await
  }

  async fn create(
    &self,
    draft: &EmployeeDraft,
  ) -> Result<Employee, ClientError> {
    let response = self
      .authorized(self.http.post(self.url("/api/employees/create")))
      .json(draft)
      .send()
      .await?;
    read_json(response).await
  }

  async fn update_role(
    &self,
    id: &str,
    role: Role,
  ) -> Result<Employee, ClientError> {
    let url = self.url(&format!("/api/employees/{}", id));
    let response = self
      .authorized(self.http.patch(url))
      .json(&serde_json::json!({ "role": role }))
      .send()
      .await?;
    read_json(response).await
  }

  async fn delete(&self, id: &str) -> Result<(), ClientError> {
    let url = self.url(&format!("/api/employees/{}", id));
    let response = self
      .authorized(self.http.delete(url))
      .send()
      .await?;
    check_status(response).await.map(|_| ())
  }
}

async fn check_status(
  response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }
  let message = response
    .json::<HttpError>()
    .await
    .map(|error| error.message)
    .unwrap_or_default();
  Err(ClientError::Status { status, message })
}

async fn read_json<T: serde::de::DeserializeOwned>(
  response: reqwest::Response,
) -> Result<T, ClientError> {
  Ok(check_status(response).await?.json::<T>().await?)
}

#[cfg(test)]
mod tests {
  use actix_web::{App, HttpServer};

  use super::*;
  use crate::tests::{
    test_app_state, TestAppState, TestEmployeeRepository, TestUserRepository,
  };

  fn serve(state: TestAppState) -> (String, actix_web::dev::ServerHandle) {
    let server = HttpServer::new(move || {
      App::new().app_data(state.clone()).configure(
        crate::configure::<TestUserRepository, TestEmployeeRepository>,
      )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let base_url = format!("http://{}", server.addrs()[0]);
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);
    (base_url, handle)
  }

  fn registration() -> RegisterUserDto {
    RegisterUserDto {
      first_name: String::from("Ada"),
      last_name: String::from("Lovelace"),
      email: String::from("ada@x.com"),
      password: String::from("secret"),
    }
  }

  #[actix_rt::test]
  async fn test_register_then_manage_employees_over_http() {
    let state = test_app_state();
    let (base_url, handle) = serve(state.clone());

    let registered = HttpEmployeeApi::register(&base_url, &registration())
      .await
      .unwrap();
    assert_eq!(registered.message, "User created successfully");
    assert_eq!(registered.user.email, "ada@x.com");
    assert_eq!(registered.user.role, Role::Staff);
    assert_eq!(state.user_repository.users.read().unwrap().len(), 1);

    let api = HttpEmployeeApi::login(&base_url, "ada@x.com", "secret")
      .await
      .unwrap();
    let created = api
      .create(&EmployeeDraft {
        first_name: String::from("Jane"),
        last_name: String::from("Doe"),
        email: String::from("jane@x.com"),
        phone: String::from("555-1"),
        role: Role::Admin,
      })
      .await
      .unwrap();
    assert_eq!(api.list().await.unwrap(), vec![created]);

    handle.stop(true).await;
  }

  #[actix_rt::test]
  async fn test_register_twice_surfaces_server_message() {
    let (base_url, handle) = serve(test_app_state());

    HttpEmployeeApi::register(&base_url, &registration())
      .await
      .unwrap();
    let error = HttpEmployeeApi::register(&base_url, &registration())
      .await
      .unwrap_err();

    assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    match error {
      ClientError::Status { message, .. } => {
        assert_eq!(message, "User already exists")
      }
      other => panic!("unexpected error: {}", other),
    }

    handle.stop(true).await;
  }

  #[test]
  fn test_base_url_is_normalized() {
    let api = HttpEmployeeApi::new("http://localhost:3000/", "token");
    assert_eq!(
      api.url("/api/employees"),
      "http://localhost:3000/api/employees"
    );
    assert_eq!(api.token(), "token");
  }

  #[test]
  fn test_draft_serializes_like_the_create_body() {
    let draft = EmployeeDraft {
      first_name: String::from("Jane"),
      last_name: String::from("Doe"),
      email: String::from("jane@x.com"),
      phone: String::from("555-1"),
      role: Role::Staff,
    };
    assert_eq!(
      serde_json::to_value(&draft).unwrap(),
      serde_json::json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@x.com",
        "phone": "555-1",
        "role": "Staff",
      })
    );
  }

  #[test]
  fn test_status_error_exposes_status() {
    let error = ClientError::Status {
      status: StatusCode::BAD_REQUEST,
      message: String::from("Employee already exists"),
    };
    assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
  }
}

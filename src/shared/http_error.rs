use actix_web::{
  error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse,
  ResponseError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON body returned by every failing endpoint.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpError {
  pub message: String,
}

impl From<&str> for HttpError {
  fn from(message: &str) -> Self {
    Self {
      message: message.to_string(),
    }
  }
}

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  Unauthenticated(&'static str),

  #[error("{0}")]
  InvalidInput(&'static str),

  #[error("{0}")]
  AuthenticationFailed(&'static str),

  #[error("{0}")]
  Conflict(&'static str),

  #[error("{0}")]
  NotFound(&'static str),

  #[error("Method not allowed")]
  MethodNotAllowed,

  /// The cause is logged, the client only ever sees the public message.
  #[error("{0}")]
  Internal(&'static str),
}

impl ApiError {
  pub fn internal(message: &'static str, cause: impl ToString) -> Self {
    tracing::error!(cause = %cause.to_string(), "{}", message);
    ApiError::Internal(message)
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Unauthenticated(_) | ApiError::AuthenticationFailed(_) => {
        StatusCode::UNAUTHORIZED
      }
      // Duplicates are reported as a plain bad request on this API.
      ApiError::InvalidInput(_) | ApiError::Conflict(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::build(self.status_code())
      .content_type("application/json")
      .json(HttpError {
        message: self.to_string(),
      })
  }
}

/// Default service for resources, answers any verb a route does not declare.
pub async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
  Err(ApiError::MethodNotAllowed)
}

/// Turns malformed JSON bodies into the same 400 the validators produce.
pub fn json_error_handler(
  error: JsonPayloadError,
  _request: &HttpRequest,
) -> actix_web::Error {
  tracing::debug!(%error, "Rejected request body");
  ApiError::InvalidInput("All fields are required").into()
}

use actix_web::{dev::ServiceRequest, web, Error, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};

use crate::employees::repository::employee_repository::EmployeeRepository;
use crate::shared::http_error::ApiError;
use crate::users::repository::user_repository::UserRepository;
use crate::AppState;

/// Identity decoded from a valid bearer token. The user is not looked up
/// again, a deleted user keeps access until the token expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
  pub user_id: String,
  pub email: String,
}

/// Verifies against the `TokenService` held by `AppState<UR, ER>`, the same
/// one the login route signs with.
pub async fn bearer_validator<
  UR: UserRepository + 'static,
  ER: EmployeeRepository + 'static,
>(
  request: ServiceRequest,
  credentials: Option<BearerAuth>,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
  let Some(credentials) = credentials else {
    return Err((
      ApiError::Unauthenticated("Unauthorized: No token provided").into(),
      request,
    ));
  };

  let Some(data) = request.app_data::<web::Data<AppState<UR, ER>>>() else {
    return Err((
      ApiError::internal("Server error", "application state is missing")
        .into(),
      request,
    ));
  };

  match data.token_service.verify(credentials.token()) {
    Ok(claims) => {
      request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        email: claims.email,
      });
      Ok(request)
    }
    Err(error) => {
      tracing::debug!(%error, "Rejected bearer token");
      Err((
        ApiError::Unauthenticated("Unauthorized: Invalid token").into(),
        request,
      ))
    }
  }
}

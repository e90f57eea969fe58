pub mod dto;
pub mod model;
pub mod repository;

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use dto::create_employee_dto::CreateEmployeeDto;
use dto::update_role_dto::UpdateRoleDto;
use model::employee::Employee;
use nanoid::nanoid;
use repository::employee_repository::{
  EmployeeRepository, EmployeeRepositoryError,
};
use validator::Validate;

use crate::shared::http_error::{ApiError, HttpError};
use crate::shared::middleware::auth_gate::AuthenticatedUser;
use crate::shared::role::Role;
use crate::shared::rto::message_rto::MessageRto;
use crate::users::repository::user_repository::UserRepository;
use crate::AppState;

#[utoipa::path(
  get,
  path = "/api/employees",
  responses(
    (status = 200, description = "Every employee, unfiltered",
      body = [Employee]),
    (status = 401, description = "Missing or invalid token", body = HttpError),
    (status = 500, description = "Server error", body = HttpError)
  ),
  security(("bearer" = []))
)]
pub async fn list_employees<UR: UserRepository, ER: EmployeeRepository>(
  data: web::Data<AppState<UR, ER>>,
) -> Result<HttpResponse, ApiError> {
  let employees = data
    .employee_repository
    .find_all()
    .await
    .map_err(|error| ApiError::internal("Error fetching employees", error))?;
  Ok(HttpResponse::Ok().json(employees))
}

#[utoipa::path(
  post,
  path = "/api/employees/create",
  request_body = CreateEmployeeDto,
  responses(
    (status = 201, description = "Employee created", body = Employee),
    (status = 400, description = "Missing field or employee already exists",
      body = HttpError),
    (status = 401, description = "Missing or invalid token", body = HttpError),
    (status = 500, description = "Server error", body = HttpError)
  ),
  security(("bearer" = []))
)]
pub async fn create_employee<UR: UserRepository, ER: EmployeeRepository>(
  data: web::Data<AppState<UR, ER>>,
  user: web::ReqData<AuthenticatedUser>,
  dto: web::Json<CreateEmployeeDto>,
) -> Result<HttpResponse, ApiError> {
  if dto.validate().is_err() {
    return Err(ApiError::InvalidInput("All fields are required"));
  }
  let role = parse_role(&dto.role)?;

  let existing = data
    .employee_repository
    .find_by_email(&dto.email)
    .await
    .map_err(|error| ApiError::internal("Error creating employee", error))?;
  if existing.is_some() {
    return Err(employee_already_exists());
  }

  let employee = Employee::from(dto.into_inner(), role);
  match data.employee_repository.create(employee.clone()).await {
    Ok(()) => {
      tracing::info!(
        employee_id = %employee.id,
        by = %user.email,
        "Created employee"
      );
      Ok(
        HttpResponse::Created()
          .append_header((
            header::LOCATION,
            format!("/api/employees/{}", employee.id),
          ))
          .json(employee),
      )
    }
    Err(EmployeeRepositoryError::Duplicate) => Err(employee_already_exists()),
    Err(error) => Err(ApiError::internal("Error creating employee", error)),
  }
}

#[utoipa::path(
  get,
  path = "/api/employees/{id}",
  params(("id" = String, Path, description = "Employee id")),
  responses(
    (status = 200, description = "The employee", body = Employee),
    (status = 401, description = "Missing or invalid token", body = HttpError),
    (status = 404, description = "Unknown id", body = HttpError),
    (status = 500, description = "Server error", body = HttpError)
  ),
  security(("bearer" = []))
)]
pub async fn get_employee<UR: UserRepository, ER: EmployeeRepository>(
  data: web::Data<AppState<UR, ER>>,
  id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
  data
    .employee_repository
    .find_one(&id)
    .await
    .map_err(server_error)?
    .map(|employee| HttpResponse::Ok().json(employee))
    .ok_or_else(employee_not_found)
}

#[utoipa::path(
  patch,
  path = "/api/employees/{id}",
  params(("id" = String, Path, description = "Employee id")),
  request_body = UpdateRoleDto,
  responses(
    (status = 200, description = "The updated employee", body = Employee),
    (status = 400, description = "Missing or unknown role", body = HttpError),
    (status = 401, description = "Missing or invalid token", body = HttpError),
    (status = 404, description = "Unknown id", body = HttpError),
    (status = 500, description = "Server error", body = HttpError)
  ),
  security(("bearer" = []))
)]
pub async fn update_employee_role<
  UR: UserRepository,
  ER: EmployeeRepository,
>(
  data: web::Data<AppState<UR, ER>>,
  user: web::ReqData<AuthenticatedUser>,
  id: web::Path<String>,
  dto: web::Json<UpdateRoleDto>,
) -> Result<HttpResponse, ApiError> {
  if dto.validate().is_err() {
    return Err(ApiError::InvalidInput("All fields are required"));
  }
  let role = parse_role(&dto.role)?;

  let employee = data
    .employee_repository
    .update_role(&id, role)
    .await
    .map_err(server_error)?
    .ok_or_else(employee_not_found)?;

  tracing::info!(
    employee_id = %employee.id,
    %role,
    by = %user.email,
    "Changed role"
  );
  Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
  delete,
  path = "/api/employees/{id}",
  params(("id" = String, Path, description = "Employee id")),
  responses(
    (status = 200, description = "Employee deleted", body = MessageRto),
    (status = 401, description = "Missing or invalid token", body = HttpError),
    (status = 404, description = "Unknown id", body = HttpError),
    (status = 500, description = "Server error", body = HttpError)
  ),
  security(("bearer" = []))
)]
pub async fn delete_employee<UR: UserRepository, ER: EmployeeRepository>(
  data: web::Data<AppState<UR, ER>>,
  user: web::ReqData<AuthenticatedUser>,
  id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
  let employee = data
    .employee_repository
    .delete(&id)
    .await
    .map_err(server_error)?
    .ok_or_else(employee_not_found)?;

  tracing::info!(
    employee_id = %employee.id,
    by = %user.email,
    "Deleted employee"
  );
  Ok(HttpResponse::Ok().json(MessageRto::from("Employee deleted successfully")))
}

fn parse_role(value: &str) -> Result<Role, ApiError> {
  value
    .parse::<Role>()
    .map_err(|_| ApiError::InvalidInput("Invalid role"))
}

fn employee_already_exists() -> ApiError {
  ApiError::Conflict("Employee already exists")
}

fn employee_not_found() -> ApiError {
  ApiError::NotFound("Employee not found")
}

fn server_error(error: EmployeeRepositoryError) -> ApiError {
  ApiError::internal("Server error", error)
}

impl Employee {
  fn from(dto: CreateEmployeeDto, role: Role) -> Self {
    Self {
      id: nanoid!(),
      first_name: dto.first_name,
      last_name: dto.last_name,
      email: dto.email,
      phone: dto.phone,
      role,
    }
  }
}

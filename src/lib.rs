pub mod auth;
pub mod client;
pub mod employees;
pub mod shared;
pub mod users;

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use actix_web_httpauth::middleware::HttpAuthentication;
use auth::auth_login;
use employees::{
  create_employee, delete_employee, get_employee, list_employees,
  repository::employee_repository::EmployeeRepository, update_employee_role,
};
use shared::{
  check_health,
  hash_worker::Hasher,
  http_error::{json_error_handler, method_not_allowed},
  middleware::auth_gate::bearer_validator,
  token::TokenService,
};
use users::{register_user, repository::user_repository::UserRepository};
use utoipa::{
  openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
  Modify, OpenApi,
};

/// Everything the handlers share. Built once by the binary and handed to
/// actix as `web::Data`.
pub struct AppState<UR: UserRepository, ER: EmployeeRepository> {
  pub user_repository: UR,
  pub employee_repository: ER,
  pub hasher: Arc<dyn Hasher>,
  pub token_service: TokenService,
}

#[derive(OpenApi)]
#[openapi(
  paths(
    shared::check_health,
    users::register_user,
    auth::auth_login,
    employees::list_employees,
    employees::create_employee,
    employees::get_employee,
    employees::update_employee_role,
    employees::delete_employee,
  ),
  components(schemas(shared::http_error::HttpError)),
  modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
  fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
    if let Some(components) = openapi.components.as_mut() {
      components.add_security_scheme(
        "bearer",
        SecurityScheme::Http(
          HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .build(),
        ),
      );
    }
  }
}

async fn openapi_json() -> impl Responder {
  HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Registers every route. The caller provides `web::Data<AppState<UR, ER>>`
/// as app data, its `TokenService` both signs sessions and backs the gate.
pub fn configure<UR, ER>(config: &mut web::ServiceConfig)
where
  UR: UserRepository + 'static,
  ER: EmployeeRepository + 'static,
{
  config
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .service(
      web::resource("/api/health")
        .route(web::get().to(check_health))
        .default_service(web::to(method_not_allowed)),
    )
    .service(
      web::resource("/api/openapi.json")
        .route(web::get().to(openapi_json))
        .default_service(web::to(method_not_allowed)),
    )
    .service(
      web::resource("/api/user/register")
        .route(web::post().to(register_user::<UR, ER>))
        .default_service(web::to(method_not_allowed)),
    )
    .service(
      web::resource("/api/auth/login")
        .route(web::post().to(auth_login::<UR, ER>))
        .default_service(web::to(method_not_allowed)),
    )
    .service(
      web::scope("/api/employees")
        .wrap(HttpAuthentication::with_fn(bearer_validator::<UR, ER>))
        .service(
          web::resource("")
            .route(web::get().to(list_employees::<UR, ER>))
            .default_service(web::to(method_not_allowed)),
        )
        .service(
          web::resource("/create")
            .route(web::post().to(create_employee::<UR, ER>))
            .default_service(web::to(method_not_allowed)),
        )
        .service(
          web::resource("/{id}")
            .route(web::get().to(get_employee::<UR, ER>))
            .route(web::patch().to(update_employee_role::<UR, ER>))
            .route(web::delete().to(delete_employee::<UR, ER>))
            .default_service(web::to(method_not_allowed)),
        ),
    );
}

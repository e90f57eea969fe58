use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use rayon::ThreadPoolBuilder;
use staff_roster::{
  configure,
  employees::repository::employee_repository::MongoEmployeeRepositoryImpl,
  shared::{
    config::Config, database::MongoDatabase, hash_worker::HashWorker,
    logger::init_logger, token::TokenService,
  },
  users::repository::user_repository::MongoUserRepositoryImpl,
  AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  dotenv::dotenv().ok();
  init_logger();

  let config = match Config::from_env() {
    Ok(config) => config,
    Err(error) => {
      tracing::error!(%error, "Cannot start");
      std::process::exit(1);
    }
  };

  let database = MongoDatabase::connect(&config)
    .await
    .map_err(std::io::Error::other)?;
  database
    .ensure_indexes()
    .await
    .map_err(std::io::Error::other)?;

  let thread_pool = ThreadPoolBuilder::new()
    .num_threads(config.hash_threads as usize)
    .build()
    .map_err(std::io::Error::other)?;
  let hash_worker =
    HashWorker::new(thread_pool, config.hash_threads, config.bcrypt_cost);

  let app_state = web::Data::new(AppState {
    user_repository: MongoUserRepositoryImpl::new(&database),
    employee_repository: MongoEmployeeRepositoryImpl::new(&database),
    hasher: Arc::new(hash_worker),
    token_service: TokenService::new(
      &config.jwt_secret,
      config.token_expiry_seconds,
    ),
  });

  tracing::info!("Listening on http://{}", config.host);
  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .app_data(app_state.clone())
      .configure(
        configure::<MongoUserRepositoryImpl, MongoEmployeeRepositoryImpl>,
      )
  })
  .bind(&config.host)?
  .run()
  .await
}

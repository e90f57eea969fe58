use mongodb::{
  bson::doc, options::IndexOptions, Client, Collection, IndexModel,
};

use super::config::Config;

pub const USERS_COLLECTION: &str = "users";
pub const EMPLOYEES_COLLECTION: &str = "employees";

/// Handle on the MongoDB database, cloned into every repository.
#[derive(Clone)]
pub struct MongoDatabase {
  pub mongo_client: Client,
  pub database_name: String,
}

impl MongoDatabase {
  pub async fn connect(config: &Config) -> Result<Self, mongodb::error::Error> {
    let mongo_client = Client::with_uri_str(&config.mongodb_uri).await?;
    Ok(Self {
      mongo_client,
      database_name: config.mongodb_database.clone(),
    })
  }

  pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
    self
      .mongo_client
      .database(&self.database_name)
      .collection(name)
  }

  /// Emails are unique in both collections.
  pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
    for name in [USERS_COLLECTION, EMPLOYEES_COLLECTION] {
      let index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
      self
        .collection::<mongodb::bson::Document>(name)
        .create_index(index)
        .await?;
    }
    Ok(())
  }
}

/// Whether a driver error is a unique index violation.
pub fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
  use mongodb::error::{ErrorKind, WriteFailure};

  matches!(
    error.kind.as_ref(),
    ErrorKind::Write(WriteFailure::WriteError(write_error))
      if write_error.code == 11000
  )
}

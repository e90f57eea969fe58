use mongodb::{bson::doc, Collection};
use thiserror::Error;

use crate::{
  shared::database::{is_duplicate_key, MongoDatabase, USERS_COLLECTION},
  users::model::user::User,
};

#[derive(Debug, Error)]
pub enum UserRepositoryError {
  #[error("MongoDB error: {0}")]
  Mongo(#[from] mongodb::error::Error),

  #[error("User already exists")]
  Duplicate,
}

pub enum FindOneProperty<'a> {
  Id(&'a str),
  Email(&'a str),
}

impl FindOneProperty<'_> {
  fn to_mongo_key_value(&self) -> mongodb::bson::Document {
    match self {
      FindOneProperty::Id(id) => doc! { "_id": id },
      FindOneProperty::Email(email) => doc! { "email": email },
    }
  }
}

/// Credential store. Users are created once and never mutated nor deleted.
pub trait UserRepository {
  async fn find_one(
    &self,
    property: FindOneProperty<'_>,
  ) -> Result<Option<User>, UserRepositoryError>;
  async fn create(&self, user: User) -> Result<(), UserRepositoryError>;
}

pub struct MongoUserRepositoryImpl {
  users: Collection<User>,
}

impl MongoUserRepositoryImpl {
  pub fn new(database: &MongoDatabase) -> Self {
    Self {
      users: database.collection(USERS_COLLECTION),
    }
  }
}

impl UserRepository for MongoUserRepositoryImpl {
  async fn find_one(
    &self,
    property: FindOneProperty<'_>,
  ) -> Result<Option<User>, UserRepositoryError> {
    Ok(self.users.find_one(property.to_mongo_key_value()).await?)
  }

  async fn create(&self, user: User) -> Result<(), UserRepositoryError> {
    self.users.insert_one(&user).await.map_err(|error| {
      if is_duplicate_key(&error) {
        UserRepositoryError::Duplicate
      } else {
        UserRepositoryError::from(error)
      }
    })?;
    Ok(())
  }
}

#[cfg(test)]
pub mod tests {
  use super::{FindOneProperty, UserRepository, UserRepositoryError};
  use crate::users::model::user::User;
  use std::sync::{Arc, RwLock};

  #[derive(Clone, Default)]
  pub struct InMemoryUserRepository {
    pub users: Arc<RwLock<Vec<User>>>,
  }

  impl UserRepository for InMemoryUserRepository {
    async fn find_one(
      &self,
      property: FindOneProperty<'_>,
    ) -> Result<Option<User>, UserRepositoryError> {
      let users = self.users.read().unwrap();
      Ok(
        users
          .iter()
          .find(|user| match property {
            FindOneProperty::Id(id) => user.id == id,
            FindOneProperty::Email(email) => user.email == email,
          })
          .cloned(),
      )
    }

    async fn create(&self, user: User) -> Result<(), UserRepositoryError> {
      let mut users = self.users.write().unwrap();
      if users.iter().any(|existing| existing.email == user.email) {
        return Err(UserRepositoryError::Duplicate);
      }
      users.push(user);
      Ok(())
    }
  }
}

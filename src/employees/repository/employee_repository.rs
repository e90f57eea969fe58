use mongodb::{bson::doc, options::ReturnDocument, Collection};
use thiserror::Error;

use crate::{
  employees::model::employee::Employee,
  shared::{
    database::{is_duplicate_key, MongoDatabase, EMPLOYEES_COLLECTION},
    role::Role,
  },
};

#[derive(Debug, Error)]
pub enum EmployeeRepositoryError {
  #[error("MongoDB error: {0}")]
  Mongo(#[from] mongodb::error::Error),

  #[error("Employee already exists")]
  Duplicate,
}

/// Employee store. Lookups by id return `None` when the record is absent,
/// every operation touches a single document.
pub trait EmployeeRepository {
  async fn find_all(&self) -> Result<Vec<Employee>, EmployeeRepositoryError>;
  async fn find_one(
    &self,
    id: &str,
  ) -> Result<Option<Employee>, EmployeeRepositoryError>;
  async fn find_by_email(
    &self,
    email: &str,
  ) -> Result<Option<Employee>, EmployeeRepositoryError>;
  async fn create(
    &self,
    employee: Employee,
  ) -> Result<(), EmployeeRepositoryError>;
  async fn update_role(
    &self,
    id: &str,
    role: Role,
  ) -> Result<Option<Employee>, EmployeeRepositoryError>;
  async fn delete(
    &self,
    id: &str,
  ) -> Result<Option<Employee>, EmployeeRepositoryError>;
}

pub struct MongoEmployeeRepositoryImpl {
  employees: Collection<Employee>,
}

impl MongoEmployeeRepositoryImpl {
  pub fn new(database: &MongoDatabase) -> Self {
    Self {
      employees: database.collection(EMPLOYEES_COLLECTION),
    }
  }
}

impl EmployeeRepository for MongoEmployeeRepositoryImpl {
  async fn find_all(&self) -> Result<Vec<Employee>, EmployeeRepositoryError> {
    let mut cursor = self.employees.find(doc! {}).await?;
    let mut employees = Vec::new();
    while cursor.advance().await? {
      employees.push(cursor.deserialize_current()?);
    }
    Ok(employees)
  }

  async fn find_one(
    &self,
    id: &str,
  ) -> Result<Option<Employee>, EmployeeRepositoryError> {
    Ok(self.employees.find_one(doc! { "_id": id }).await?)
  }

  async fn find_by_email(
    &self,
    email: &str,
  ) -> Result<Option<Employee>, EmployeeRepositoryError> {
    Ok(self.employees.find_one(doc! { "email": email }).await?)
  }

  async fn create(
    &self,
    employee: Employee,
  ) -> Result<(), EmployeeRepositoryError> {
    self.employees.insert_one(&employee).await.map_err(|error| {
      if is_duplicate_key(&error) {
        EmployeeRepositoryError::Duplicate
      } else {
        EmployeeRepositoryError::from(error)
      }
    })?;
    Ok(())
  }

  async fn update_role(
    &self,
    id: &str,
    role: Role,
  ) -> Result<Option<Employee>, EmployeeRepositoryError> {
    Ok(
      self
        .employees
        .find_one_and_update(
          doc! { "_id": id },
          doc! { "$set": { "role": role.to_string() } },
        )
        .return_document(ReturnDocument::After)
        .await?,
    )
  }

  async fn delete(
    &self,
    id: &str,
  ) -> Result<Option<Employee>, EmployeeRepositoryError> {
    Ok(self.employees.find_one_and_delete(doc! { "_id": id }).await?)
  }
}

#[cfg(test)]
pub mod tests {
  use super::{EmployeeRepository, EmployeeRepositoryError};
  use crate::{employees::model::employee::Employee, shared::role::Role};
  use std::sync::{Arc, RwLock};

  #[derive(Clone, Default)]
  pub struct InMemoryEmployeeRepository {
    pub employees: Arc<RwLock<Vec<Employee>>>,
  }

  impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_all(
      &self,
    ) -> Result<Vec<Employee>, EmployeeRepositoryError> {
      Ok(self.employees.read().unwrap().clone())
    }

    async fn find_one(
      &self,
      id: &str,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
      let employees = self.employees.read().unwrap();
      Ok(employees.iter().find(|employee| employee.id == id).cloned())
    }

    async fn find_by_email(
      &self,
      email: &str,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
      let employees = self.employees.read().unwrap();
      Ok(
        employees
          .iter()
          .find(|employee| employee.email == email)
          .cloned(),
      )
    }

    async fn create(
      &self,
      employee: Employee,
    ) -> Result<(), EmployeeRepositoryError> {
      let mut employees = self.employees.write().unwrap();
      if employees.iter().any(|existing| existing.email == employee.email) {
        return Err(EmployeeRepositoryError::Duplicate);
      }
      employees.push(employee);
      Ok(())
    }

    async fn update_role(
      &self,
      id: &str,
      role: Role,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
      let mut employees = self.employees.write().unwrap();
      Ok(
        employees
          .iter_mut()
          .find(|employee| employee.id == id)
          .map(|employee| {
            employee.role = role;
            employee.clone()
          }),
      )
    }

    async fn delete(
      &self,
      id: &str,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
      let mut employees = self.employees.write().unwrap();
      let position = employees.iter().position(|employee| employee.id == id);
      Ok(position.map(|index| employees.remove(index)))
    }
  }
}

//! Roster state: the full employee list, the search-filtered view of it,
//! fixed-size pages over that view and a selection used for bulk role changes.
//!
//! Failures while listing, deleting or changing roles are logged and never
//! surfaced, the view falls back to an empty or unchanged list instead.

use std::collections::BTreeSet;

use futures::future::join_all;
use reqwest::StatusCode;

use super::api::{EmployeeApi, EmployeeDraft};
use crate::{employees::model::employee::Employee, shared::role::Role};

pub const PAGE_SIZE: usize = 5;

/// One page of the filtered roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  pub items: Vec<Employee>,
  pub page: usize,
  pub total_pages: usize,
}

/// Employees whose first or last name contains `search_term`, ignoring case.
/// An empty term keeps everyone.
pub fn filter_employees(all: &[Employee], search_term: &str) -> Vec<Employee> {
  if search_term.is_empty() {
    return all.to_vec();
  }
  let needle = search_term.to_lowercase();
  all
    .iter()
    .filter(|employee| {
      employee.first_name.to_lowercase().contains(&needle)
        || employee.last_name.to_lowercase().contains(&needle)
    })
    .cloned()
    .collect()
}

pub fn page_count(len: usize, page_size: usize) -> usize {
  len.div_ceil(page_size)
}

fn clamp_page(page: usize, total_pages: usize) -> usize {
  page.clamp(1, total_pages.max(1))
}

pub fn filter_and_paginate(
  all: &[Employee],
  search_term: &str,
  page: usize,
  page_size: usize,
) -> Page {
  let display = filter_employees(all, search_term);
  let total_pages = page_count(display.len(), page_size);
  let page = clamp_page(page, total_pages);
  let items = display
    .into_iter()
    .skip((page - 1) * page_size)
    .take(page_size)
    .collect();
  Page {
    items,
    page,
    total_pages,
  }
}

pub struct RosterView<A: EmployeeApi> {
  api: A,
  employees: Vec<Employee>,
  display: Vec<Employee>,
  search_term: String,
  current_page: usize,
  selected: BTreeSet<String>,
  /// `None` is the "Change role" placeholder.
  selected_role: Option<Role>,
}

impl<A: EmployeeApi> RosterView<A> {
  pub fn new(api: A) -> Self {
    Self {
      api,
      employees: Vec::new(),
      display: Vec::new(),
      search_term: String::new(),
      current_page: 1,
      selected: BTreeSet::new(),
      selected_role: None,
    }
  }

  pub fn employees(&self) -> &[Employee] {
    &self.employees
  }

  pub fn displayed(&self) -> &[Employee] {
    &self.display
  }

  pub fn current_page(&self) -> usize {
    self.current_page
  }

  pub fn total_pages(&self) -> usize {
    page_count(self.display.len(), PAGE_SIZE)
  }

  pub fn page(&self) -> Page {
    filter_and_paginate(
      &self.employees,
      &self.search_term,
      self.current_page,
      PAGE_SIZE,
    )
  }

  pub fn selected(&self) -> &BTreeSet<String> {
    &self.selected
  }

  pub fn selected_role(&self) -> Option<Role> {
    self.selected_role
  }

  pub async fn refresh(&mut self) {
    match self.api.list().await {
      Ok(employees) => self.employees = employees,
      Err(error) => {
        tracing::error!(%error, "Error fetching employees");
        self.employees.clear();
      }
    }
    self.recompute();
  }

  pub fn set_search_term(&mut self, search_term: &str) {
    self.search_term = search_term.to_string();
    self.recompute();
  }

  pub fn next_page(&mut self) {
    if self.current_page < self.total_pages() {
      self.current_page += 1;
    }
  }

  pub fn prev_page(&mut self) {
    if self.current_page > 1 {
      self.current_page -= 1;
    }
  }

  pub fn toggle_selected(&mut self, id: &str) {
    if !self.selected.remove(id) {
      self.selected.insert(id.to_string());
    }
  }

  /// Selects every displayed employee, across all pages, or clears.
  pub fn select_all_displayed(&mut self, checked: bool) {
    self.selected = if checked {
      self.display.iter().map(|employee| employee.id.clone()).collect()
    } else {
      BTreeSet::new()
    };
  }

  pub fn set_selected_role(&mut self, role: Option<Role>) {
    self.selected_role = role;
  }

  /// Issues one independent update per selected id. Nothing is rolled back
  /// when some of them fail.
  pub async fn apply_role_change(&mut self) {
    let Some(role) = self.selected_role else {
      return;
    };

    let updates = self
      .selected
      .iter()
      .map(|id| self.api.update_role(id, role));
    for (id, result) in self.selected.iter().zip(join_all(updates).await) {
      if let Err(error) = result {
        tracing::error!(%error, employee_id = %id, "Error updating role");
      }
    }

    self.refresh().await;
    self.selected.clear();
    self.selected_role = None;
  }

  pub async fn delete_employee(&mut self, id: &str) {
    match self.api.delete(id).await {
      Ok(()) => self.refresh().await,
      Err(error) => {
        tracing::error!(%error, employee_id = %id, "Error deleting employee")
      }
    }
  }

  /// Returns the message to show in the intake form, only a duplicate email
  /// gets one.
  pub async fn add_employee(&mut self, draft: EmployeeDraft) -> Option<String> {
    match self.api.create(&draft).await {
      Ok(_) => {
        self.refresh().await;
        None
      }
      Err(error) if error.status() == Some(StatusCode::BAD_REQUEST) => {
        Some(String::from("Employee already exists"))
      }
      Err(error) => {
        tracing::error!(%error, "Error adding employee");
        None
      }
    }
  }

  fn recompute(&mut self) {
    self.display = filter_employees(&self.employees, &self.search_term);
    self.current_page = clamp_page(self.current_page, self.total_pages());
  }
}

use super::api::EmployeeDraft;

/// Draft behind the "Add New Employee" form.
#[derive(Debug, Default)]
pub struct IntakeForm {
  pub draft: EmployeeDraft,
}

impl IntakeForm {
  pub fn new() -> Self {
    Self::default()
  }

  /// Hands the draft to `on_add` and resets right away, before the caller
  /// knows whether the creation went through.
  pub fn submit<F: FnOnce(EmployeeDraft)>(&mut self, on_add: F) {
    on_add(std::mem::take(&mut self.draft));
  }
}

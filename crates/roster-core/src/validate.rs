//! The validation gate run before an employee row is written.
//!
//! Only the email is checked: it must be present, well formed, and not used
//! by any other employee.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail as _;

use crate::{
  employee::EmployeeId,
  store::{Column, EmployeeRecords, FieldValue},
};

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
  Required,
  InvalidEmail,
  Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field:   Column,
  pub kind:    FieldErrorKind,
  pub message: String,
}

/// One or more field-level failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
  pub fn push(&mut self, field: Column, kind: FieldErrorKind, message: impl Into<String>) {
    self.0.push(FieldError { field, kind, message: message.into() });
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn errors(&self) -> &[FieldError] { &self.0 }

  /// True if any failure of `kind` was recorded.
  pub fn has(&self, kind: FieldErrorKind) -> bool {
    self.0.iter().any(|e| e.kind == kind)
  }

  /// `Ok(())` when nothing was recorded.
  pub fn into_result(self) -> crate::Result<()> {
    if self.is_empty() { Ok(()) } else { Err(self.into()) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, e) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", e.field.as_str(), e.message)?;
    }
    Ok(())
  }
}

/// Check `email` for the employee being saved. `id` is `None` on create;
/// on update the record's own row is excluded from the uniqueness check.
pub fn validate_email<R: EmployeeRecords>(
  records: &R,
  email: &str,
  id: Option<EmployeeId>,
) -> Result<(), R::Error> {
  let mut errors = ValidationErrors::default();

  if email.trim().is_empty() {
    errors.push(Column::Email, FieldErrorKind::Required, "Field email is required");
  } else if !email.validate_email() {
    errors.push(
      Column::Email,
      FieldErrorKind::InvalidEmail,
      "Value of field email must have a valid e-mail format",
    );
  } else {
    let taken = records
      .find_by_field(Column::Email, &FieldValue::Text(email.to_owned()))?
      .into_iter()
      .any(|other| Some(other.id) != id);
    if taken {
      errors.push(
        Column::Email,
        FieldErrorKind::Duplicate,
        "Employee with current email already exists",
      );
    }
  }

  Ok(errors.into_result()?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Error, employee::NewEmployee, memory::MemoryRecords};

  fn kind_of(err: Error) -> FieldErrorKind {
    match err {
      Error::Validation(v) => v.errors()[0].kind,
      other => panic!("expected validation error, got {other:?}"),
    }
  }

  #[test]
  fn accepts_unique_email() {
    let records = MemoryRecords::default();
    records.seed(NewEmployee::new("Ada", "Lovelace", "ada@example.com"));
    assert!(validate_email(&records, "grace@example.com", None).is_ok());
  }

  #[test]
  fn blank_email_is_required() {
    let records = MemoryRecords::default();
    let err = validate_email(&records, "   ", None).unwrap_err();
    assert_eq!(kind_of(err), FieldErrorKind::Required);
  }

  #[test]
  fn malformed_email_is_rejected() {
    let records = MemoryRecords::default();
    for bad in ["not-an-email", "a@", "@example.com", "two@@example.com"] {
      let err = validate_email(&records, bad, None).unwrap_err();
      assert_eq!(kind_of(err), FieldErrorKind::InvalidEmail, "{bad}");
    }
  }

  #[test]
  fn duplicate_email_is_rejected_on_create() {
    let records = MemoryRecords::default();
    records.seed(NewEmployee::new("Ada", "Lovelace", "ada@example.com"));
    let err = validate_email(&records, "ada@example.com", None).unwrap_err();
    assert_eq!(kind_of(err), FieldErrorKind::Duplicate);
  }

  #[test]
  fn own_email_is_not_a_duplicate_on_update() {
    let records = MemoryRecords::default();
    let ada = records.seed(NewEmployee::new("Ada", "Lovelace", "ada@example.com"));
    let grace = records.seed(NewEmployee::new("Grace", "Hopper", "grace@example.com"));

    assert!(validate_email(&records, "ada@example.com", Some(ada)).is_ok());
    let err = validate_email(&records, "ada@example.com", Some(grace)).unwrap_err();
    assert_eq!(kind_of(err), FieldErrorKind::Duplicate);
  }

  #[test]
  fn display_lists_field_and_message() {
    let mut errors = ValidationErrors::default();
    errors.push(Column::Email, FieldErrorKind::Required, "Field email is required");
    assert_eq!(errors.to_string(), "email: Field email is required");
    assert!(errors.has(FieldErrorKind::Required));
    assert!(!errors.has(FieldErrorKind::Duplicate));
  }
}

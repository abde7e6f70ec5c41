//! Error types for `roster-core`.

use thiserror::Error;

use crate::{employee::EmployeeId, validate::ValidationErrors};

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  /// The candidate parent is the employee itself or one of its subordinates.
  #[error("cannot assign employee {employee_id} to a subordinate ({parent_id})")]
  CyclicAssignment {
    employee_id: EmployeeId,
    parent_id:   EmployeeId,
  },

  #[error("employee not found: {0}")]
  EmployeeNotFound(EmployeeId),

  #[error("parent employee not found: {0}")]
  ParentNotFound(EmployeeId),

  #[error("employee {id} still has {count} subordinate(s)")]
  HasSubordinates { id: EmployeeId, count: usize },

  /// The ancestor walk did not reach a root within the employee count.
  #[error("hierarchy above employee {0} does not terminate at a root")]
  CorruptHierarchy(EmployeeId),
}

impl From<ValidationErrors> for Error {
  fn from(errors: ValidationErrors) -> Self { Self::Validation(errors) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Record Store traits and the column mapping shared by all backends.
//!
//! [`EmployeeRecords`] is the synchronous, row-level interface the hierarchy
//! and validation rules run against; a backend implements it over whatever
//! handle it holds inside a transaction. [`EmployeeStore`] is the async façade
//! that higher layers depend on.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::employee::{
  Employee, EmployeeId, EmployeeWithChief, FullNameMatch, NewEmployee,
};

// ─── Column mapping ──────────────────────────────────────────────────────────

/// A column of the `employees` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
  Id,
  FirstName,
  LastName,
  Position,
  Email,
  Phone,
  Note,
  IsChief,
  ParentId,
}

impl Column {
  pub const ALL: [Column; 9] = [
    Column::Id,
    Column::FirstName,
    Column::LastName,
    Column::Position,
    Column::Email,
    Column::Phone,
    Column::Note,
    Column::IsChief,
    Column::ParentId,
  ];

  /// The storage name of the column.
  pub fn as_str(self) -> &'static str {
    match self {
      Column::Id => "id",
      Column::FirstName => "first_name",
      Column::LastName => "last_name",
      Column::Position => "position",
      Column::Email => "email",
      Column::Phone => "phone",
      Column::Note => "note",
      Column::IsChief => "is_chief",
      Column::ParentId => "parent_id",
    }
  }
}

/// A value to compare a [`Column`] against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Integer(i64),
  Text(String),
  /// Matches `NULL` (and, for `parent_id`, the `0` root marker).
  Null,
}

impl From<EmployeeId> for FieldValue {
  fn from(id: EmployeeId) -> Self { FieldValue::Integer(id.0) }
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self { FieldValue::Text(s.to_owned()) }
}

impl From<bool> for FieldValue {
  fn from(b: bool) -> Self { FieldValue::Integer(i64::from(b)) }
}

// ─── Row-level trait ─────────────────────────────────────────────────────────

/// Row-level access to the employee table.
///
/// Implementations are expected to be used within a single transaction; none
/// of the methods here commit anything on their own.
pub trait EmployeeRecords {
  type Error: From<crate::Error>;

  fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, Self::Error>;

  fn find_by_field(
    &self,
    column: Column,
    value: &FieldValue,
  ) -> Result<Vec<Employee>, Self::Error>;

  /// Insert a new row with `is_chief = false` and return the assigned id.
  fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId, Self::Error>;

  /// Overwrite every column of an existing row, `is_chief` included.
  fn update(&self, employee: &Employee) -> Result<(), Self::Error>;

  fn delete(&self, id: EmployeeId) -> Result<(), Self::Error>;

  /// Total number of employees.
  fn count(&self) -> Result<u64, Self::Error>;

  /// Employees whose parent is `id`.
  fn children(&self, id: EmployeeId) -> Result<Vec<Employee>, Self::Error> {
    self.find_by_field(Column::ParentId, &id.into())
  }
}

// ─── Async façade ────────────────────────────────────────────────────────────

/// Abstraction over a Roster storage backend.
///
/// Every mutating method runs validation, the cycle check, the write and the
/// chief-flag reconciliation as one atomic unit: either all of it is
/// persisted or none of it is.
pub trait EmployeeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Validate and persist a new employee. If it names a parent, that parent
  /// becomes a chief.
  fn create(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Retrieve an employee by id. Returns `None` if not found.
  fn get(
    &self,
    id: EmployeeId,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// All employees, ordered by id.
  fn list(&self) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  fn find_by_field(
    &self,
    column: Column,
    value: FieldValue,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// Direct subordinates of `id`.
  fn children(
    &self,
    id: EmployeeId,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// The chief of `id`, if it has one.
  fn parent(
    &self,
    id: EmployeeId,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Persist every field of `employee`. The supplied `is_chief` is ignored.
  /// A changed `parent_id` goes through the cycle check and reconciliation.
  fn update(
    &self,
    employee: Employee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Reassign the parent of `id` (`None` makes it a root).
  fn set_parent(
    &self,
    id: EmployeeId,
    parent_id: Option<EmployeeId>,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Remove an employee. Refused while it still has subordinates.
  fn delete(&self, id: EmployeeId) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Employees joined with their chief's full name; a single one when
  /// `filter` is set.
  fn list_with_chief_name(
    &self,
    filter: Option<EmployeeId>,
  ) -> impl Future<Output = Result<Vec<EmployeeWithChief>, Self::Error>> + Send + '_;

  /// Prefix full-text search over first and last name. See
  /// [`crate::search`] for how the query is prepared.
  fn search_by_full_name<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<FullNameMatch>, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn column_names_are_snake_case() {
    let names: Vec<_> = Column::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(names, [
      "id", "first_name", "last_name", "position", "email", "phone", "note",
      "is_chief", "parent_id",
    ]);
  }

  #[test]
  fn column_serde_matches_storage_name() {
    for column in Column::ALL {
      let json = serde_json::to_string(&column).unwrap();
      assert_eq!(json, format!("\"{}\"", column.as_str()));
    }
  }
}

//! Employee — the single entity of the directory.
//!
//! `is_chief` is derived state: it is true iff some other employee names this
//! one as its parent. Callers never set it; the hierarchy engine does.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Surrogate key assigned by the store on creation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl EmployeeId {
  /// Interpret a raw `parent_id` column value. Both `NULL` and `0` mark a
  /// root.
  pub fn from_parent_column(raw: Option<i64>) -> Option<Self> {
    raw.filter(|&v| v != 0).map(Self)
  }

  /// Map the `0` root marker in caller input to `None`.
  pub fn normalize_parent(parent: Option<Self>) -> Option<Self> {
    parent.filter(|p| p.0 != 0)
  }
}

/// `parent_id` as sent by callers: `null`, absent and `0` all mean root.
fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<EmployeeId>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(EmployeeId::from_parent_column(Option::<i64>::deserialize(deserializer)?))
}

impl fmt::Display for EmployeeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl From<i64> for EmployeeId {
  fn from(v: i64) -> Self { Self(v) }
}

/// A persisted employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  pub id:         EmployeeId,
  pub first_name: String,
  pub last_name:  String,
  pub position:   String,
  pub email:      String,
  pub phone:      Option<i64>,
  pub note:       String,
  pub is_chief:   bool,
  #[serde(default, deserialize_with = "deserialize_parent")]
  pub parent_id:  Option<EmployeeId>,
}

impl Employee {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  pub fn is_root(&self) -> bool { self.parent_id.is_none() }
}

/// Input for creating an employee. The id and chief flag are assigned by the
/// store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
  pub first_name: String,
  pub last_name:  String,
  #[serde(default)]
  pub position:   String,
  pub email:      String,
  #[serde(default)]
  pub phone:      Option<i64>,
  #[serde(default)]
  pub note:       String,
  #[serde(default, deserialize_with = "deserialize_parent")]
  pub parent_id:  Option<EmployeeId>,
}

impl NewEmployee {
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: last_name.into(),
      email: email.into(),
      ..Self::default()
    }
  }

  pub fn with_parent(mut self, parent_id: EmployeeId) -> Self {
    self.parent_id = Some(parent_id);
    self
  }

  /// The row as it will look once the store has assigned `id`.
  pub fn into_employee(self, id: EmployeeId) -> Employee {
    Employee {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      position: self.position,
      email: self.email,
      phone: self.phone,
      note: self.note,
      is_chief: false,
      parent_id: self.parent_id,
    }
  }
}

/// An employee together with the full name of its chief, if it has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeWithChief {
  #[serde(flatten)]
  pub employee:   Employee,
  pub chief_name: Option<String>,
}

/// One hit of a full-name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullNameMatch {
  pub id:        EmployeeId,
  pub full_name: String,
}

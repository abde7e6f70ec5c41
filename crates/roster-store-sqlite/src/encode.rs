//! Conversions between `roster-core` types and SQLite rows.
//!
//! Booleans are stored as `0`/`1`. A root is stored as `NULL`; rows written
//! with the legacy `0` marker decode to a root as well.

use rusqlite::types::Value;

use roster_core::{
  employee::{Employee, EmployeeId},
  store::{Column, FieldValue},
};

/// Column list shared by every `SELECT` that yields a [`RawEmployee`].
pub const EMPLOYEE_COLUMNS: &str =
  "id, first_name, last_name, position, email, phone, note, is_chief, parent_id";

/// [`EMPLOYEE_COLUMNS`] qualified with the table alias `e`.
pub const EMPLOYEE_COLUMNS_E: &str = "e.id, e.first_name, e.last_name, e.position, e.email, \
   e.phone, e.note, e.is_chief, e.parent_id";

/// An `employees` row as read from SQLite, before domain conversion.
pub struct RawEmployee {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  String,
  pub position:   String,
  pub email:      String,
  pub phone:      Option<i64>,
  pub note:       String,
  pub is_chief:   bool,
  pub parent_id:  Option<i64>,
}

impl RawEmployee {
  /// Read the nine [`EMPLOYEE_COLUMNS`] starting at index 0.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      position:   row.get(3)?,
      email:      row.get(4)?,
      phone:      row.get(5)?,
      note:       row.get(6)?,
      is_chief:   row.get(7)?,
      parent_id:  row.get(8)?,
    })
  }

  pub fn into_employee(self) -> Employee {
    Employee {
      id:         EmployeeId(self.id),
      first_name: self.first_name,
      last_name:  self.last_name,
      position:   self.position,
      email:      self.email,
      phone:      self.phone,
      note:       self.note,
      is_chief:   self.is_chief,
      parent_id:  EmployeeId::from_parent_column(self.parent_id),
    }
  }
}

pub fn encode_parent(parent: Option<EmployeeId>) -> Option<i64> { parent.map(|p| p.0) }

/// A `WHERE` condition comparing `column` with `value`, and the parameter to
/// bind as `?1` (if any).
pub fn field_condition(column: Column, value: &FieldValue) -> (String, Option<Value>) {
  let name = column.as_str();
  match value {
    FieldValue::Null | FieldValue::Integer(0) if column == Column::ParentId => {
      (format!("({name} IS NULL OR {name} = 0)"), None)
    }
    FieldValue::Null => (format!("{name} IS NULL"), None),
    FieldValue::Integer(i) => (format!("{name} = ?1"), Some(Value::Integer(*i))),
    FieldValue::Text(s) => (format!("{name} = ?1"), Some(Value::Text(s.clone()))),
  }
}

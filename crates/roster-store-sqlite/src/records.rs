//! [`Records`] — [`EmployeeRecords`] over a borrowed SQLite connection.
//!
//! The store hands one of these to the hierarchy and validation rules from
//! inside a transaction; a `&Transaction` derefs to the connection it wraps.

use rusqlite::{Connection, OptionalExtension as _};

use roster_core::{
  employee::{Employee, EmployeeId, NewEmployee},
  store::{Column, EmployeeRecords, FieldValue},
};

use crate::{
  Error, Result,
  encode::{EMPLOYEE_COLUMNS, RawEmployee, encode_parent, field_condition},
};

pub struct Records<'c> {
  conn: &'c Connection,
}

impl<'c> Records<'c> {
  pub fn new(conn: &'c Connection) -> Self { Self { conn } }

  /// Every employee, ordered by id.
  pub fn all(&self) -> Result<Vec<Employee>> {
    let mut stmt = self
      .conn
      .prepare(&format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"))?;
    let rows = stmt
      .query_map([], RawEmployee::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows.into_iter().map(RawEmployee::into_employee).collect())
  }
}

impl EmployeeRecords for Records<'_> {
  type Error = Error;

  fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
        rusqlite::params![id.0],
        RawEmployee::from_row,
      )
      .optional()?;
    Ok(raw.map(RawEmployee::into_employee))
  }

  fn find_by_field(&self, column: Column, value: &FieldValue) -> Result<Vec<Employee>> {
    let (condition, param) = field_condition(column, value);
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE {condition} ORDER BY id"
    ))?;
    let rows = match param {
      Some(p) => stmt
        .query_map(rusqlite::params![p], RawEmployee::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?,
      None => stmt
        .query_map([], RawEmployee::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?,
    };
    Ok(rows.into_iter().map(RawEmployee::into_employee).collect())
  }

  fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId> {
    self.conn.execute(
      "INSERT INTO employees (
         first_name, last_name, position, email, phone, note, is_chief, parent_id
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
      rusqlite::params![
        employee.first_name,
        employee.last_name,
        employee.position,
        employee.email,
        employee.phone,
        employee.note,
        encode_parent(employee.parent_id),
      ],
    )?;
    Ok(EmployeeId(self.conn.last_insert_rowid()))
  }

  fn update(&self, employee: &Employee) -> Result<()> {
    let changed = self.conn.execute(
      "UPDATE employees SET
         first_name = ?2, last_name = ?3, position = ?4, email = ?5,
         phone = ?6, note = ?7, is_chief = ?8, parent_id = ?9
       WHERE id = ?1",
      rusqlite::params![
        employee.id.0,
        employee.first_name,
        employee.last_name,
        employee.position,
        employee.email,
        employee.phone,
        employee.note,
        employee.is_chief,
        encode_parent(employee.parent_id),
      ],
    )?;
    if changed == 0 {
      return Err(roster_core::Error::EmployeeNotFound(employee.id).into());
    }
    Ok(())
  }

  fn delete(&self, id: EmployeeId) -> Result<()> {
    let changed = self
      .conn
      .execute("DELETE FROM employees WHERE id = ?1", rusqlite::params![id.0])?;
    if changed == 0 {
      return Err(roster_core::Error::EmployeeNotFound(id).into());
    }
    Ok(())
  }

  fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))?;
    Ok(n as u64)
  }
}

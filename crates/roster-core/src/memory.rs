//! In-memory [`EmployeeRecords`] used by the unit tests of this crate.

use std::{cell::RefCell, collections::BTreeMap};

use crate::{
  Error,
  employee::{Employee, EmployeeId, NewEmployee},
  store::{Column, EmployeeRecords, FieldValue},
};

#[derive(Default)]
pub struct MemoryRecords {
  rows: RefCell<BTreeMap<EmployeeId, Employee>>,
}

impl MemoryRecords {
  /// Insert without running any rule.
  pub fn seed(&self, input: NewEmployee) -> EmployeeId {
    self.insert(&input).unwrap()
  }

  pub fn get(&self, id: EmployeeId) -> Employee {
    self.rows.borrow()[&id].clone()
  }

  /// Rewrite a parent pointer without running any rule.
  pub fn force_parent(&self, id: EmployeeId, parent: Option<EmployeeId>) {
    self.rows.borrow_mut().get_mut(&id).unwrap().parent_id = parent;
  }
}

fn column_value(e: &Employee, column: Column) -> FieldValue {
  match column {
    Column::Id => e.id.into(),
    Column::FirstName => FieldValue::Text(e.first_name.clone()),
    Column::LastName => FieldValue::Text(e.last_name.clone()),
    Column::Position => FieldValue::Text(e.position.clone()),
    Column::Email => FieldValue::Text(e.email.clone()),
    Column::Phone => e.phone.map_or(FieldValue::Null, FieldValue::Integer),
    Column::Note => FieldValue::Text(e.note.clone()),
    Column::IsChief => e.is_chief.into(),
    Column::ParentId => e.parent_id.map_or(FieldValue::Null, FieldValue::from),
  }
}

impl EmployeeRecords for MemoryRecords {
  type Error = Error;

  fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, Error> {
    Ok(self.rows.borrow().get(&id).cloned())
  }

  fn find_by_field(&self, column: Column, value: &FieldValue) -> Result<Vec<Employee>, Error> {
    Ok(
      self
        .rows
        .borrow()
        .values()
        .filter(|e| &column_value(e, column) == value)
        .cloned()
        .collect(),
    )
  }

  fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId, Error> {
    let mut rows = self.rows.borrow_mut();
    let id = EmployeeId(rows.keys().next_back().map_or(1, |k| k.0 + 1));
    rows.insert(id, employee.clone().into_employee(id));
    Ok(id)
  }

  fn update(&self, employee: &Employee) -> Result<(), Error> {
    match self.rows.borrow_mut().get_mut(&employee.id) {
      Some(row) => {
        *row = employee.clone();
        Ok(())
      }
      None => Err(Error::EmployeeNotFound(employee.id)),
    }
  }

  fn delete(&self, id: EmployeeId) -> Result<(), Error> {
    self
      .rows
      .borrow_mut()
      .remove(&id)
      .map(|_| ())
      .ok_or(Error::EmployeeNotFound(id))
  }

  fn count(&self) -> Result<u64, Error> { Ok(self.rows.borrow().len() as u64) }
}

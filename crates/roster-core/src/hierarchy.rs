//! Hierarchy integrity: cycle prevention and the derived chief flag.
//!
//! `parent_id` edges point from a subordinate to its chief. Two rules hold
//! after every committed write:
//!
//! - walking parents from any employee reaches a root without revisiting
//!   anyone;
//! - `is_chief` is true exactly for employees that some other employee names
//!   as its parent.
//!
//! [`check_parent`] guards the first rule before a parent is written;
//! [`reconcile_chief_flags`] restores the second one afterwards. Both are
//! meant to run in the same transaction as the write itself.

use serde::{Deserialize, Serialize};

use crate::{
  Error,
  employee::EmployeeId,
  store::EmployeeRecords,
};

/// A chief flag that was rewritten during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChiefFlagChange {
  pub employee_id: EmployeeId,
  pub is_chief:    bool,
}

/// Reject `new_parent` if it is `employee_id` itself or any of its
/// subordinates.
///
/// An unsaved employee (`employee_id == None`) has no subordinates yet, so any
/// parent is accepted. A parent id that resolves to no row is accepted here;
/// existence is checked separately by [`ensure_parent_exists`] at save time.
pub fn check_parent<R: EmployeeRecords>(
  records: &R,
  employee_id: Option<EmployeeId>,
  new_parent: Option<EmployeeId>,
) -> Result<(), R::Error> {
  let (Some(employee_id), Some(new_parent)) = (employee_id, new_parent) else {
    return Ok(());
  };

  // Each step visits a distinct employee on a well-formed chain, so the row
  // count bounds the walk.
  let limit = records.count()?;
  let mut current = new_parent;
  let mut steps: u64 = 0;

  loop {
    if current == employee_id {
      return Err(Error::CyclicAssignment { employee_id, parent_id: new_parent }.into());
    }
    let Some(ancestor) = records.find_by_id(current)? else {
      return Ok(());
    };
    let Some(next) = ancestor.parent_id else {
      return Ok(());
    };

    steps += 1;
    if steps > limit {
      return Err(Error::CorruptHierarchy(new_parent).into());
    }
    current = next;
  }
}

/// Fail with [`Error::ParentNotFound`] unless `parent` is `None` or an
/// existing employee.
pub fn ensure_parent_exists<R: EmployeeRecords>(
  records: &R,
  parent: Option<EmployeeId>,
) -> Result<(), R::Error> {
  match parent {
    Some(id) if records.find_by_id(id)?.is_none() => Err(Error::ParentNotFound(id).into()),
    _ => Ok(()),
  }
}

/// Recompute `is_chief` for `id` from the rows that reference it and persist
/// it if it changed. Missing employees are skipped.
pub fn derive_chief_flag<R: EmployeeRecords>(
  records: &R,
  id: EmployeeId,
) -> Result<Option<ChiefFlagChange>, R::Error> {
  let Some(mut employee) = records.find_by_id(id)? else {
    return Ok(None);
  };

  let is_chief = !records.children(id)?.is_empty();
  if employee.is_chief == is_chief {
    return Ok(None);
  }

  employee.is_chief = is_chief;
  records.update(&employee)?;
  Ok(Some(ChiefFlagChange { employee_id: id, is_chief }))
}

/// Bring the chief flags of the old and new parent in line with the stored
/// rows after a parent assignment has been written.
///
/// On create `previous_parent` is `None`. When both sides are the same
/// employee nothing can have changed and no work is done.
pub fn reconcile_chief_flags<R: EmployeeRecords>(
  records: &R,
  previous_parent: Option<EmployeeId>,
  current_parent: Option<EmployeeId>,
) -> Result<Vec<ChiefFlagChange>, R::Error> {
  if previous_parent == current_parent {
    return Ok(Vec::new());
  }

  let mut changes = Vec::new();
  for id in [previous_parent, current_parent].into_iter().flatten() {
    if let Some(change) = derive_chief_flag(records, id)? {
      changes.push(change);
    }
  }
  Ok(changes)
}

//! [`SqliteStore`] — the SQLite implementation of [`EmployeeStore`].

use std::{path::Path, time::Duration};

use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info};

use roster_core::{
  employee::{Employee, EmployeeId, EmployeeWithChief, FullNameMatch, NewEmployee},
  hierarchy::{self, ChiefFlagChange},
  search,
  store::{Column, EmployeeRecords, EmployeeStore, FieldValue},
  validate,
};

use crate::{
  Error, Result, StoreConfig,
  encode::{EMPLOYEE_COLUMNS_E, RawEmployee},
  records::Records,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An employee directory backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    info!(path = %path.display(), "opened employee store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store described by `config`.
  pub async fn from_config(config: &StoreConfig) -> Result<Self> {
    let store = Self::open(config.resolved_store_path()).await?;
    let timeout = Duration::from_millis(config.busy_timeout_ms);
    store
      .conn
      .call(move |conn| {
        conn.busy_timeout(timeout)?;
        Ok(())
      })
      .await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` against the connection outside of any explicit transaction.
  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
  {
    self.conn.call(move |conn| Ok(f(conn))).await?
  }

  /// Run `f` in one immediate transaction; commit only if it succeeds.
  async fn write<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Records<'_>) -> Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&Records::new(&tx));
        if out.is_ok() {
          tx.commit()?;
        }
        Ok(out)
      })
      .await?
  }
}

// ─── Write paths ─────────────────────────────────────────────────────────────
//
// Each runs inside `SqliteStore::write`, so the checks, the row write and the
// chief-flag bookkeeping commit or roll back together.

fn reconcile(
  records: &Records<'_>,
  previous_parent: Option<EmployeeId>,
  current_parent: Option<EmployeeId>,
) -> Result<()> {
  let changes = hierarchy::reconcile_chief_flags(records, previous_parent, current_parent)
    .map_err(|e| Error::Reconcile(Box::new(e)))?;
  for ChiefFlagChange { employee_id, is_chief } in changes {
    debug!(%employee_id, is_chief, "chief flag updated");
  }
  Ok(())
}

fn create_employee(records: &Records<'_>, mut input: NewEmployee) -> Result<Employee> {
  input.parent_id = EmployeeId::normalize_parent(input.parent_id);
  hierarchy::ensure_parent_exists(records, input.parent_id)?;
  validate::validate_email(records, &input.email, None)?;

  let id = records.insert(&input)?;
  debug!(employee_id = %id, parent_id = ?input.parent_id, "employee created");

  reconcile(records, None, input.parent_id)?;
  Ok(input.into_employee(id))
}

fn save_employee(records: &Records<'_>, mut employee: Employee) -> Result<Employee> {
  employee.parent_id = EmployeeId::normalize_parent(employee.parent_id);
  let previous = records
    .find_by_id(employee.id)?
    .ok_or(roster_core::Error::EmployeeNotFound(employee.id))?;

  let parent_changed = previous.parent_id != employee.parent_id;
  if parent_changed {
    hierarchy::check_parent(records, Some(employee.id), employee.parent_id)?;
    hierarchy::ensure_parent_exists(records, employee.parent_id)?;
  }
  validate::validate_email(records, &employee.email, Some(employee.id))?;

  employee.is_chief = previous.is_chief;
  records.update(&employee)?;
  debug!(
    employee_id = %employee.id,
    from = ?previous.parent_id,
    to = ?employee.parent_id,
    "employee updated"
  );

  if parent_changed {
    reconcile(records, previous.parent_id, employee.parent_id)?;
  }
  Ok(employee)
}

fn delete_employee(records: &Records<'_>, id: EmployeeId) -> Result<()> {
  let employee = records
    .find_by_id(id)?
    .ok_or(roster_core::Error::EmployeeNotFound(id))?;

  let count = records.children(id)?.len();
  if count > 0 {
    return Err(roster_core::Error::HasSubordinates { id, count }.into());
  }

  records.delete(id)?;
  debug!(employee_id = %id, "employee deleted");

  reconcile(records, employee.parent_id, None)
}

/// An employee row followed by the chief's full name in column 9.
fn chief_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(RawEmployee, Option<String>)> {
  Ok((RawEmployee::from_row(row)?, row.get(9)?))
}

// ─── EmployeeStore impl ──────────────────────────────────────────────────────

impl EmployeeStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewEmployee) -> Result<Employee> {
    self.write(move |records| create_employee(records, input)).await
  }

  async fn get(&self, id: EmployeeId) -> Result<Option<Employee>> {
    self.read(move |conn| Records::new(conn).find_by_id(id)).await
  }

  async fn list(&self) -> Result<Vec<Employee>> {
    self.read(|conn| Records::new(conn).all()).await
  }

  async fn find_by_field(&self, column: Column, value: FieldValue) -> Result<Vec<Employee>> {
    self
      .read(move |conn| Records::new(conn).find_by_field(column, &value))
      .await
  }

  async fn children(&self, id: EmployeeId) -> Result<Vec<Employee>> {
    self.read(move |conn| Records::new(conn).children(id)).await
  }

  async fn parent(&self, id: EmployeeId) -> Result<Option<Employee>> {
    self
      .read(move |conn| {
        let records = Records::new(conn);
        match records.find_by_id(id)?.and_then(|e| e.parent_id) {
          Some(parent_id) => records.find_by_id(parent_id),
          None => Ok(None),
        }
      })
      .await
  }

  async fn update(&self, employee: Employee) -> Result<Employee> {
    self.write(move |records| save_employee(records, employee)).await
  }

  async fn set_parent(
    &self,
    id:        EmployeeId,
    parent_id: Option<EmployeeId>,
  ) -> Result<Employee> {
    self
      .write(move |records| {
        let mut employee = records
          .find_by_id(id)?
          .ok_or(roster_core::Error::EmployeeNotFound(id))?;
        employee.parent_id = parent_id;
        save_employee(records, employee)
      })
      .await
  }

  async fn delete(&self, id: EmployeeId) -> Result<()> {
    self.write(move |records| delete_employee(records, id)).await
  }

  async fn list_with_chief_name(
    &self,
    filter: Option<EmployeeId>,
  ) -> Result<Vec<EmployeeWithChief>> {
    let filter = filter.map(|id| id.0);

    self
      .read(move |conn| {
        let where_clause = if filter.is_some() { "WHERE e.id = ?1" } else { "" };
        let sql = format!(
          "SELECT {EMPLOYEE_COLUMNS_E},
                  c.first_name || ' ' || c.last_name AS chief_name
           FROM employees e
           LEFT JOIN employees c ON c.id = e.parent_id
           {where_clause}
           ORDER BY e.id"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = match filter {
          Some(id) => stmt
            .query_map(rusqlite::params![id], chief_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], chief_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };

        Ok(
          rows
            .into_iter()
            .map(|(raw, chief_name)| EmployeeWithChief {
              employee: raw.into_employee(),
              chief_name,
            })
            .collect(),
        )
      })
      .await
  }

  async fn search_by_full_name<'a>(&'a self, query: &'a str) -> Result<Vec<FullNameMatch>> {
    let Some(expression) = search::match_expression(query) else {
      return Ok(Vec::new());
    };

    self
      .read(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.id, e.first_name || ' ' || e.last_name AS full_name
           FROM employees_fts
           JOIN employees e ON e.id = employees_fts.rowid
           WHERE employees_fts MATCH ?1
           ORDER BY rank",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![expression], |row| {
            Ok(FullNameMatch {
              id:        EmployeeId(row.get(0)?),
              full_name: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }
}

//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Core(#[from] roster_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  /// The row write went through but re-deriving chief flags failed. The
  /// surrounding transaction was rolled back, so nothing was saved.
  #[error("chief flag reconciliation failed: {0}")]
  Reconcile(#[source] Box<Error>),
}

impl Error {
  /// The domain error behind this one, looking through [`Error::Reconcile`].
  pub fn core(&self) -> Option<&roster_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      Error::Reconcile(inner) => inner.core(),
      _ => None,
    }
  }

  pub fn is_validation(&self) -> bool {
    matches!(self.core(), Some(roster_core::Error::Validation(_)))
  }

  pub fn is_cyclic_assignment(&self) -> bool {
    matches!(self.core(), Some(roster_core::Error::CyclicAssignment { .. }))
  }

  /// True if this failure happened while reconciling chief flags rather than
  /// during the primary write.
  pub fn is_reconcile(&self) -> bool { matches!(self, Error::Reconcile(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

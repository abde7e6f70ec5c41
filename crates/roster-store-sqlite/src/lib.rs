//! SQLite backend for the Roster employee directory.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every write runs in one immediate
//! transaction together with its hierarchy checks and chief-flag bookkeeping.

mod encode;
mod records;
mod schema;
mod store;

pub mod config;
pub mod error;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use records::Records;
pub use store::SqliteStore;

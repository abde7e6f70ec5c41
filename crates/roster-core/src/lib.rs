//! Core types and trait definitions for the Roster employee directory.
//!
//! This crate is deliberately free of database dependencies. The hierarchy
//! and validation rules are written against the [`store::EmployeeRecords`]
//! trait so any backend can run them inside its own transaction.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod employee;
pub mod error;
pub mod hierarchy;
pub mod search;
pub mod store;
pub mod validate;

pub use error::{Error, Result};

#[cfg(test)]
mod memory;

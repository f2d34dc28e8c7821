//! Plumbing for a task runner around the `psql` and `cue` command line
//! tools: config profile loading, DDL script discovery and ordering,
//! PostgreSQL datasource names, and argument-list assembly for the
//! external processes.
//!
//! The crate never spawns a process or touches a database itself; the
//! binary in `crates/cli` owns process execution.

pub mod config;
pub mod cue;
pub mod ddl;
pub mod dsn;
mod error;
pub mod psql;

pub use error::{Error, Result};

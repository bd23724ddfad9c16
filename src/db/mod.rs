//! SQLite persistence for employee records.
//!
//! This module provides:
//! - Connection setup, pragma configuration and schema creation
//! - `Repository`, the SQLite implementation of `RecordStore`

pub mod migrations;
pub mod repo;

pub use migrations::{connect, create_schema};
pub use repo::Repository;

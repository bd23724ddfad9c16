pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod shell;
pub mod store;

pub use config::Config;
pub use db::Repository;
pub use domain::{Employee, EmployeeId, EmployeePatch, NewEmployee};
pub use error::{StartupError, StoreError};
pub use shell::Shell;
pub use store::{MockRecordStore, RecordStore};

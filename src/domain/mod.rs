//! Domain types for employee records.

pub mod employee;

pub use employee::{Employee, EmployeeId, EmployeePatch, NewEmployee};

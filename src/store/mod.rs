//! Record store abstraction over employee persistence.

use crate::domain::{Employee, EmployeeId, EmployeePatch, NewEmployee};
use crate::error::StoreError;
use async_trait::async_trait;

pub mod mock;

pub use mock::MockRecordStore;

/// Single point of access to the employee table.
///
/// Every operation reports `StoreError::NotFound` distinctly from
/// `StoreError::Storage`. Operations take `&mut self` because a store owns
/// exactly one connection and runs one statement at a time.
#[async_trait]
pub trait RecordStore: Send {
    /// Create the employee table if it does not exist. Idempotent.
    async fn initialize(&mut self) -> Result<(), StoreError>;

    /// Insert a new employee and return the id the database assigned.
    async fn create(&mut self, employee: &NewEmployee) -> Result<EmployeeId, StoreError>;

    /// Fetch exactly one employee.
    async fn get_by_id(&mut self, id: EmployeeId) -> Result<Employee, StoreError>;

    /// Fetch every employee in the database's natural result order.
    async fn get_all(&mut self) -> Result<Vec<Employee>, StoreError>;

    /// Apply a partial update.
    ///
    /// The current row is fetched first; fields absent from `patch` keep
    /// their stored value and all four fields are written back in one
    /// statement. A missing row is `NotFound` and nothing is written.
    async fn update(&mut self, id: EmployeeId, patch: EmployeePatch) -> Result<(), StoreError>;

    /// Remove an employee. Zero affected rows is `NotFound`.
    async fn delete(&mut self, id: EmployeeId) -> Result<(), StoreError>;
}

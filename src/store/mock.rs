//! In-memory record store for testing without a database.

use super::RecordStore;
use crate::domain::{Employee, EmployeeId, EmployeePatch, NewEmployee};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Test double for `RecordStore`: keeps rows in id order in memory, with
/// optional failure injection. Not meant for production sessions.
#[derive(Debug, Clone)]
pub struct MockRecordStore {
    rows: BTreeMap<EmployeeId, Employee>,
    next_id: i64,
    failure: Option<String>,
    initialized: bool,
}

impl MockRecordStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
            failure: None,
            initialized: false,
        }
    }

    /// Seed the store with an employee, assigning the next id.
    pub fn with_employee(mut self, employee: NewEmployee) -> Self {
        let id = self.allocate_id();
        self.rows.insert(id, employee.with_id(id));
        self
    }

    /// Make every subsequent operation fail with a storage error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Whether `initialize` has been called.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn allocate_id(&mut self) -> EmployeeId {
        let id = EmployeeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Storage(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn initialize(&mut self) -> Result<(), StoreError> {
        self.check()?;
        self.initialized = true;
        Ok(())
    }

    async fn create(&mut self, employee: &NewEmployee) -> Result<EmployeeId, StoreError> {
        self.check()?;
        let id = self.allocate_id();
        self.rows.insert(id, employee.clone().with_id(id));
        Ok(id)
    }

    async fn get_by_id(&mut self, id: EmployeeId) -> Result<Employee, StoreError> {
        self.check()?;
        self.rows.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn get_all(&mut self) -> Result<Vec<Employee>, StoreError> {
        self.check()?;
        Ok(self.rows.values().cloned().collect())
    }

    async fn update(&mut self, id: EmployeeId, patch: EmployeePatch) -> Result<(), StoreError> {
        let current = self.get_by_id(id).await?;
        self.rows.insert(id, patch.merge(&current));
        Ok(())
    }

    async fn delete(&mut self, id: EmployeeId) -> Result<(), StoreError> {
        self.check()?;
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> NewEmployee {
        NewEmployee::new("Ada", Some("Lovelace".to_string()), "Engineering", 9000.0)
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let mut store = MockRecordStore::new();
        let first = store.create(&ada()).await.unwrap();
        let second = store.create(&ada()).await.unwrap();
        assert_eq!(first, EmployeeId::new(1));
        assert_eq!(second, EmployeeId::new(2));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let mut store = MockRecordStore::new();
        let result = store
            .update(EmployeeId::new(3), EmployeePatch::default())
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == EmployeeId::new(3)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_marks_store() {
        let mut store = MockRecordStore::new();
        assert!(!store.is_initialized());
        store.initialize().await.unwrap();
        assert!(store.is_initialized());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let mut store = MockRecordStore::new().with_employee(ada()).failing("disk full");
        let result = store.get_all().await;
        match result {
            Err(StoreError::Storage(msg)) => assert_eq!(msg, "disk full"),
            other => panic!("Expected storage error, got {:?}", other),
        }
    }
}

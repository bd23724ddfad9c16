//! SQLite-backed record store.

use super::migrations::{connect, create_schema};
use crate::config::Config;
use crate::domain::{Employee, EmployeeId, EmployeePatch, NewEmployee};
use crate::error::{StartupError, StoreError};
use crate::store::RecordStore;
use async_trait::async_trait;
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::{debug, info};

/// Repository owning the one database connection used for the process lifetime.
pub struct Repository {
    conn: SqliteConnection,
}

impl Repository {
    /// Wrap an already opened connection.
    pub fn new(conn: SqliteConnection) -> Self {
        Repository { conn }
    }

    /// Connect and initialize the employee table.
    ///
    /// If initialization fails the connection is closed before the error is
    /// returned.
    ///
    /// # Errors
    /// Returns `StartupError::Connect` or `StartupError::Initialize`.
    pub async fn open(config: &Config) -> Result<Self, StartupError> {
        let conn = connect(config)
            .await
            .map_err(|source| StartupError::Connect {
                path: config.database_path.clone(),
                source,
            })?;

        let mut repo = Repository::new(conn);
        if let Err(e) = repo.initialize().await {
            repo.close().await.ok();
            return Err(StartupError::Initialize(e));
        }
        Ok(repo)
    }

    /// Close the underlying connection.
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for Repository {
    async fn initialize(&mut self) -> Result<(), StoreError> {
        create_schema(&mut self.conn).await?;
        Ok(())
    }

    async fn create(&mut self, employee: &NewEmployee) -> Result<EmployeeId, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO employee (first_name, last_name, department, salary)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.first_name)
        .bind(employee.last_name.as_deref())
        .bind(&employee.department)
        .bind(employee.salary)
        .execute(&mut self.conn)
        .await?;

        let id = EmployeeId::new(result.last_insert_rowid());
        debug!(id = %id, "Employee created");
        Ok(id)
    }

    async fn get_by_id(&mut self, id: EmployeeId) -> Result<Employee, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT emp_id, first_name, last_name, department, salary FROM employee WHERE emp_id = ?",
        )
        .bind(id)
        .fetch_optional(&mut self.conn)
        .await?;

        employee.ok_or(StoreError::NotFound(id))
    }

    async fn get_all(&mut self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT emp_id, first_name, last_name, department, salary FROM employee",
        )
        .fetch_all(&mut self.conn)
        .await?;

        debug!(count = employees.len(), "Fetched all employees");
        Ok(employees)
    }

    async fn update(&mut self, id: EmployeeId, patch: EmployeePatch) -> Result<(), StoreError> {
        let current = self.get_by_id(id).await?;
        let merged = patch.merge(&current);

        let result = sqlx::query(
            r#"
            UPDATE employee
            SET first_name = ?,
                last_name = ?,
                department = ?,
                salary = ?
            WHERE emp_id = ?
            "#,
        )
        .bind(&merged.first_name)
        .bind(merged.last_name.as_deref())
        .bind(&merged.department)
        .bind(merged.salary)
        .bind(id)
        .execute(&mut self.conn)
        .await?;

        debug!(id = %id, rows_affected = result.rows_affected(), "Employee updated");
        Ok(())
    }

    async fn delete(&mut self, id: EmployeeId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM employee WHERE emp_id = ?")
            .bind(id)
            .execute(&mut self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        debug!(id = %id, "Employee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let repo = Repository::open(&Config::for_path(db_path))
            .await
            .expect("open failed");
        (repo, temp_dir)
    }

    #[tokio::test]
    async fn test_create_without_last_name() {
        let (mut repo, _temp) = setup_test_db().await;

        let new = NewEmployee::new("Grace", None, "Navy", 4200.0);
        let id = repo.create(&new).await.unwrap();

        let stored = repo.get_by_id(id).await.unwrap();
        assert_eq!(stored, new.with_id(id));
        assert_eq!(stored.last_name, None);
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_department() {
        let (mut repo, _temp) = setup_test_db().await;

        let new = NewEmployee::new("Ada", None, "Department of Engines", 1.0);
        let result = repo.create(&new).await;
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_can_set_salary_to_zero() {
        let (mut repo, _temp) = setup_test_db().await;

        let id = repo
            .create(&NewEmployee::new("Ada", None, "Engineering", 9000.0))
            .await
            .unwrap();
        let patch = EmployeePatch {
            salary: Some(0.0),
            ..Default::default()
        };
        repo.update(id, patch).await.unwrap();

        assert_eq!(repo.get_by_id(id).await.unwrap().salary, 0.0);
    }

    #[tokio::test]
    async fn test_close_releases_connection() {
        let (repo, _temp) = setup_test_db().await;
        repo.close().await.expect("close failed");
    }
}

//! Connection setup and schema creation.

use crate::config::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::Path;
use tracing::info;

/// Open the single SQLite connection described by `config` and apply pragmas.
///
/// The database file (and its parent directory) is created if missing.
pub async fn connect(config: &Config) -> Result<SqliteConnection, sqlx::Error> {
    if let Some(parent) = Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    if let Err(e) = configure_pragmas_conn(&mut conn, config).await {
        conn.close().await.ok();
        return Err(e);
    }

    info!("Database connection opened at {}", config.database_path);
    Ok(conn)
}

/// Create the employee table if it does not exist.
pub async fn create_schema(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    info!("Ensuring employee schema...");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(&mut *conn).await?;
        }
    }

    info!("Employee schema ready");
    Ok(())
}

async fn configure_pragmas_conn(
    conn: &mut SqliteConnection,
    config: &Config,
) -> Result<(), sqlx::Error> {
    use sqlx::Row;
    info!("Configuring SQLite pragmas...");

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query(&format!(
        "PRAGMA journal_mode = {}",
        config.journal_mode.as_pragma()
    ))
    .fetch_one(&mut *conn)
    .await?;
    let journal_mode: String = row.get(0);
    info!("SQLite journal_mode set to: {}", journal_mode);

    sqlx::query(&format!("PRAGMA busy_timeout = {}", config.busy_timeout_ms))
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    info!("SQLite pragmas configured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JournalMode;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config::for_path(
            temp_dir
                .path()
                .join("nested")
                .join("employee.db")
                .to_string_lossy()
                .to_string(),
        )
    }

    #[tokio::test]
    async fn test_connect_creates_database() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let mut conn = connect(&config).await.expect("connect failed");
        assert!(Path::new(&config.database_path).exists());

        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&mut conn)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_reports_unusable_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let config = Config::for_path(
            blocker
                .join("employee.db")
                .to_string_lossy()
                .to_string(),
        );

        let result = connect(&config).await;
        assert!(matches!(result, Err(sqlx::Error::Io(_))));
    }

    #[tokio::test]
    async fn test_schema_creates_employee_table() {
        let temp_dir = TempDir::new().unwrap();
        let mut conn = connect(&test_config(&temp_dir)).await.unwrap();
        create_schema(&mut conn).await.expect("schema failed");

        let result: (String,) = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='employee'",
        )
        .fetch_one(&mut conn)
        .await
        .expect("query failed");
        assert_eq!(result.0, "employee");
    }

    #[tokio::test]
    async fn test_schema_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let mut conn = connect(&test_config(&temp_dir)).await.unwrap();
        create_schema(&mut conn).await.unwrap();
        create_schema(&mut conn)
            .await
            .expect("second schema run failed");
    }

    #[tokio::test]
    async fn test_schema_rejects_negative_salary() {
        let temp_dir = TempDir::new().unwrap();
        let mut conn = connect(&test_config(&temp_dir)).await.unwrap();
        create_schema(&mut conn).await.unwrap();

        let result = sqlx::query(
            "INSERT INTO employee (first_name, department, salary) VALUES ('Ada', 'Eng', -1.0)",
        )
        .execute(&mut conn)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pragmas_configured() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        config.journal_mode = JournalMode::Delete;
        config.busy_timeout_ms = 1234;
        let mut conn = connect(&config).await.unwrap();

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&mut conn)
            .await
            .expect("query failed");
        assert_eq!(result.0, "delete");

        let result: (i64,) = sqlx::query_as("PRAGMA busy_timeout")
            .fetch_one(&mut conn)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1234);
    }
}

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub busy_timeout_ms: u64,
    pub journal_mode: JournalMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    Wal,
    Delete,
}

impl JournalMode {
    pub fn as_pragma(&self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_path = env_map
            .get("DATABASE_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let busy_timeout_ms = env_map
            .get("DATABASE_BUSY_TIMEOUT_MS")
            .map(|s| s.as_str())
            .unwrap_or("5000")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "DATABASE_BUSY_TIMEOUT_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        let journal_mode = match env_map
            .get("DATABASE_JOURNAL_MODE")
            .map(|s| s.as_str())
            .unwrap_or("wal")
        {
            "wal" => JournalMode::Wal,
            "delete" => JournalMode::Delete,
            other => {
                return Err(ConfigError::InvalidValue(
                    "DATABASE_JOURNAL_MODE".to_string(),
                    format!("must be wal or delete, got {}", other),
                ))
            }
        };

        Ok(Config {
            database_path,
            busy_timeout_ms,
            journal_mode,
        })
    }

    /// Configuration for a database file at `path`, everything else defaulted.
    pub fn for_path(path: impl Into<String>) -> Self {
        Config {
            database_path: path.into(),
            busy_timeout_ms: 5000,
            journal_mode: JournalMode::Wal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_PATH".to_string(), "/tmp/employee.db".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.database_path, "/tmp/employee.db");
        assert_eq!(config.busy_timeout_ms, 5000);
        assert_eq!(config.journal_mode, JournalMode::Wal);
    }

    #[test]
    fn test_missing_database_path() {
        let mut env_map = setup_required_env();
        env_map.remove("DATABASE_PATH");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_blank_database_path_is_missing() {
        let mut env_map = setup_required_env();
        env_map.insert("DATABASE_PATH".to_string(), "   ".to_string());
        let result = Config::from_env_map(env_map);
        assert!(matches!(result, Err(ConfigError::MissingEnv(_))));
    }

    #[test]
    fn test_invalid_busy_timeout() {
        let mut env_map = setup_required_env();
        env_map.insert(
            "DATABASE_BUSY_TIMEOUT_MS".to_string(),
            "soon".to_string(),
        );
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DATABASE_BUSY_TIMEOUT_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_journal_mode_delete() {
        let mut env_map = setup_required_env();
        env_map.insert("DATABASE_JOURNAL_MODE".to_string(), "delete".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.journal_mode, JournalMode::Delete);
        assert_eq!(config.journal_mode.as_pragma(), "DELETE");
    }

    #[test]
    fn test_invalid_journal_mode() {
        let mut env_map = setup_required_env();
        env_map.insert("DATABASE_JOURNAL_MODE".to_string(), "memory".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DATABASE_JOURNAL_MODE"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}

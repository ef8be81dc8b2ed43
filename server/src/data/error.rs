//! Unified error type for the data layer
//!
//! Wraps errors from the record store backends (SQLite, JSON fixture) while
//! preserving which backend produced them.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// Migration failed
    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    /// Fixture file could not be read or parsed
    #[error("Fixture error in {path}: {reason}")]
    Fixture { path: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Create a SQLite error with preserved context
    pub fn from_sqlite(e: sqlx::Error) -> Self {
        Self::Sqlite(e)
    }

    /// Create a migration failed error
    pub fn migration_failed(backend: &'static str, version: i32, name: &str, error: &str) -> Self {
        Self::MigrationFailed {
            backend,
            version,
            name: name.to_string(),
            error: error.to_string(),
        }
    }

    /// Create a fixture error
    pub fn fixture(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fixture {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::MigrationFailed { backend, .. } => backend,
            Self::Fixture { .. } => "memory",
            Self::Config(_) | Self::Io(_) => "unknown",
        }
    }
}

/// Convert from the SQLite backend error type
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "sqlite",
                version,
                name,
                error,
            },
            crate::data::sqlite::SqliteError::Io(e) => Self::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteError;

    #[test]
    fn test_migration_failed_error_display() {
        let err = DataError::migration_failed("sqlite", 2, "add_profiles", "syntax error");
        assert_eq!(
            err.to_string(),
            "Migration 2 (add_profiles) failed on sqlite: syntax error"
        );
    }

    #[test]
    fn test_fixture_error_display() {
        let err = DataError::fixture("data.json", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Fixture error in data.json: expected value at line 1 column 1"
        );
        assert_eq!(err.backend(), "memory");
    }

    #[test]
    fn test_backend_method() {
        assert_eq!(
            DataError::migration_failed("sqlite", 1, "test", "error").backend(),
            "sqlite"
        );
        assert_eq!(DataError::from_sqlite(sqlx::Error::PoolClosed).backend(), "sqlite");
        assert_eq!(DataError::Config("bad".into()).backend(), "unknown");
    }

    #[test]
    fn test_from_sqlite_error() {
        let err: DataError = SqliteError::MigrationFailed {
            version: 1,
            name: "initial".into(),
            error: "boom".into(),
        }
        .into();
        assert!(matches!(err, DataError::MigrationFailed { backend: "sqlite", .. }));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DataError = SqliteError::Io(io).into();
        assert!(matches!(err, DataError::Io(_)));
    }
}

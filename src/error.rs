//! Error type shared by the storage, model and transaction layers.
//!
//! Lookups that find nothing are not errors: finders return `Option` or an
//! empty `Vec`. The variants here cover the failures a caller must be able to
//! tell apart.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was blank, or the engine rejected a row because of a
    /// foreign key, NOT NULL or similar constraint.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The database file could not be opened or configured.
    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),
}

impl Error {
    /// Build a constraint violation for a blank required field.
    pub(crate) fn blank_field(entity: &str, field: &str) -> Self {
        Self::ConstraintViolation(format!("{entity} {field} must not be blank"))
    }

    /// Classify an engine error raised while working with the file at `path`.
    ///
    /// Failures that mean the file itself cannot be used become
    /// [`Error::StorageUnavailable`]; everything else goes through `From`.
    pub(crate) fn at_path(path: &Path, err: rusqlite::Error) -> Self {
        Self::from(err).with_path(path)
    }

    /// Reclassify a [`Error::Database`] failure as [`Error::StorageUnavailable`]
    /// when its code says the file is unusable.
    pub(crate) fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Database(source) if is_storage_failure(&source) => Self::StorageUnavailable {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }

    /// Returns true if the database file could not be opened or used.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }

    /// Returns true if this error is a constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, ref message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let detail = message
                    .clone()
                    .unwrap_or_else(|| failure.to_string());
                Self::ConstraintViolation(detail)
            }
            other => Self::Database(other),
        }
    }
}

/// Engine error codes that mean the file itself is unusable.
fn is_storage_failure(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(
            rusqlite::ErrorCode::NotADatabase
                | rusqlite::ErrorCode::CannotOpen
                | rusqlite::ErrorCode::DatabaseBusy
                | rusqlite::ErrorCode::DatabaseLocked
                | rusqlite::ErrorCode::DatabaseCorrupt
        )
    )
}

/// Reject empty or whitespace-only values for required text columns.
pub(crate) fn require_text(entity: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::blank_field(entity, field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_blank_text_is_rejected() {
        let err = require_text("author", "name", "   ").unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(
            err.to_string(),
            "Constraint violation: author name must not be blank"
        );
        assert!(require_text("author", "name", "Jane Doe").is_ok());
    }

    #[test]
    fn test_sqlite_constraint_maps_to_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL);")
            .unwrap();
        let raw = conn
            .execute("INSERT INTO t (name) VALUES (NULL)", [])
            .unwrap_err();

        let err = Error::from(raw);
        assert!(err.is_constraint_violation(), "got {err:?}");
    }

    #[test]
    fn test_busy_error_at_path_is_storage_unavailable() {
        let raw = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".into()),
        );

        let err = Error::at_path(Path::new("articles.db"), raw);
        assert!(err.is_storage_unavailable(), "got {err:?}");
    }

    #[test]
    fn test_at_path_keeps_constraint_classification() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL);")
            .unwrap();
        let raw = conn
            .execute("INSERT INTO t (name) VALUES (NULL)", [])
            .unwrap_err();

        assert!(Error::at_path(Path::new(":memory:"), raw).is_constraint_violation());
    }

    #[test]
    fn test_other_sqlite_errors_stay_database_errors() {
        let conn = Connection::open_in_memory().unwrap();
        let raw = conn.execute("SELECT * FROM missing", []).unwrap_err();

        assert!(matches!(Error::from(raw), Error::Database(_)));
    }
}

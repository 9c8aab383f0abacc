//! Error types for SQLite persistence operations.
//!
//! Provides a unified error type covering connectivity, statement
//! execution, identifier validation and value conversion failures.

use thiserror::Error;

/// Errors that can occur while executing an entity operation.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// The database file could not be opened or created.
    ///
    /// Returned before any statement runs, so it is distinct from an
    /// operation that ran and matched nothing.
    #[error("could not open database '{0}'")]
    ConnectionUnavailable(String),

    /// SQLite statement failure (malformed SQL, constraint violation, ...).
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// A stored cell could not be converted into a field value.
    #[error("conversion error: {0}")]
    ConversionError(String),

    /// A table or column name contains characters that cannot be
    /// interpolated into SQL.
    #[error("invalid identifier '{0}': must contain only alphanumeric characters and underscores")]
    InvalidIdentifier(String),

    /// An insert was requested with no rows, or rows of differing width.
    #[error("invalid row data: {0}")]
    InvalidRows(String),
}

impl SqliteError {
    /// Returns `true` when the operation never reached the database.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SqliteError::ConnectionUnavailable(_))
    }
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;

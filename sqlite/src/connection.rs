//! Scoped ownership of a single SQLite connection.
//!
//! [`ConnectionManager`] opens the database file on demand (creating it if
//! absent) and releases the handle in [`close`](ConnectionManager::close),
//! which also runs on drop. Every operation acquires a fresh manager and
//! lets it fall out of scope, so the handle is released on every return
//! path, including early returns through `?`.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

/// Owner of at most one open connection to a database file.
///
/// # Examples
///
/// ```no_run
/// use stockroom_sqlite::ConnectionManager;
///
/// let mut manager = ConnectionManager::new("ebookstore");
/// if let Some(conn) = manager.open() {
///     conn.execute_batch("SELECT 1").unwrap();
/// }
/// manager.close();
/// manager.close(); // closing twice is harmless
/// ```
#[derive(Debug)]
pub struct ConnectionManager {
    database: PathBuf,
    conn: Option<Connection>,
}

impl ConnectionManager {
    pub fn new(database: impl AsRef<Path>) -> Self {
        Self {
            database: database.as_ref().to_path_buf(),
            conn: None,
        }
    }

    /// Opens (or creates) the database and returns the connection.
    ///
    /// Returns `None` after logging the driver error if the file cannot be
    /// opened. Calling `open` on an already open manager returns the
    /// existing connection.
    pub fn open(&mut self) -> Option<&Connection> {
        if self.conn.is_none() {
            match Connection::open(&self.database) {
                Ok(conn) => self.conn = Some(conn),
                Err(err) => {
                    tracing::error!(
                        database = %self.database.display(),
                        error = %err,
                        "error connecting to database"
                    );
                    return None;
                }
            }
        }
        self.conn.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Closes the connection if one is open. Failures are logged only.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_conn, err)) = conn.close() {
                tracing::error!(
                    database = %self.database.display(),
                    error = %err,
                    "error closing database connection"
                );
            }
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.close();
    }
}

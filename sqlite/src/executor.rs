//! Schema-driven CRUD execution against one table.
//!
//! [`QueryExecutor`] runs exactly one statement per call. Each call opens
//! its own [`ConnectionManager`], executes, and releases the connection
//! before returning, whatever the outcome. There is no pooling and no
//! handle shared between calls.
//!
//! # Example
//!
//! ```no_run
//! use stockroom_core::{Value, book_schema};
//! use stockroom_sqlite::QueryExecutor;
//!
//! let executor = QueryExecutor::new("ebookstore", "books");
//!
//! if !executor.verify_table_exists().unwrap() {
//!     executor.create_table(&book_schema().unwrap()).unwrap();
//! }
//!
//! let next = executor.next_primary_key("id").unwrap() + 1;
//! let row = vec![Value::Integer(next), Value::Integer(3), "Le Guin".into(), "Lathe of Heaven".into()];
//! assert!(executor.insert_rows(&[row]).unwrap());
//!
//! let found = executor
//!     .read_rows(&["*".into()], &["id".into()], &[Value::Integer(next)])
//!     .unwrap();
//! for line in found.to_table() {
//!     println!("{}", line.join(" | "));
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use stockroom_core::{FieldSchema, Value};

use crate::connection::ConnectionManager;
use crate::convert;
use crate::error::{Result, SqliteError};
use crate::statement::{
    TABLE_EXISTS_SQL, create_table_sql, delete_sql, insert_sql, last_key_sql, select_sql,
    update_sql, validate_identifier,
};

/// Operation tag used in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    VerifyTable,
    CreateTable,
    NextPrimaryKey,
    Insert,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::VerifyTable => "verify table",
            Operation::CreateTable => "create table",
            Operation::NextPrimaryKey => "next primary key",
            Operation::Insert => "insert",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Rows returned by a read, with the column names they were selected as.
///
/// A read that matches nothing yields an empty set: no header and no rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Renders the set as text cells with the header as the first line.
    ///
    /// Returns an empty list when there are no rows.
    pub fn to_table(&self) -> Vec<Vec<String>> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        std::iter::once(self.header.clone())
            .chain(
                self.rows
                    .iter()
                    .map(|row| row.iter().map(Value::to_string).collect()),
            )
            .collect()
    }
}

/// Executes entity operations against one table of one database file.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    database: PathBuf,
    table: String,
}

impl QueryExecutor {
    pub fn new(database: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            database: database.as_ref().to_path_buf(),
            table: table.into(),
        }
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Reports whether the table exists.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::ConnectionUnavailable`] when the existence is
    /// unknown because the database could not be opened.
    pub fn verify_table_exists(&self) -> Result<bool> {
        self.scoped(Operation::VerifyTable, |conn| {
            let count: i64 =
                conn.query_row(TABLE_EXISTS_SQL, params![self.table], |row| row.get(0))?;
            Ok(count > 0)
        })
    }

    /// Creates the table from `schema` if it does not already exist.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS`, so an existing table and its rows
    /// are left untouched.
    pub fn create_table(&self, schema: &FieldSchema) -> Result<()> {
        self.scoped(Operation::CreateTable, |conn| {
            let sql = create_table_sql(&self.table, schema)?;
            tracing::debug!(%sql, "creating table");
            conn.execute(&sql, [])?;
            Ok(())
        })
    }

    /// Returns the highest integer primary key, or `0` for an empty table.
    ///
    /// The caller adds one to obtain the key of the next row.
    pub fn next_primary_key(&self, primary_key: &str) -> Result<i64> {
        self.scoped(Operation::NextPrimaryKey, |conn| {
            let sql = last_key_sql(&self.table, primary_key)?;
            let last: Option<i64> = conn
                .query_row(&sql, [], |row| row.get(0))
                .optional()?;
            Ok(last.unwrap_or(0))
        })
    }

    /// Inserts one or more complete rows.
    ///
    /// The placeholder count follows the width of the first row. A single
    /// row is one statement; several rows reuse one prepared statement
    /// inside a single transaction. Returns `true` if any row was written.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidRows`] for an empty batch or rows of
    /// differing width, and [`SqliteError::DatabaseError`] for constraint
    /// violations such as a duplicate primary key.
    pub fn insert_rows(&self, rows: &[Vec<Value>]) -> Result<bool> {
        self.scoped(Operation::Insert, |conn| {
            let arity = match rows.first() {
                Some(first) => first.len(),
                None => return Err(SqliteError::InvalidRows("no rows to insert".to_string())),
            };
            if let Some(bad) = rows.iter().find(|row| row.len() != arity) {
                return Err(SqliteError::InvalidRows(format!(
                    "expected {arity} values per row, found {}",
                    bad.len()
                )));
            }

            let sql = insert_sql(&self.table, arity)?;
            tracing::debug!(%sql, rows = rows.len(), "inserting rows");

            let affected = if let [row] = rows {
                conn.execute(&sql, params_from_iter(row.iter().map(convert::to_sql)))?
            } else {
                let tx = conn.unchecked_transaction()?;
                let mut affected = 0;
                {
                    let mut stmt = tx.prepare(&sql)?;
                    for row in rows {
                        affected += stmt.execute(params_from_iter(row.iter().map(convert::to_sql)))?;
                    }
                }
                tx.commit()?;
                affected
            };

            Ok(affected > 0)
        })
    }

    /// Selects `fields` from rows matching every `where_fields[i] = where_values[i]`.
    ///
    /// Pass `["*"]` to return every column and empty predicate lists to
    /// read all rows. The header carries the selected column names.
    pub fn read_rows(
        &self,
        fields: &[String],
        where_fields: &[String],
        where_values: &[Value],
    ) -> Result<RowSet> {
        self.scoped(Operation::Read, |conn| {
            if where_fields.len() != where_values.len() {
                return Err(SqliteError::InvalidRows(format!(
                    "{} search fields but {} search values",
                    where_fields.len(),
                    where_values.len()
                )));
            }

            let sql = select_sql(&self.table, fields, where_fields)?;
            tracing::debug!(%sql, "reading rows");

            let mut stmt = conn.prepare(&sql)?;
            let header: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
            let width = header.len();

            let mut result = RowSet::default();
            let mut rows = stmt.query(params_from_iter(where_values.iter().map(convert::to_sql)))?;
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(width);
                for i in 0..width {
                    values.push(convert::from_sql(row.get_ref(i)?)?);
                }
                result.rows.push(values);
            }

            if !result.rows.is_empty() {
                result.header = header;
            }
            Ok(result)
        })
    }

    /// Sets `field` to `value` on the row whose `primary_key` is `key_value`.
    ///
    /// Returns `false` when no row has that key.
    pub fn update_row(
        &self,
        field: &str,
        primary_key: &str,
        value: &Value,
        key_value: &Value,
    ) -> Result<bool> {
        self.scoped(Operation::Update, |conn| {
            let sql = update_sql(&self.table, field, primary_key)?;
            tracing::debug!(%sql, "updating row");
            let affected = conn.execute(
                &sql,
                params_from_iter([convert::to_sql(value), convert::to_sql(key_value)]),
            )?;
            Ok(affected > 0)
        })
    }

    /// Deletes the row whose `primary_key` is `key_value`.
    ///
    /// Returns `false` when no row has that key.
    pub fn delete_row(&self, primary_key: &str, key_value: &Value) -> Result<bool> {
        self.scoped(Operation::Delete, |conn| {
            let sql = delete_sql(&self.table, primary_key)?;
            tracing::debug!(%sql, "deleting row");
            let affected = conn.execute(&sql, params_from_iter([convert::to_sql(key_value)]))?;
            Ok(affected > 0)
        })
    }

    /// Runs `op` on a freshly opened connection and always releases it.
    fn scoped<T>(&self, operation: Operation, op: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut manager = ConnectionManager::new(&self.database);

        let result = match manager.open() {
            Some(conn) => validate_identifier(&self.table).and_then(|()| op(conn)),
            None => Err(SqliteError::ConnectionUnavailable(
                manager.database().display().to_string(),
            )),
        };
        manager.close();

        if let Err(err) = &result {
            if !err.is_unavailable() {
                tracing::error!(
                    table = %self.table,
                    %operation,
                    error = %err,
                    "database operation failed"
                );
            }
        }
        result
    }
}

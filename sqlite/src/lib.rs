//! SQLite persistence layer for single-key entity tables.
//!
//! This crate turns validated entity data from
//! [`stockroom_core`] into parameterized SQL and executes it against a
//! file-backed SQLite database.
//!
//! # Architecture
//!
//! The crate is organized into these modules, with errors in `error`:
//!
//! - **`connection`**: [`ConnectionManager`], scoped open/close of one handle
//! - **`statement`**: SQL generation from a [`FieldSchema`](stockroom_core::FieldSchema)
//! - **`convert`**: field value ↔ SQLite value conversion
//! - **`executor`**: [`QueryExecutor`], one statement per call
//!
//! # Quick start
//!
//! ```no_run
//! use stockroom_core::{Value, book_schema};
//! use stockroom_sqlite::QueryExecutor;
//!
//! let executor = QueryExecutor::new("ebookstore", "books");
//! if !executor.verify_table_exists().unwrap() {
//!     executor.create_table(&book_schema().unwrap()).unwrap();
//! }
//!
//! let all = executor.read_rows(&["*".into()], &[], &[]).unwrap();
//! println!("{} books in stock", all.len());
//!
//! let removed = executor.delete_row("id", &Value::Integer(1)).unwrap();
//! println!("deleted: {removed}");
//! ```
//!
//! # Failure model
//!
//! Every operation returns a [`Result`]. A database that cannot be opened
//! yields [`SqliteError::ConnectionUnavailable`], which is distinct from a
//! write that matched no row (`Ok(false)`) or a read with no matches (an
//! empty [`RowSet`]). Statement failures are logged with the table name and
//! operation before they are returned.

mod connection;
mod convert;
mod error;
mod executor;
mod statement;

pub use connection::ConnectionManager;
pub use error::{Result, SqliteError};
pub use executor::{Operation, QueryExecutor, RowSet};
pub use statement::{
    TABLE_EXISTS_SQL, create_table_sql, delete_sql, insert_sql, last_key_sql, select_sql,
    update_sql,
};

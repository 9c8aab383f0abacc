//! The book entity: field layout of the `books` stock table.

use crate::schema::{FieldSchema, SchemaError};
use crate::types::{FieldSpec, FieldType};

/// Default table holding book stock.
pub const BOOK_TABLE: &str = "books";

/// Schema of the `books` table.
///
/// Columns are `id INTEGER` (primary key), `qty INTEGER` (never negative),
/// `author TEXT` and `title TEXT`.
///
/// # Examples
///
/// ```
/// use stockroom_core::book_schema;
///
/// let schema = book_schema().unwrap();
/// assert_eq!(schema.column_names(), vec!["id", "qty", "author", "title"]);
/// ```
pub fn book_schema() -> Result<FieldSchema, SchemaError> {
    FieldSchema::builder("id", FieldType::Integer)
        .integer(FieldSpec::integer("qty").with_min(0.0))
        .text("author")
        .text("title")
        .build()
}

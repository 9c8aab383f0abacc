//! SQL statement builders for single-key entity tables.
//!
//! Table and column names cannot be bound as parameters, so they are
//! interpolated after passing [`validate_identifier`]. Every value is bound
//! through numbered `?N` placeholders.
//!
//! # Table layout
//!
//! Columns are declared in schema order, `[primary key, integers…, texts…,
//! floats…]`, and every column is `NOT NULL`:
//!
//! ```text
//! CREATE TABLE IF NOT EXISTS books(id INTEGER NOT NULL PRIMARY KEY,
//!     qty INTEGER NOT NULL, author TEXT NOT NULL, title TEXT NOT NULL)
//! ```

use stockroom_core::FieldSchema;

use crate::error::{Result, SqliteError};

/// Counts tables named `?1`.
pub const TABLE_EXISTS_SQL: &str =
    "SELECT count(name) FROM sqlite_master WHERE type='table' AND name=?1";

/// Validates that a table or column name contains only ASCII alphanumerics
/// and underscores, and does not start with a digit.
pub(crate) fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(SqliteError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

fn validate_projection(fields: &[String]) -> Result<()> {
    if fields.is_empty() {
        return Err(SqliteError::InvalidIdentifier(String::new()));
    }
    for field in fields {
        if field != "*" {
            validate_identifier(field)?;
        }
    }
    Ok(())
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generates the `CREATE TABLE IF NOT EXISTS` statement for `schema`.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidIdentifier`] if the table or any column
/// name is not a plain identifier.
pub fn create_table_sql(table: &str, schema: &FieldSchema) -> Result<String> {
    validate_identifier(table)?;

    let pk = schema.primary_key();
    validate_identifier(&pk.name)?;

    let mut columns = vec![format!(
        "{} {} NOT NULL PRIMARY KEY",
        pk.name,
        pk.field_type.sql_type()
    )];
    for field in schema.selectable_fields() {
        validate_identifier(&field.name)?;
        columns.push(format!(
            "{} {} NOT NULL",
            field.name,
            field.field_type.sql_type()
        ));
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {table}({})",
        columns.join(", ")
    ))
}

/// Generates a positional insert with `arity` placeholders.
pub fn insert_sql(table: &str, arity: usize) -> Result<String> {
    validate_identifier(table)?;
    if arity == 0 {
        return Err(SqliteError::InvalidRows("rows must contain at least one value".to_string()));
    }
    Ok(format!("INSERT INTO {table} VALUES({})", placeholders(arity)))
}

/// Generates a select of `fields`, with every `where_fields` entry joined
/// by `AND` as an equality predicate.
pub fn select_sql(table: &str, fields: &[String], where_fields: &[String]) -> Result<String> {
    validate_identifier(table)?;
    validate_projection(fields)?;

    let mut sql = format!("SELECT {} FROM {table}", fields.join(", "));
    if !where_fields.is_empty() {
        let mut predicates = Vec::with_capacity(where_fields.len());
        for (i, field) in where_fields.iter().enumerate() {
            validate_identifier(field)?;
            predicates.push(format!("{field} = ?{}", i + 1));
        }
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }
    Ok(sql)
}

/// Generates a query for the highest primary key value in the table.
pub fn last_key_sql(table: &str, primary_key: &str) -> Result<String> {
    validate_identifier(table)?;
    validate_identifier(primary_key)?;
    Ok(format!(
        "SELECT {primary_key} FROM {table} ORDER BY {primary_key} DESC LIMIT 1"
    ))
}

/// Generates a single-field update keyed by primary key.
pub fn update_sql(table: &str, field: &str, primary_key: &str) -> Result<String> {
    validate_identifier(table)?;
    validate_identifier(field)?;
    validate_identifier(primary_key)?;
    Ok(format!(
        "UPDATE {table} SET {field} = ?1 WHERE {primary_key} = ?2"
    ))
}

/// Generates a delete keyed by primary key.
pub fn delete_sql(table: &str, primary_key: &str) -> Result<String> {
    validate_identifier(table)?;
    validate_identifier(primary_key)?;
    Ok(format!("DELETE FROM {table} WHERE {primary_key} = ?1"))
}

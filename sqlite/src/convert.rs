//! Conversion between field values and SQLite values.
//!
//! Columns are always declared `NOT NULL` with an `INTEGER`, `TEXT` or
//! `REAL` type, so only those three storage classes are expected when
//! reading back. Anything else is reported as a conversion error rather
//! than silently coerced.

use rusqlite::types::{Value as SqlValue, ValueRef};
use stockroom_core::Value;

use crate::error::{Result, SqliteError};

/// Converts a field value into an owned SQLite value for binding.
pub(crate) fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Integer(v) => SqlValue::Integer(*v),
        Value::Text(v) => SqlValue::Text(v.clone()),
        Value::Float(v) => SqlValue::Real(*v),
    }
}

/// Converts a borrowed SQLite cell back into a field value.
pub(crate) fn from_sql(cell: ValueRef<'_>) -> Result<Value> {
    match cell {
        ValueRef::Integer(v) => Ok(Value::Integer(v)),
        ValueRef::Real(v) => Ok(Value::Float(v)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| Value::Text(s.to_string()))
            .map_err(|e| SqliteError::ConversionError(format!("invalid UTF-8 text: {e}"))),
        ValueRef::Null => Err(SqliteError::ConversionError(
            "unexpected NULL in a NOT NULL column".to_string(),
        )),
        ValueRef::Blob(_) => Err(SqliteError::ConversionError(
            "BLOB values are not supported".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_storage_classes() {
        assert_eq!(to_sql(&Value::Integer(3)), SqlValue::Integer(3));
        assert_eq!(to_sql(&Value::Float(0.5)), SqlValue::Real(0.5));
        assert_eq!(to_sql(&Value::from("Dune")), SqlValue::Text("Dune".to_string()));
    }

    #[test]
    fn test_from_sql_rejects_null_and_blob() {
        assert!(from_sql(ValueRef::Null).is_err());
        assert!(from_sql(ValueRef::Blob(&[1, 2])).is_err());
    }

    #[test]
    fn test_from_sql_text() {
        assert_eq!(from_sql(ValueRef::Text(b"A. Author")).unwrap(), Value::from("A. Author"));
    }
}

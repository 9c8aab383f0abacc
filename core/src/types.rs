//! Field and value type definitions for entity tables.
//!
//! This module defines the small data model every other layer speaks:
//! the storage type of a column, a validated cell value, and the metadata
//! describing one non-key field (name, type and optional numeric range).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage type of a field.
///
/// Every field maps onto one SQLite storage class; the mapping is fixed so
/// that table creation and value coercion agree.
///
/// # Examples
///
/// ```
/// use stockroom_core::FieldType;
///
/// assert_eq!(FieldType::Integer.sql_type(), "INTEGER");
/// assert_eq!(FieldType::Float.sql_type(), "REAL");
/// assert!(FieldType::Float.is_numeric());
/// assert!(!FieldType::Text.is_numeric());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Whole number, stored as `INTEGER`.
    Integer,
    /// Free text, stored as `TEXT`.
    Text,
    /// Floating point number, stored as `REAL`.
    Float,
}

impl FieldType {
    /// Returns the SQLite column type used when creating a table.
    pub fn sql_type(self) -> &'static str {
        match self {
            FieldType::Integer => "INTEGER",
            FieldType::Text => "TEXT",
            FieldType::Float => "REAL",
        }
    }

    /// Returns `true` for the types that accept a numeric range.
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Integer => f.write_str("integer"),
            FieldType::Text => f.write_str("text"),
            FieldType::Float => f.write_str("float"),
        }
    }
}

/// A single validated cell value.
///
/// Values are produced by the validation layer after type coercion, so a
/// `Value` always matches the [`FieldType`] of the field it was checked
/// against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Text(String),
    Float(f64),
}

impl Value {
    /// Returns the field type this value belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Integer(_) => FieldType::Integer,
            Value::Text(_) => FieldType::Text,
            Value::Float(_) => FieldType::Float,
        }
    }

    /// Returns the value as `f64` for range comparisons.
    ///
    /// Text values have no numeric form and return `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Metadata for one field of an entity table.
///
/// `min` and `max` are inclusive and independently optional. Text fields
/// never carry a range; the builder methods leave text specs untouched.
///
/// # Examples
///
/// ```
/// use stockroom_core::{FieldSpec, FieldType};
///
/// let qty = FieldSpec::integer("qty").with_min(0.0);
/// assert_eq!(qty.field_type, FieldType::Integer);
/// assert_eq!(qty.min, Some(0.0));
/// assert_eq!(qty.max, None);
///
/// // Ranges are ignored for text fields.
/// let title = FieldSpec::text("title").with_min(1.0);
/// assert_eq!(title.min, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name.
    pub name: String,
    /// Storage type.
    pub field_type: FieldType,
    /// Inclusive lower bound for numeric fields.
    pub min: Option<f64>,
    /// Inclusive upper bound for numeric fields.
    pub max: Option<f64>,
}

impl FieldSpec {
    /// Creates an unbounded field of the given type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            min: None,
            max: None,
        }
    }

    /// Creates an unbounded integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Creates an unbounded float field.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float)
    }

    /// Creates a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// Sets the inclusive minimum (numeric fields only).
    pub fn with_min(mut self, min: f64) -> Self {
        if self.field_type.is_numeric() {
            self.min = Some(min);
        }
        self
    }

    /// Sets the inclusive maximum (numeric fields only).
    pub fn with_max(mut self, max: f64) -> Self {
        if self.field_type.is_numeric() {
            self.max = Some(max);
        }
        self
    }

    /// Sets both bounds at once (numeric fields only).
    pub fn with_range(self, min: f64, max: f64) -> Self {
        self.with_min(min).with_max(max)
    }
}

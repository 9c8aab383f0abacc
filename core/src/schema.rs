//! Declarative field schemas for single-key entity tables.
//!
//! A [`FieldSchema`] names one primary key and three ordered groups of
//! fields (integer, text, float). It is the template from which tables are
//! created and against which user input is validated. Column order is fixed
//! as `[primary key, integers…, texts…, floats…]` and never changes after
//! construction.
//!
//! # Examples
//!
//! ```
//! use stockroom_core::{FieldSchema, FieldSpec, FieldType};
//!
//! let schema = FieldSchema::builder("id", FieldType::Integer)
//!     .integer(FieldSpec::integer("qty").with_min(0.0))
//!     .text("author")
//!     .text("title")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.column_names(), vec!["id", "qty", "author", "title"]);
//! assert_eq!(schema.selectable_fields().len(), 3);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{FieldSpec, FieldType};

/// Structural problems detected while building a [`FieldSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The primary key name is empty or whitespace-only.
    #[error("primary key must be set")]
    MissingPrimaryKey,
    /// All three field groups are empty.
    #[error("at least one integer, text or float field must be declared")]
    NoFields,
    /// A field name appears more than once across the key and all groups.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    /// A field name is empty or whitespace-only.
    #[error("field names cannot be empty")]
    EmptyFieldName,
    /// A numeric field declares `min > max`.
    #[error("field '{0}' has a minimum greater than its maximum")]
    RangeInverted(String),
}

/// The primary key column of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub name: String,
    pub field_type: FieldType,
}

/// Immutable field metadata for one entity table.
///
/// Construct through [`FieldSchema::builder`]; a schema that exists has
/// already passed every structural check.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    primary_key: PrimaryKey,
    integer_fields: Vec<FieldSpec>,
    text_fields: Vec<FieldSpec>,
    float_fields: Vec<FieldSpec>,
}

impl FieldSchema {
    /// Starts a schema with the given single-column primary key.
    pub fn builder(primary_key: impl Into<String>, key_type: FieldType) -> FieldSchemaBuilder {
        FieldSchemaBuilder {
            primary_key: PrimaryKey {
                name: primary_key.into(),
                field_type: key_type,
            },
            integer_fields: Vec::new(),
            text_fields: Vec::new(),
            float_fields: Vec::new(),
        }
    }

    pub fn primary_key(&self) -> &PrimaryKey {
        &self.primary_key
    }

    pub fn integer_fields(&self) -> &[FieldSpec] {
        &self.integer_fields
    }

    pub fn text_fields(&self) -> &[FieldSpec] {
        &self.text_fields
    }

    pub fn float_fields(&self) -> &[FieldSpec] {
        &self.float_fields
    }

    pub fn integer_names(&self) -> Vec<&str> {
        names(&self.integer_fields)
    }

    pub fn text_names(&self) -> Vec<&str> {
        names(&self.text_fields)
    }

    pub fn float_names(&self) -> Vec<&str> {
        names(&self.float_fields)
    }

    /// Returns every non-key field in menu order: integers, texts, floats.
    pub fn selectable_fields(&self) -> Vec<&FieldSpec> {
        self.integer_fields
            .iter()
            .chain(&self.text_fields)
            .chain(&self.float_fields)
            .collect()
    }

    /// Returns all column names in table order, primary key first.
    pub fn column_names(&self) -> Vec<&str> {
        std::iter::once(self.primary_key.name.as_str())
            .chain(self.selectable_fields().into_iter().map(|f| f.name.as_str()))
            .collect()
    }

    /// Looks up a non-key field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.selectable_fields().into_iter().find(|f| f.name == name)
    }
}

fn names(fields: &[FieldSpec]) -> Vec<&str> {
    fields.iter().map(|f| f.name.as_str()).collect()
}

/// Builder for [`FieldSchema`].
///
/// Fields are appended to their group in call order. Passing a spec to the
/// wrong group (e.g. a float spec to [`integer`](Self::integer)) coerces it
/// to the group's type, so the group always determines storage.
#[derive(Debug, Clone)]
pub struct FieldSchemaBuilder {
    primary_key: PrimaryKey,
    integer_fields: Vec<FieldSpec>,
    text_fields: Vec<FieldSpec>,
    float_fields: Vec<FieldSpec>,
}

impl FieldSchemaBuilder {
    pub fn integer(mut self, spec: FieldSpec) -> Self {
        self.integer_fields.push(FieldSpec {
            field_type: FieldType::Integer,
            ..spec
        });
        self
    }

    pub fn text(mut self, name: impl Into<String>) -> Self {
        self.text_fields.push(FieldSpec::text(name));
        self
    }

    pub fn float(mut self, spec: FieldSpec) -> Self {
        self.float_fields.push(FieldSpec {
            field_type: FieldType::Float,
            ..spec
        });
        self
    }

    /// Validates the declaration and produces the schema.
    ///
    /// Every violation is logged before it is returned, so a caller that
    /// only reports the error still leaves a trace for the developer.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found: missing key, no fields,
    /// empty or duplicate names, or an inverted range.
    pub fn build(self) -> Result<FieldSchema, SchemaError> {
        if let Err(err) = self.check() {
            tracing::error!(primary_key = %self.primary_key.name, error = %err, "invalid field schema");
            return Err(err);
        }

        Ok(FieldSchema {
            primary_key: self.primary_key,
            integer_fields: self.integer_fields,
            text_fields: self.text_fields,
            float_fields: self.float_fields,
        })
    }

    fn check(&self) -> Result<(), SchemaError> {
        if self.primary_key.name.trim().is_empty() {
            return Err(SchemaError::MissingPrimaryKey);
        }

        if self.integer_fields.is_empty() && self.text_fields.is_empty() && self.float_fields.is_empty() {
            return Err(SchemaError::NoFields);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(self.primary_key.name.as_str());

        let fields = self
            .integer_fields
            .iter()
            .chain(&self.text_fields)
            .chain(&self.float_fields);

        for field in fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if let (Some(min), Some(max)) = (field.min, field.max) {
                if min > max {
                    return Err(SchemaError::RangeInverted(field.name.clone()));
                }
            }
        }

        Ok(())
    }
}

//! Entity records: validated input for one requested operation.
//!
//! Each record is collected fresh from a [`Prompter`] against a
//! [`FieldSchema`], owns all of its data, and is consumed by the
//! persistence layer. Values arrive already positioned for the statement
//! that will use them.

use crate::prompt::{
    Prompter, Result, prompt_field_choice, prompt_key, prompt_number, prompt_search_value,
    prompt_text,
};
use crate::schema::FieldSchema;
use crate::types::{FieldType, Value};

/// Values for a new row, grouped as the schema groups its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecord {
    /// User-supplied key; only collected when the key is not an integer.
    pub key: Option<Value>,
    pub integer_values: Vec<Value>,
    pub text_values: Vec<Value>,
    pub float_values: Vec<Value>,
}

impl CreateRecord {
    /// Prompts for every non-key field of `schema`.
    ///
    /// Text fields are asked first, then integers, then floats, each in
    /// schema order. Integer keys are assigned by the store, so a key is
    /// only requested for text and float keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockroom_core::*;
    ///
    /// let mut prompter = ScriptedPrompter::new(["A. Author", "Title One", "10"]);
    /// let record = CreateRecord::collect(&book_schema().unwrap(), &mut prompter).unwrap();
    /// assert_eq!(
    ///     record.into_row(Value::Integer(1)),
    ///     vec![Value::Integer(1), Value::Integer(10), "A. Author".into(), "Title One".into()]
    /// );
    /// ```
    pub fn collect<P: Prompter + ?Sized>(schema: &FieldSchema, prompter: &mut P) -> Result<Self> {
        let mut text_values = Vec::with_capacity(schema.text_fields().len());
        for field in schema.text_fields() {
            let text = prompt_text(prompter, &format!("Enter the {}", field.name))?;
            text_values.push(Value::Text(text));
        }

        let mut integer_values = Vec::with_capacity(schema.integer_fields().len());
        for field in schema.integer_fields() {
            integer_values.push(prompt_number(prompter, field)?);
        }

        let mut float_values = Vec::with_capacity(schema.float_fields().len());
        for field in schema.float_fields() {
            float_values.push(prompt_number(prompter, field)?);
        }

        let pk = schema.primary_key();
        let key = match pk.field_type {
            FieldType::Integer => None,
            key_type => Some(prompt_key(prompter, &pk.name, key_type)?),
        };

        Ok(Self {
            key,
            integer_values,
            text_values,
            float_values,
        })
    }

    /// Builds the full row `[key, ints…, texts…, floats…]`.
    pub fn into_row(self, key: Value) -> Vec<Value> {
        std::iter::once(key)
            .chain(self.integer_values)
            .chain(self.text_values)
            .chain(self.float_values)
            .collect()
    }
}

/// Which columns a search returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Every column (`*`).
    All,
    /// The named columns, in order.
    Fields(Vec<String>),
}

impl Projection {
    /// Column list as passed to the executor.
    pub fn columns(&self) -> Vec<String> {
        match self {
            Projection::All => vec!["*".to_string()],
            Projection::Fields(fields) => fields.clone(),
        }
    }
}

/// A single-predicate lookup, or a read of every row.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRecord {
    pub projection: Projection,
    /// `(field, value)` equality predicate; `None` reads all rows.
    pub filter: Option<(String, Value)>,
}

impl SearchRecord {
    /// Prompts for one field and one matching value.
    pub fn collect<P: Prompter + ?Sized>(schema: &FieldSchema, prompter: &mut P) -> Result<Self> {
        let fields = schema.selectable_fields();
        let field = prompt_field_choice(
            prompter,
            "Enter the number option below for how you want to perform search",
            &fields,
        )?;
        let value = prompt_search_value(prompter, field)?;

        Ok(Self {
            projection: Projection::All,
            filter: Some((field.name.clone(), value)),
        })
    }

    /// All fields of all rows, no predicate.
    pub fn read_all() -> Self {
        Self {
            projection: Projection::All,
            filter: None,
        }
    }

    pub fn where_fields(&self) -> Vec<String> {
        self.filter.iter().map(|(field, _)| field.clone()).collect()
    }

    pub fn where_values(&self) -> Vec<Value> {
        self.filter.iter().map(|(_, value)| value.clone()).collect()
    }
}

/// Change of one non-key field on the row identified by its primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecord {
    pub field: String,
    pub key_field: String,
    pub value: Value,
    pub key_value: Value,
}

impl UpdateRecord {
    /// Prompts for the key, the field to change, and its new value.
    ///
    /// The primary key is never offered as a target; updates always match
    /// on the key alone.
    pub fn collect<P: Prompter + ?Sized>(schema: &FieldSchema, prompter: &mut P) -> Result<Self> {
        let pk = schema.primary_key();
        let key_value = prompt_key(prompter, &pk.name, pk.field_type)?;

        let fields = schema.selectable_fields();
        let field = prompt_field_choice(prompter, "Select the field to update", &fields)?;
        let value = match field.field_type {
            FieldType::Text => Value::Text(prompt_text(
                prompter,
                &format!("Enter the new {}", field.name),
            )?),
            _ => prompt_number(prompter, field)?,
        };

        Ok(Self {
            field: field.name.clone(),
            key_field: pk.name.clone(),
            value,
            key_value,
        })
    }
}

/// Removal of the row identified by its primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRecord {
    pub key_field: String,
    pub key_value: Value,
}

impl DeleteRecord {
    pub fn collect<P: Prompter + ?Sized>(schema: &FieldSchema, prompter: &mut P) -> Result<Self> {
        let pk = schema.primary_key();
        let key_value = prompt_key(prompter, &pk.name, pk.field_type)?;
        Ok(Self {
            key_field: pk.name.clone(),
            key_value,
        })
    }
}

/// One validated request, tagged by the operation it feeds.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    /// Table definition for creating the backing table.
    DefineTable(FieldSchema),
    Create(CreateRecord),
    Search(SearchRecord),
    Update(UpdateRecord),
    Delete(DeleteRecord),
}

//! Field schemas, input validation and entity records for single-key tables.
//!
//! This crate holds everything about an entity that does not touch the
//! database:
//!
//! - [`FieldSchema`]: primary key plus ordered integer, text and float
//!   fields, each numeric field optionally range-constrained.
//! - [`validate_number`], [`validate_text`] and friends: pure rules that
//!   coerce raw input into a [`Value`] or explain why it was rejected.
//! - [`Prompter`] and the `prompt_*` loops: interactive retry around the
//!   rules.
//! - [`EntityRecord`]: the validated input for one create, search,
//!   update or delete request.
//!
//! # Example
//!
//! ```
//! use stockroom_core::*;
//!
//! let schema = FieldSchema::builder("id", FieldType::Integer)
//!     .integer(FieldSpec::integer("qty").with_min(0.0))
//!     .text("author")
//!     .text("title")
//!     .build()
//!     .unwrap();
//!
//! let mut prompter = ScriptedPrompter::new(["4", "0", "12"]);
//! let update = UpdateRecord::collect(&schema, &mut prompter).unwrap();
//! assert_eq!(update.field, "qty");
//! assert_eq!(update.value, Value::Integer(12));
//! ```

mod book;
mod prompt;
mod record;
mod schema;
mod types;
mod validate;

pub use book::{BOOK_TABLE, book_schema};
pub use prompt::{
    PromptError, Prompter, ScriptedPrompter, prompt_field_choice, prompt_key, prompt_number,
    prompt_search_value, prompt_text,
};
pub use record::{
    CreateRecord, DeleteRecord, EntityRecord, Projection, SearchRecord, UpdateRecord,
};
pub use schema::{FieldSchema, FieldSchemaBuilder, PrimaryKey, SchemaError};
pub use types::{FieldSpec, FieldType, Value};
pub use validate::{
    InputError, validate_key, validate_number, validate_option, validate_search_value,
    validate_text,
};

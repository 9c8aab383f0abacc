//! Pure input validation rules.
//!
//! Every rule takes the raw text a user typed plus the metadata it is
//! checked against and returns either a coerced [`Value`] or an
//! [`InputError`]. Nothing here performs I/O; the interactive retry loops
//! in [`prompt`](crate::prompt) call these functions repeatedly.
//!
//! # Examples
//!
//! ```
//! use stockroom_core::*;
//!
//! let qty = FieldSpec::integer("qty").with_min(0.0);
//! assert_eq!(validate_number("12", &qty), Ok(Value::Integer(12)));
//! assert_eq!(validate_number("-1", &qty), Err(InputError::BelowMinimum(0.0)));
//! assert!(validate_number("1.5", &qty).is_err());
//! ```

use thiserror::Error;

use crate::types::{FieldSpec, FieldType, Value};

/// Reasons a piece of user input was rejected.
///
/// The `Display` text is shown to the user before the prompt repeats.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Nothing was entered.
    #[error("An input was not received.")]
    Empty,
    /// The input could not be parsed as the field's numeric type.
    #[error("{}", not_a_number_message(.0))]
    NotANumber(FieldType),
    /// The value is smaller than the field's inclusive minimum.
    #[error("Value entered is smaller than allowed minimum of {0}")]
    BelowMinimum(f64),
    /// The value is larger than the field's inclusive maximum.
    #[error("Value entered exceeds allowed maximum of {0}")]
    AboveMaximum(f64),
    /// A menu option was not a whole number.
    #[error("Please enter a valid number for your choice.")]
    NotAnOption,
    /// A menu option was outside `[0, count - 1]`.
    #[error("Invalid. Please enter an option number between 0 and {}", .0.saturating_sub(1))]
    OptionOutOfRange(usize),
}

fn not_a_number_message(field_type: &FieldType) -> &'static str {
    match field_type {
        FieldType::Integer => "Invalid. Please enter a valid, non-decimal number",
        _ => "Invalid. Please enter a valid, numeric value",
    }
}

/// Accepts any non-empty string unchanged.
pub fn validate_text(input: &str) -> Result<String, InputError> {
    if input.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(input.to_string())
}

/// Parses a numeric field value and enforces its declared range.
///
/// Checks run in order: type cast, minimum, maximum. Each bound is skipped
/// when unset. Text specs are accepted as non-empty strings.
///
/// # Errors
///
/// Returns [`InputError::NotANumber`], [`InputError::BelowMinimum`] or
/// [`InputError::AboveMaximum`]; never clamps.
pub fn validate_number(input: &str, spec: &FieldSpec) -> Result<Value, InputError> {
    let value = parse_as(input, spec.field_type)?;

    if let (Some(min), Some(number)) = (spec.min, value.as_f64()) {
        if number < min {
            return Err(InputError::BelowMinimum(min));
        }
    }
    if let (Some(max), Some(number)) = (spec.max, value.as_f64()) {
        if number > max {
            return Err(InputError::AboveMaximum(max));
        }
    }

    Ok(value)
}

/// Coerces a primary key value to the key's type. Keys carry no range.
pub fn validate_key(input: &str, key_type: FieldType) -> Result<Value, InputError> {
    parse_as(input, key_type)
}

/// Validates a search value against the selected field.
///
/// Numeric fields follow [`validate_number`]; text fields accept any
/// non-empty string.
pub fn validate_search_value(input: &str, spec: &FieldSpec) -> Result<Value, InputError> {
    if input.is_empty() {
        return Err(InputError::Empty);
    }
    validate_number(input, spec)
}

/// Parses a menu option in `[0, count - 1]`.
pub fn validate_option(input: &str, count: usize) -> Result<usize, InputError> {
    let option: i64 = input.trim().parse().map_err(|_| InputError::NotAnOption)?;
    if option < 0 || option as u64 >= count as u64 {
        return Err(InputError::OptionOutOfRange(count));
    }
    Ok(option as usize)
}

fn parse_as(input: &str, field_type: FieldType) -> Result<Value, InputError> {
    match field_type {
        FieldType::Text => validate_text(input).map(Value::Text),
        FieldType::Integer => input
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| InputError::NotANumber(FieldType::Integer)),
        FieldType::Float => match input.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Value::Float(v)),
            _ => Err(InputError::NotANumber(FieldType::Float)),
        },
    }
}

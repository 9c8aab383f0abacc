//! Interactive retry loops over the pure validation rules.
//!
//! A [`Prompter`] abstracts the terminal: it asks a question and returns
//! the line typed, or `None` once input is closed. The helpers here keep
//! asking until [`validate`](crate::validate) accepts the answer, showing
//! each rejection through [`Prompter::notify`]. There is no attempt limit;
//! the only way out without a valid value is closed input.

use std::collections::VecDeque;

use thiserror::Error;

use crate::types::{FieldSpec, FieldType, Value};
use crate::validate::{
    InputError, validate_key, validate_number, validate_option, validate_search_value,
    validate_text,
};

/// Failure of an interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The input source reached end-of-file before a valid answer.
    #[error("input closed before a valid value was entered")]
    InputClosed,
}

/// Convenience alias for prompt results.
pub type Result<T> = std::result::Result<T, PromptError>;

/// Source of user answers and sink for user-facing notices.
pub trait Prompter {
    /// Shows `message` and returns the answer without its line ending.
    ///
    /// Returns `None` when no more input can be read.
    fn ask(&mut self, message: &str) -> Option<String>;

    /// Shows an informational or error line.
    fn notify(&mut self, message: &str);
}

/// A [`Prompter`] fed from a fixed list of answers.
///
/// Used for scripted input and in tests. Every question and notice is
/// recorded so callers can assert on the conversation.
///
/// # Examples
///
/// ```
/// use stockroom_core::{FieldSpec, ScriptedPrompter, Value, prompt_number};
///
/// let mut prompter = ScriptedPrompter::new(["-2", "5"]);
/// let qty = FieldSpec::integer("qty").with_min(0.0);
/// assert_eq!(prompt_number(&mut prompter, &qty).unwrap(), Value::Integer(5));
/// assert_eq!(prompter.notices().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
    notices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Notices shown so far, in order.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Number of answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, message: &str) -> Option<String> {
        self.questions.push(message.to_string());
        self.answers.pop_front()
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Repeats `message` until `check` accepts the answer.
fn ask_until<P, T, F>(prompter: &mut P, message: &str, mut check: F) -> Result<T>
where
    P: Prompter + ?Sized,
    F: FnMut(&str) -> std::result::Result<T, InputError>,
{
    loop {
        let answer = prompter.ask(message).ok_or(PromptError::InputClosed)?;
        match check(&answer) {
            Ok(value) => return Ok(value),
            Err(err) => prompter.notify(&err.to_string()),
        }
    }
}

/// Prompts until a non-empty string is entered.
pub fn prompt_text<P: Prompter + ?Sized>(prompter: &mut P, message: &str) -> Result<String> {
    ask_until(prompter, message, validate_text)
}

/// Prompts for a value of `spec`, enforcing type and range.
pub fn prompt_number<P: Prompter + ?Sized>(prompter: &mut P, spec: &FieldSpec) -> Result<Value> {
    let message = format!("Enter the {} ({})", spec.name, describe(spec));
    ask_until(prompter, &message, |input| validate_number(input, spec))
}

/// Prompts for a primary key value of the given type.
pub fn prompt_key<P: Prompter + ?Sized>(
    prompter: &mut P,
    key_name: &str,
    key_type: FieldType,
) -> Result<Value> {
    let message = format!("Enter the {key_name} of the entry");
    ask_until(prompter, &message, |input| validate_key(input, key_type))
}

/// Lists `fields` as `index: name` and prompts for one option.
pub fn prompt_field_choice<'a, P: Prompter + ?Sized>(
    prompter: &mut P,
    heading: &str,
    fields: &[&'a FieldSpec],
) -> Result<&'a FieldSpec> {
    prompter.notify(heading);
    for (index, field) in fields.iter().enumerate() {
        prompter.notify(&format!("{index}: {}", field.name));
    }
    let index = ask_until(prompter, "Option", |input| validate_option(input, fields.len()))?;
    Ok(fields[index])
}

/// Prompts for a value to match against `spec` in a search.
pub fn prompt_search_value<P: Prompter + ?Sized>(
    prompter: &mut P,
    spec: &FieldSpec,
) -> Result<Value> {
    let message = format!("Enter a value for the {}", spec.name);
    ask_until(prompter, &message, |input| validate_search_value(input, spec))
}

fn describe(spec: &FieldSpec) -> String {
    match (spec.min, spec.max) {
        (Some(min), Some(max)) => format!("{} from {min} to {max}", spec.field_type),
        (Some(min), None) => format!("{} of at least {min}", spec.field_type),
        (None, Some(max)) => format!("{} of at most {max}", spec.field_type),
        (None, None) => spec.field_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_retries_on_empty() {
        let mut prompter = ScriptedPrompter::new(["", "", "Dune"]);
        let title = prompt_text(&mut prompter, "Enter the title").unwrap();
        assert_eq!(title, "Dune");
        assert_eq!(prompter.questions().len(), 3);
        assert_eq!(prompter.notices(), ["An input was not received.", "An input was not received."]);
    }

    #[test]
    fn test_prompt_number_reports_each_rejection() {
        let spec = FieldSpec::integer("qty").with_range(0.0, 10.0);
        let mut prompter = ScriptedPrompter::new(["ten", "-1", "11", "10"]);
        assert_eq!(prompt_number(&mut prompter, &spec).unwrap(), Value::Integer(10));
        assert_eq!(
            prompter.notices(),
            [
                "Invalid. Please enter a valid, non-decimal number",
                "Value entered is smaller than allowed minimum of 0",
                "Value entered exceeds allowed maximum of 10",
            ]
        );
    }

    #[test]
    fn test_prompt_closed_input() {
        let mut prompter = ScriptedPrompter::new(["", "x"]);
        let spec = FieldSpec::float("price");
        assert_eq!(prompt_number(&mut prompter, &spec), Err(PromptError::InputClosed));
    }

    #[test]
    fn test_field_choice_lists_and_retries() {
        let qty = FieldSpec::integer("qty");
        let author = FieldSpec::text("author");
        let mut prompter = ScriptedPrompter::new(["5", "one", "1"]);
        let chosen = prompt_field_choice(&mut prompter, "Select a field", &[&qty, &author]).unwrap();
        assert_eq!(chosen.name, "author");
        assert_eq!(prompter.notices()[1], "0: qty");
        assert_eq!(prompter.notices()[2], "1: author");
        assert_eq!(prompter.questions().len(), 3);
    }

    #[test]
    fn test_prompt_key_coerces_type() {
        let mut prompter = ScriptedPrompter::new(["1.5", "3"]);
        let key = prompt_key(&mut prompter, "id", FieldType::Integer).unwrap();
        assert_eq!(key, Value::Integer(3));
    }
}

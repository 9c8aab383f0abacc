//! Terminal-backed [`Prompter`].

use std::io::{BufRead, Write};

use stockroom_core::Prompter;

/// Reads answers line by line from `R` and writes prompts to `W`.
///
/// Lines that are not valid UTF-8 are decoded lossily and handed to the
/// validation rules like any other answer. End of input and read errors
/// close the prompter: every later [`ask`](Prompter::ask) returns `None`.
#[derive(Debug)]
pub struct ConsolePrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
    closed: bool,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, message: &str) -> Option<String> {
        if self.closed {
            return None;
        }

        if let Err(err) = write!(self.output, "{message}: ").and_then(|()| self.output.flush()) {
            tracing::warn!(error = %err, "failed to write prompt");
        }

        let mut line = Vec::new();
        match self.input.read_until(b'\n', &mut line) {
            Ok(0) => {
                tracing::debug!("input closed");
                self.closed = true;
                None
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&line);
                Some(line.trim_end_matches(['\n', '\r']).to_string())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to read input");
                self.closed = true;
                None
            }
        }
    }

    fn notify(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "{message}") {
            tracing::warn!(error = %err, "failed to write notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use stockroom_core::{FieldSpec, Value, prompt_number};

    #[test]
    fn test_answers_are_read_without_line_endings() {
        let mut prompter = ConsolePrompter::new(Cursor::new("Dune\r\n  spaced  \n"), Vec::new());
        assert_eq!(prompter.ask("Enter the title").as_deref(), Some("Dune"));
        assert_eq!(prompter.ask("Enter the author").as_deref(), Some("  spaced  "));
        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output, "Enter the title: Enter the author: ");
    }

    #[test]
    fn test_end_of_input_closes() {
        let mut prompter = ConsolePrompter::new(Cursor::new("last"), Vec::new());
        assert_eq!(prompter.ask("Option").as_deref(), Some("last"));
        assert_eq!(prompter.ask("Option"), None);
        assert!(prompter.is_closed());
        assert_eq!(prompter.ask("Option"), None);
    }

    #[test]
    fn test_retry_notices_are_written() {
        let input = Cursor::new("-3\n7\n");
        let mut prompter = ConsolePrompter::new(input, Vec::new());
        let qty = FieldSpec::integer("qty").with_min(0.0);
        assert_eq!(prompt_number(&mut prompter, &qty).unwrap(), Value::Integer(7));

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("Value entered is smaller than allowed minimum of 0\n"));
    }

    #[test]
    fn test_invalid_utf8_line_stays_open() {
        let input = Cursor::new(b"\xff\xfe\n7\n".to_vec());
        let mut prompter = ConsolePrompter::new(input, Vec::new());
        assert_eq!(prompter.ask("Option").as_deref(), Some("\u{fffd}\u{fffd}"));
        assert!(!prompter.is_closed());
        assert_eq!(prompter.ask("Option").as_deref(), Some("7"));
    }

    #[test]
    fn test_invalid_utf8_number_is_retried() {
        let input = Cursor::new(b"1\xff\n3\n".to_vec());
        let mut prompter = ConsolePrompter::new(input, Vec::new());
        let qty = FieldSpec::integer("qty");
        assert_eq!(prompt_number(&mut prompter, &qty).unwrap(), Value::Integer(3));

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("Invalid. Please enter a valid, non-decimal number\n"));
    }
}

//! Console output: titles, subtitles, plain lines and grid tables.

use std::io::{self, Write};

/// Writes menu output to any [`Write`] sink, usually stdout.
#[derive(Debug)]
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Prints `text` upper-cased between dashes, padded by blank lines.
    pub fn title(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "\n----------{}---------\n", text.to_uppercase())
    }

    /// Prints `text` on its own line followed by a dashed underline.
    pub fn subtitle(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "\n{text}\n{}", "-".repeat(text.chars().count()))
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Prints header-first rows as a grid table. Prints nothing for no rows.
    pub fn table(&mut self, rows: &[Vec<String>]) -> io::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        write!(self.out, "{}", render_grid(rows))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Renders header-first rows as a bordered grid.
///
/// Columns whose body cells are all numeric are right-aligned and the
/// rest left-aligned. The header is separated from the body with `=`.
///
/// ```
/// use stockroom_cli::render_grid;
///
/// let rows = vec![
///     vec!["id".to_string(), "title".to_string()],
///     vec!["1".to_string(), "Dune".to_string()],
/// ];
/// assert_eq!(
///     render_grid(&rows),
///     "+------+---------+\n\
///      |   id | title   |\n\
///      +======+=========+\n\
///      |    1 | Dune    |\n\
///      +------+---------+\n"
/// );
/// ```
pub fn render_grid(rows: &[Vec<String>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    // header cells always keep two columns of slack
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            body.iter()
                .map(|row| cell(row, col).chars().count())
                .max()
                .unwrap_or(0)
                .max(cell(header, col).chars().count() + 2)
        })
        .collect();
    let numeric: Vec<bool> = (0..columns)
        .map(|col| !body.is_empty() && body.iter().all(|row| is_number(cell(row, col))))
        .collect();

    let border = |fill: char| {
        let mut line = String::from("+");
        for width in &widths {
            line.extend(std::iter::repeat_n(fill, width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };
    let format_row = |row: &[String]| {
        let mut line = String::from("|");
        for (col, width) in widths.iter().enumerate() {
            let text = cell(row, col);
            if numeric[col] {
                line.push_str(&format!(" {text:>width$} |"));
            } else {
                line.push_str(&format!(" {text:<width$} |"));
            }
        }
        line.push('\n');
        line
    };

    let mut out = border('-');
    out.push_str(&format_row(header));
    out.push_str(&border('='));
    for row in body {
        out.push_str(&format_row(row));
        out.push_str(&border('-'));
    }
    out
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok()
}

//! Plain-text rendering of truth tables and error positions.
//!
//! # Examples
//!
//! ```
//! use whopper::report::Reporter;
//!
//! let table = whopper::run("A implies A").unwrap();
//! let text = Reporter::default().render(&table).unwrap();
//! let expected = [
//!     "    A  A implies A  A implies A",
//!     "False         True         True",
//!     " True         True         True",
//!     "Valid expression.",
//!     "",
//! ];
//! assert_eq!(text, expected.join("\n"));
//! ```

use std::fmt::Write as FmtWrite;
use std::io;

use crate::table::TruthTable;

pub const VALID: &str = "Valid expression.";
pub const INVALID: &str = "Invalid expression.";

fn cell(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// The closing line of a report.
pub fn verdict(valid: bool) -> &'static str {
    if valid {
        VALID
    } else {
        INVALID
    }
}

/// Renders a header and rows as right-justified columns.
#[derive(Debug, Clone)]
pub struct Reporter {
    /// Number of spaces between adjacent columns.
    pub column_gap: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self { column_gap: 2 }
    }
}

impl Reporter {
    pub fn new(column_gap: usize) -> Self {
        Self { column_gap }
    }

    /// Width of each column: its widest cell across header and rows.
    fn widths(header: &[String], rows: &[Vec<bool>]) -> Vec<usize> {
        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (i, &value) in row.iter().enumerate() {
                if i >= widths.len() {
                    widths.push(0);
                }
                widths[i] = widths[i].max(cell(value).len());
            }
        }
        widths
    }

    fn write_line<'a>(
        &self,
        s: &mut String,
        cells: impl Iterator<Item = &'a str>,
        widths: &[usize],
    ) -> std::fmt::Result {
        for (i, (text, &width)) in cells.zip(widths).enumerate() {
            if i > 0 {
                write!(s, "{:gap$}", "", gap = self.column_gap)?;
            }
            write!(s, "{:>width$}", text, width = width)?;
        }
        writeln!(s)
    }

    /// Render the table lines without the verdict.
    pub fn render_rows(&self, header: &[String], rows: &[Vec<bool>]) -> Result<String, std::fmt::Error> {
        let widths = Self::widths(header, rows);
        let mut s = String::new();
        self.write_line(&mut s, header.iter().map(String::as_str), &widths)?;
        for row in rows {
            self.write_line(&mut s, row.iter().map(|&value| cell(value)), &widths)?;
        }
        Ok(s)
    }

    /// Render the whole report: table followed by the verdict line.
    pub fn render(&self, table: &TruthTable) -> Result<String, std::fmt::Error> {
        let mut s = self.render_rows(table.header(), table.rows())?;
        writeln!(s, "{}", verdict(table.is_valid()))?;
        Ok(s)
    }

    pub fn write_to<W: io::Write>(&self, out: &mut W, table: &TruthTable) -> io::Result<()> {
        let text = self.render(table).map_err(io::Error::other)?;
        out.write_all(text.as_bytes())
    }
}

/// Point at `offset` (a byte offset into `input`) with a caret.
///
/// Returns two lines: the input itself, then `^` under the offending
/// character (or just past the end, for errors at end of input).
///
/// # Examples
///
/// ```
/// use whopper::report::caret;
///
/// assert_eq!(caret("A $ B", 2), "A $ B\n  ^");
/// assert_eq!(caret("A and", 5), "A and\n     ^");
/// ```
pub fn caret(input: &str, offset: usize) -> String {
    let offset = offset.min(input.len());
    let prefix = input.get(..offset).unwrap_or(input);
    // Keep the column right for tabs by reusing them in the padding.
    let padding: String = prefix
        .chars()
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    format!("{}\n{}^", input, padding)
}

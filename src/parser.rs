//! CSV tokenizer
//!
//! Turns raw CSV text into rows of string fields. This is the core of the
//! crate: a character-level state machine that handles quoted fields,
//! embedded commas and newlines, doubled-quote escapes, and empty fields.
//!
//! The parser makes no assumptions about column counts. Rows in one
//! document may have different widths, and a header row (if any) is
//! returned like any other row; interpreting it is the caller's job, or
//! [`RowDecoder`](crate::decode::RowDecoder)'s when a schema is in play.
//!
//! # Example
//!
//! ```
//! use csv_rows::parser::parse_str;
//!
//! let rows = parse_str("name,age\nAlice,23\n").unwrap();
//! assert_eq!(rows, vec![
//!     vec!["name".to_string(), "age".to_string()],
//!     vec!["Alice".to_string(), "23".to_string()],
//! ]);
//! ```

use crate::error::CsvError;

/// One logical CSV record: an ordered sequence of field strings.
///
/// A row may span multiple physical lines when a field is quoted. Fields
/// may be empty; empty strings are first-class values, never skipped.
pub type Row = Vec<String>;

/// Parser state, tracked per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Accumulating an unquoted field. Commas and newlines are delimiters.
    Unquoted,
    /// Inside a quoted field. Commas and newlines are literal.
    Quoted,
    /// A quote was seen inside a quoted field. The next character decides
    /// whether it was an escape (another quote) or the end of the quoted
    /// region (anything else).
    QuoteInQuoted,
}

/// Parses the complete text of a CSV source into rows of fields.
///
/// Row order and field order are preserved exactly as written. A field
/// that was quoted in the source is unescaped and indistinguishable, once
/// parsed, from a field that never needed quoting. Rows may have
/// different field counts; the parser never enforces a fixed width.
///
/// Both `\n` and `\r\n` terminate a row. A quote only opens a quoted
/// region at the start of a field; inside a quoted field, `""` produces
/// one literal quote. Characters between a closing quote and the next
/// delimiter are appended to the field value rather than rejected.
///
/// # Errors
///
/// Returns [`CsvError::UnterminatedQuote`] if the input ends inside a
/// quoted field, carrying the physical line the field opened on.
pub fn parse_str(text: &str) -> Result<Vec<Row>, CsvError> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut state = State::Unquoted;

    // True while the pending field was opened as a quoted field. Lets EOF
    // distinguish `""` (one row with one empty field) from empty input.
    let mut field_quoted = false;

    // Physical line bookkeeping for error messages (1-indexed).
    let mut line: u64 = 1;
    let mut quote_open_line: u64 = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match state {
            State::Quoted => match c {
                '"' => state = State::QuoteInQuoted,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            },
            State::QuoteInQuoted if c == '"' => {
                // Doubled quote: one literal quote, still inside the field.
                field.push('"');
                state = State::Quoted;
            }
            _ => {
                // Unquoted, or the quoted region just ended and this
                // character is re-dispatched under unquoted rules.
                state = State::Unquoted;
                match c {
                    ',' => {
                        row.push(std::mem::take(&mut field));
                        field_quoted = false;
                    }
                    '\n' => {
                        line += 1;
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                        field_quoted = false;
                    }
                    '\r' if chars.peek() == Some(&'\n') => {
                        chars.next();
                        line += 1;
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                        field_quoted = false;
                    }
                    '"' if field.is_empty() && !field_quoted => {
                        state = State::Quoted;
                        field_quoted = true;
                        quote_open_line = line;
                    }
                    _ => field.push(c),
                }
            }
        }
    }

    match state {
        State::Quoted => Err(CsvError::UnterminatedQuote {
            line: quote_open_line,
        }),
        State::Unquoted | State::QuoteInQuoted => {
            // Flush the final record when there is one: a pending field,
            // earlier fields in the row, or a quoted (possibly empty) field.
            if !field.is_empty() || !row.is_empty() || field_quoted {
                row.push(field);
                rows.push(row);
            }
            Ok(rows)
        }
    }
}

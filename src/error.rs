//! Error module
//!
//! Defines the crate's error type using `thiserror`. One enum covers all
//! failure sources: structural CSV parse errors, row validation failures
//! from a caller-supplied schema, and I/O errors from the read boundary.

use thiserror::Error;

use crate::schema::SchemaError;

/// The error type for all fallible operations in this crate.
///
/// # Error Categories
///
/// - **Parse errors**: the CSV text is structurally malformed. The only
///   structural failure is a quoted field left open at end of input;
///   ragged row widths, empty fields, and embedded delimiters inside
///   quoted fields are all valid.
/// - **Validation errors**: a row did not satisfy the supplied schema.
///   The error carries the failing row's position so callers can locate
///   it in the source document.
/// - **I/O errors**: failures reading the underlying file, propagated
///   unchanged from [`std::io::Error`].
///
/// # Example
///
/// ```
/// use csv_rows::error::CsvError;
/// use csv_rows::parser::parse_str;
///
/// let err = parse_str("a,\"unclosed").unwrap_err();
/// assert!(matches!(err, CsvError::UnterminatedQuote { line: 1 }));
/// ```
#[derive(Error, Debug)]
pub enum CsvError {
    /// A quoted field was still open when the input ended.
    ///
    /// `line` is the 1-indexed physical line on which the offending
    /// quoted field opened, not the line where the input ran out; a
    /// multi-line quoted field can put those far apart.
    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote {
        /// Physical line where the unclosed quote opened (1-indexed).
        line: u64,
    },

    /// A row failed the caller-supplied schema.
    ///
    /// `row_index` is the 0-based position of the failing row within the
    /// parsed document, header row included. The underlying
    /// [`SchemaError`] describes which field was at fault and why.
    #[error("Row {row_index}: {source}")]
    InvalidRow {
        /// 0-based index of the failing row in the parsed document.
        row_index: usize,
        /// The schema's failure detail.
        #[source]
        source: SchemaError,
    },

    /// General I/O error from reading the source file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

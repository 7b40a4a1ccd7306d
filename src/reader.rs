//! File read boundary
//!
//! Thin async entry points that read a CSV file from disk and hand the
//! text to the parser. The state machine itself is a pure computation
//! over an in-memory string; this module is the only place the crate
//! touches the filesystem, and I/O failures are propagated unchanged.

use std::path::Path;

use tracing::debug;

use crate::decode::RowDecoder;
use crate::error::CsvError;
use crate::parser::{parse_str, Row};
use crate::schema::RowSchema;

/// Reads and parses a CSV file, returning raw rows.
///
/// The header row, if any, is returned like any other row.
///
/// # Errors
///
/// Returns [`CsvError::Io`] if the file cannot be read and
/// [`CsvError::UnterminatedQuote`] if the content is structurally
/// malformed.
pub async fn parse_path(path: impl AsRef<Path>) -> Result<Vec<Row>, CsvError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let rows = parse_str(&text)?;
    debug!(path = %path.display(), rows = rows.len(), "parsed CSV file");
    Ok(rows)
}

/// Reads, parses, and decodes a CSV file through a schema.
///
/// When `has_header` is true the first row is dropped before decoding.
/// Decoding is fail-fast: the first row the schema rejects aborts the
/// call with [`CsvError::InvalidRow`]. For the collect-all policy, use
/// [`parse_path`] and [`RowDecoder::check`] directly.
///
/// # Example
///
/// ```no_run
/// use csv_rows::de::typed;
/// use csv_rows::reader::parse_path_with;
///
/// # async fn run() -> Result<(), csv_rows::error::CsvError> {
/// let people: Vec<(String, u32)> =
///     parse_path_with("people.csv", typed(), true).await?;
/// # Ok(())
/// # }
/// ```
pub async fn parse_path_with<S: RowSchema>(
    path: impl AsRef<Path>,
    schema: S,
    has_header: bool,
) -> Result<Vec<S::Record>, CsvError> {
    let rows = parse_path(path).await?;
    let records = RowDecoder::new(schema).has_header(has_header).decode(&rows)?;
    debug!(records = records.len(), "decoded CSV rows");
    Ok(records)
}

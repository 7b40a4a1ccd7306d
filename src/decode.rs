//! Row decoding
//!
//! Maps a parsed document through a caller-supplied [`RowSchema`],
//! producing typed records in row order. Supports skipping a header row
//! and two failure policies: fail-fast ([`RowDecoder::decode`], the
//! default) and collect-all ([`RowDecoder::check`], which produces a
//! [`DecodeReport`] listing every invalid row).

use std::fmt;

use crate::error::CsvError;
use crate::parser::Row;
use crate::schema::{RowSchema, SchemaError};

/// Decodes parsed rows into typed records through a schema.
///
/// Configuration is builder-style: construct with [`RowDecoder::new`],
/// then chain option setters before decoding.
///
/// # Example
///
/// ```
/// use csv_rows::decode::RowDecoder;
/// use csv_rows::parser::parse_str;
/// use csv_rows::schema::SchemaError;
///
/// let rows = parse_str("name,age\nAlice,23\n").unwrap();
///
/// let person = |fields: &[String]| match fields {
///     [name, age] => Ok((name.clone(), age.clone())),
///     _ => Err(SchemaError::new("expected 2 fields")),
/// };
///
/// let people = RowDecoder::new(person)
///     .has_header(true)
///     .decode(&rows)
///     .unwrap();
/// assert_eq!(people, vec![("Alice".to_string(), "23".to_string())]);
/// ```
pub struct RowDecoder<S> {
    /// The schema applied to each data row.
    schema: S,
    /// Whether the first row is a header and must be excluded from output.
    has_header: bool,
}

impl<S: RowSchema> RowDecoder<S> {
    /// Creates a decoder for the given schema. The header flag defaults
    /// to false: every row is a data row.
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            has_header: false,
        }
    }

    /// Sets whether the first row is a header.
    ///
    /// A header row is dropped before decoding; it never reaches the
    /// schema and produces no record.
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Decodes every data row, failing fast on the first invalid one.
    ///
    /// Successes are collected in row order. On failure the returned
    /// [`CsvError::InvalidRow`] carries the 0-based index of the failing
    /// row within `rows` (header included in the numbering, so the index
    /// always points at the right row of the parsed document).
    pub fn decode(&self, rows: &[Row]) -> Result<Vec<S::Record>, CsvError> {
        let skip = usize::from(self.has_header);
        let mut records = Vec::with_capacity(rows.len().saturating_sub(skip));

        for (offset, row) in rows.iter().skip(skip).enumerate() {
            match self.schema.decode_row(row) {
                Ok(record) => records.push(record),
                Err(source) => {
                    return Err(CsvError::InvalidRow {
                        row_index: offset + skip,
                        source,
                    })
                }
            }
        }

        Ok(records)
    }

    /// Decodes every data row, collecting all failures instead of
    /// stopping at the first.
    ///
    /// Useful when the caller wants a complete picture of a bad file
    /// rather than one error at a time. Successfully decoded records are
    /// discarded; this mode answers "what is wrong", not "what is in
    /// the file".
    pub fn check(&self, rows: &[Row]) -> DecodeReport {
        let skip = usize::from(self.has_header);
        let mut report = DecodeReport::default();

        for (offset, row) in rows.iter().skip(skip).enumerate() {
            match self.schema.decode_row(row) {
                Ok(_) => report.record_valid(row.len()),
                Err(error) => report.record_invalid(offset + skip, row.len(), error),
            }
        }

        report
    }
}

/// A validation failure for one row, with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 0-based index of the row within the parsed document.
    pub row_index: usize,
    /// The schema's failure detail.
    pub error: SchemaError,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row_index, self.error)
    }
}

/// Statistics collected by [`RowDecoder::check`].
///
/// Counts valid and invalid data rows (the header, when skipped, is not
/// counted), tracks the widest row seen, and keeps one [`RowError`] per
/// invalid row. `Display` renders a human-readable report.
#[derive(Debug, Default, Clone)]
pub struct DecodeReport {
    /// Total number of data rows examined.
    pub total_rows: u64,
    /// Number of rows the schema accepted.
    pub valid_rows: u64,
    /// Number of rows the schema rejected.
    pub invalid_rows: u64,
    /// Field count of the widest row examined.
    pub widest_row: usize,
    /// One entry per invalid row, in row order.
    pub errors: Vec<RowError>,
}

impl DecodeReport {
    /// Returns true if every examined row decoded successfully.
    pub fn is_valid(&self) -> bool {
        self.invalid_rows == 0
    }

    fn record_valid(&mut self, width: usize) {
        self.total_rows += 1;
        self.valid_rows += 1;
        self.widest_row = self.widest_row.max(width);
    }

    fn record_invalid(&mut self, row_index: usize, width: usize, error: SchemaError) {
        self.total_rows += 1;
        self.invalid_rows += 1;
        self.widest_row = self.widest_row.max(width);
        self.errors.push(RowError { row_index, error });
    }
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Row Decode Report")?;
        writeln!(f, "=================")?;
        writeln!(
            f,
            "Status: {}",
            if self.is_valid() { "PASSED" } else { "FAILED" }
        )?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Total rows:     {:>10}", self.total_rows)?;
        writeln!(f, "  Valid rows:     {:>10}", self.valid_rows)?;
        writeln!(f, "  Invalid rows:   {:>10}", self.invalid_rows)?;
        writeln!(f, "  Widest row:     {:>10} fields", self.widest_row)?;

        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "Errors:")?;
            for error in &self.errors {
                writeln!(f, "  {}", error)?;
            }
        }

        Ok(())
    }
}

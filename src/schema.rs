//! Row schema capability
//!
//! A schema is anything that can turn a raw row of strings into a typed
//! record, or fail with a structured [`SchemaError`]. The [`RowSchema`]
//! trait is the single seam between the parser and whatever validation
//! library (or hand-written check) the caller brings; plain closures
//! implement it out of the box, and [`crate::de::typed`] adapts any
//! `serde::Deserialize` type behind it.

use std::fmt;

/// A capability that validates and transforms one raw row.
///
/// Implementors receive the row's fields in source order and either
/// produce a typed record or fail with a [`SchemaError`] describing what
/// was wrong. The parser's output never depends on the schema; schemas
/// only enter the picture through
/// [`RowDecoder`](crate::decode::RowDecoder).
///
/// Any `Fn(&[String]) -> Result<T, SchemaError>` is a schema:
///
/// ```
/// use csv_rows::schema::{RowSchema, SchemaError};
///
/// let pair = |fields: &[String]| -> Result<(String, String), SchemaError> {
///     match fields {
///         [a, b] => Ok((a.clone(), b.clone())),
///         _ => Err(SchemaError::new(format!(
///             "expected 2 fields, found {}",
///             fields.len()
///         ))),
///     }
/// };
///
/// let row = vec!["Alice".to_string(), "23".to_string()];
/// assert_eq!(
///     pair.decode_row(&row).unwrap(),
///     ("Alice".to_string(), "23".to_string())
/// );
/// ```
pub trait RowSchema {
    /// The typed record this schema produces.
    type Record;

    /// Validates and transforms one row of fields.
    fn decode_row(&self, fields: &[String]) -> Result<Self::Record, SchemaError>;
}

impl<T, F> RowSchema for F
where
    F: Fn(&[String]) -> Result<T, SchemaError>,
{
    type Record = T;

    fn decode_row(&self, fields: &[String]) -> Result<T, SchemaError> {
        self(fields)
    }
}

/// A structured schema failure: which field was at fault, and why.
///
/// The field position is optional because some failures concern the row
/// as a whole (wrong field count, for instance) rather than one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    field: Option<usize>,
    message: String,
}

impl SchemaError {
    /// A failure concerning the row as a whole.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// A failure pinned to one field (0-indexed, in source order).
    pub fn at_field(field: usize, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    /// The 0-based position of the offending field, when known.
    pub fn field(&self) -> Option<usize> {
        self.field
    }

    /// The failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(index) => write!(f, "field {}: {}", index, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for SchemaError {}

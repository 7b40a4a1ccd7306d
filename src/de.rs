//! Serde bridge
//!
//! Deserializes a raw row into any `serde::Deserialize` type by field
//! position, so tuples, tuple structs, and ordinary structs (fields in
//! declaration order) act as schemas without hand-written decoding.
//! [`typed`] wraps this behind [`RowSchema`] for use with
//! [`RowDecoder`](crate::decode::RowDecoder).
//!
//! Fixed-width targets are strict about arity: a row with more fields
//! than the target declares is rejected, as is one with fewer. The empty
//! string deserializes to `None` for `Option` fields.
//!
//! # Example
//!
//! ```
//! use csv_rows::de::decode_row;
//!
//! let row = vec!["Alice".to_string(), "23".to_string()];
//! let (name, age): (String, u32) = decode_row(&row).unwrap();
//! assert_eq!(name, "Alice");
//! assert_eq!(age, 23);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, DeserializeSeed, IntoDeserializer, SeqAccess, Visitor};
use serde::forward_to_deserialize_any;

use crate::schema::{RowSchema, SchemaError};

/// Deserializes one row of fields into `T`.
///
/// Fails with a [`SchemaError`] carrying the offending field's position
/// when one is known (a field that would not parse) or none when the row
/// as a whole is at fault (wrong field count).
pub fn decode_row<T: DeserializeOwned>(fields: &[String]) -> Result<T, SchemaError> {
    T::deserialize(RowDeserializer { fields, pos: 0 }).map_err(SchemaError::from)
}

/// A ready-made schema decoding rows into `T` via serde.
///
/// ```
/// use csv_rows::de::typed;
/// use csv_rows::decode::RowDecoder;
/// use csv_rows::parser::parse_str;
///
/// let rows = parse_str("name,age\nAlice,23\n").unwrap();
/// let people: Vec<(String, u32)> = RowDecoder::new(typed())
///     .has_header(true)
///     .decode(&rows)
///     .unwrap();
/// assert_eq!(people, vec![("Alice".to_string(), 23)]);
/// ```
pub struct Typed<T> {
    marker: PhantomData<fn() -> T>,
}

/// Creates a [`Typed`] schema for `T`.
pub fn typed<T: DeserializeOwned>() -> Typed<T> {
    Typed {
        marker: PhantomData,
    }
}

impl<T: DeserializeOwned> RowSchema for Typed<T> {
    type Record = T;

    fn decode_row(&self, fields: &[String]) -> Result<T, SchemaError> {
        self::decode_row(fields)
    }
}

/// Internal serde error, converted to [`SchemaError`] at the boundary.
#[derive(Debug)]
struct DeError {
    field: Option<usize>,
    message: String,
}

impl fmt::Display for DeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(index) => write!(f, "field {}: {}", index, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DeError {}

impl de::Error for DeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        DeError {
            field: None,
            message: msg.to_string(),
        }
    }
}

impl From<DeError> for SchemaError {
    fn from(error: DeError) -> Self {
        match error.field {
            Some(index) => SchemaError::at_field(index, error.message),
            None => SchemaError::new(error.message),
        }
    }
}

/// Top-level deserializer: presents the row as a sequence of fields.
struct RowDeserializer<'de> {
    fields: &'de [String],
    pos: usize,
}

impl RowDeserializer<'_> {
    /// Fixed-width targets must consume the whole row.
    fn expect_consumed(&self, expected: usize) -> Result<(), DeError> {
        if self.pos == self.fields.len() {
            Ok(())
        } else {
            Err(DeError {
                field: None,
                message: format!(
                    "expected {} fields, found {}",
                    expected,
                    self.fields.len()
                ),
            })
        }
    }
}

struct FieldsAccess<'a, 'de> {
    de: &'a mut RowDeserializer<'de>,
}

impl<'de> SeqAccess<'de> for FieldsAccess<'_, 'de> {
    type Error = DeError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, DeError>
    where
        T: DeserializeSeed<'de>,
    {
        if self.de.pos >= self.de.fields.len() {
            return Ok(None);
        }
        let field = FieldDeserializer {
            value: &self.de.fields[self.de.pos],
            index: self.de.pos,
        };
        self.de.pos += 1;
        seed.deserialize(field).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.de.fields.len() - self.de.pos)
    }
}

impl<'de> de::Deserializer<'de> for RowDeserializer<'de> {
    type Error = DeError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_seq<V>(mut self, visitor: V) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_seq(FieldsAccess { de: &mut self })
    }

    fn deserialize_tuple<V>(mut self, len: usize, visitor: V) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        let value = visitor.visit_seq(FieldsAccess { de: &mut self })?;
        self.expect_consumed(len)?;
        Ok(value)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_struct<V>(
        mut self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        let value = visitor.visit_seq(FieldsAccess { de: &mut self })?;
        self.expect_consumed(fields.len())?;
        Ok(value)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string bytes
        byte_buf option unit unit_struct map enum identifier ignored_any
    }
}

/// Per-field deserializer: parses one string into the requested type.
struct FieldDeserializer<'de> {
    value: &'de str,
    index: usize,
}

impl FieldDeserializer<'_> {
    fn parse<T>(&self, kind: &str) -> Result<T, DeError>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        self.value.parse().map_err(|e| DeError {
            field: Some(self.index),
            message: format!("invalid {} `{}`: {}", kind, self.value, e),
        })
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident : $kind:literal,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value, DeError>
            where
                V: Visitor<'de>,
            {
                visitor.$visit(self.parse($kind)?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldDeserializer<'de> {
    type Error = DeError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool: "boolean",
        deserialize_i8 => visit_i8: "integer",
        deserialize_i16 => visit_i16: "integer",
        deserialize_i32 => visit_i32: "integer",
        deserialize_i64 => visit_i64: "integer",
        deserialize_u8 => visit_u8: "integer",
        deserialize_u16 => visit_u16: "integer",
        deserialize_u32 => visit_u32: "integer",
        deserialize_u64 => visit_u64: "integer",
        deserialize_f32 => visit_f32: "number",
        deserialize_f64 => visit_f64: "number",
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        let mut chars = self.value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(DeError {
                field: Some(self.index),
                message: format!("invalid character `{}`: expected one character", self.value),
            }),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        if self.value.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DeError>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(self.value.into_deserializer())
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf unit unit_struct seq tuple tuple_struct
        map struct identifier ignored_any
    }
}

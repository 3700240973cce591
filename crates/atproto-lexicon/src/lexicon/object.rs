//! Field-level codec for lexicon objects
//!
//! [`ObjectWriter`] and [`ObjectReader`] are the shared mechanism every record
//! type is written against. A record lists its fields once, in wire order, and
//! states for each one whether it is required, optional, bounded or a union:
//!
//! ```rust
//! use atproto_lexicon::lexicon::{
//!     LexObject, ObjectReader, ObjectWriter, Result, StringConstraints,
//! };
//!
//! struct Note {
//!     body: String,
//!     title: Option<String>,
//! }
//!
//! impl LexObject for Note {
//!     fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
//!         w.text("body", &self.body, StringConstraints::graphemes(5));
//!         w.optional("title", self.title.as_ref())
//!     }
//!
//!     fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
//!         Ok(Note {
//!             body: r.required("body")?,
//!             title: r.optional("title")?,
//!         })
//!     }
//! }
//!
//! let note = Note { body: "hello world".to_string(), title: None };
//! let wire = atproto_lexicon::lexicon::object_to_value(&note).unwrap();
//! assert_eq!(wire, serde_json::json!({ "body": "hello" }));
//! ```
//!
//! # Write/read asymmetry
//!
//! Bounds are applied on write only. The writer clamps bounded fields to their
//! protocol maximum; the reader accepts any length. A decoded record may
//! therefore hold over-limit values, and those are clamped again only if the
//! record is re-encoded. Absence of read-side bound checks is intentional.
//!
//! Optional fields are omitted when absent; the writer never emits `null`.
//! The reader treats an explicit `null` the same as an absent key.

use super::constraints::{ArrayConstraints, StringConstraints};
use super::error::{CodecError, Result};
use super::formats::{format_datetime, parse_datetime};
use super::record::DecodeOptions;
use super::tagged::{check_type, type_of, LexiconType, TYPE_KEY};
use super::union::{decode_union, encode_union, LexUnion};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// An object encoded and decoded through the field-level codec
pub trait LexObject: Sized {
    /// Write this object's fields, in wire order
    fn encode_fields(&self, writer: &mut ObjectWriter) -> Result<()>;

    /// Read this object's fields
    fn decode_fields(reader: &ObjectReader<'_>) -> Result<Self>;
}

/// Encode an untagged object to a JSON value
pub fn object_to_value<T: LexObject>(object: &T) -> Result<Value> {
    let mut writer = ObjectWriter::new();
    object.encode_fields(&mut writer)?;
    Ok(writer.into_value())
}

/// Decode an untagged object from a JSON value
pub fn object_from_value<T: LexObject>(value: &Value, options: &DecodeOptions) -> Result<T> {
    decode_nested(value, std::any::type_name::<T>(), options)
}

fn decode_nested<T: LexObject>(
    value: &Value,
    expected: &str,
    options: &DecodeOptions,
) -> Result<T> {
    let reader = ObjectReader::from_value(value, expected, options)?;
    T::decode_fields(&reader)
}

// =============================================================================
// Writer
// =============================================================================

/// Builds one wire object, preserving the order fields are written in
#[derive(Debug, Default)]
pub struct ObjectWriter {
    fields: Map<String, Value>,
}

impl ObjectWriter {
    /// Start an untagged object
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an object whose first key is the `$type` discriminant
    pub fn tagged(nsid: &'static str) -> Self {
        let mut fields = Map::new();
        fields.insert(TYPE_KEY.to_string(), Value::String(nsid.to_string()));
        Self { fields }
    }

    /// Whether a key has been written
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Write a required serde value
    pub fn required<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.fields.insert(key.to_string(), value);
        Ok(())
    }

    /// Write an optional serde value, omitting the key when absent
    pub fn optional<T: Serialize>(&mut self, key: &str, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => self.required(key, value),
            None => Ok(()),
        }
    }

    /// Merge a serde struct's fields into this object
    pub fn flatten<T: Serialize>(&mut self, payload: &T) -> Result<()> {
        match serde_json::to_value(payload)? {
            Value::Object(fields) => {
                for (key, value) in fields {
                    if key != TYPE_KEY {
                        self.fields.insert(key, value);
                    }
                }
                Ok(())
            }
            other => Err(CodecError::MalformedValue {
                field: String::new(),
                reason: format!("flattened payload must be an object, got {other}"),
            }),
        }
    }

    /// Write a string, clamped to its bound
    pub fn text(&mut self, key: &str, value: &str, bound: StringConstraints) {
        let value = bound.apply(key, value).into_owned();
        self.fields.insert(key.to_string(), Value::String(value));
    }

    /// Write an optional string, clamped to its bound
    pub fn optional_text(&mut self, key: &str, value: Option<&str>, bound: StringConstraints) {
        if let Some(value) = value {
            self.text(key, value, bound);
        }
    }

    /// Write an optional array of strings
    ///
    /// Each element is clamped to `item` and the array to `bound`, keeping the
    /// leading elements in order.
    pub fn optional_strings(
        &mut self,
        key: &str,
        values: Option<&[String]>,
        item: StringConstraints,
        bound: ArrayConstraints,
    ) {
        let Some(values) = values else {
            return;
        };
        let clamped = bound
            .apply(key, values)
            .iter()
            .map(|value| Value::String(item.apply(key, value).into_owned()))
            .collect();
        self.fields.insert(key.to_string(), Value::Array(clamped));
    }

    /// Write a timestamp through the datetime formatter
    pub fn datetime(&mut self, key: &str, value: &DateTime<Utc>) -> Result<()> {
        let formatted = format_datetime(value).map_err(|e| CodecError::MalformedValue {
            field: key.to_string(),
            reason: e.to_string(),
        })?;
        self.fields.insert(key.to_string(), Value::String(formatted));
        Ok(())
    }

    /// Write a nested codec object
    pub fn object<T: LexObject>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = object_to_value(value)?;
        self.fields.insert(key.to_string(), value);
        Ok(())
    }

    /// Write a nested codec object that carries its own `$type`
    pub fn tagged_object<T: LexObject + LexiconType>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<()> {
        let mut writer = ObjectWriter::tagged(T::NSID);
        value.encode_fields(&mut writer)?;
        self.fields.insert(key.to_string(), writer.into_value());
        Ok(())
    }

    /// Write an optional nested codec object
    pub fn optional_object<T: LexObject>(&mut self, key: &str, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => self.object(key, value),
            None => Ok(()),
        }
    }

    /// Write an array of codec objects, clamped to its bound
    pub fn objects<T: LexObject>(
        &mut self,
        key: &str,
        values: &[T],
        bound: ArrayConstraints,
    ) -> Result<()> {
        let items = bound
            .apply(key, values)
            .iter()
            .map(object_to_value)
            .collect::<Result<Vec<_>>>()?;
        self.fields.insert(key.to_string(), Value::Array(items));
        Ok(())
    }

    /// Write an optional array of codec objects, clamped to its bound
    pub fn optional_objects<T: LexObject>(
        &mut self,
        key: &str,
        values: Option<&[T]>,
        bound: ArrayConstraints,
    ) -> Result<()> {
        match values {
            Some(values) => self.objects(key, values, bound),
            None => Ok(()),
        }
    }

    /// Write a union field as its selected variant
    pub fn union<U: LexUnion>(&mut self, key: &str, value: &U) -> Result<()> {
        let value = encode_union(value)?;
        self.fields.insert(key.to_string(), value);
        Ok(())
    }

    /// Write an optional union field
    pub fn optional_union<U: LexUnion>(&mut self, key: &str, value: Option<&U>) -> Result<()> {
        match value {
            Some(value) => self.union(key, value),
            None => Ok(()),
        }
    }

    /// Write an array of union values
    pub fn unions<U: LexUnion>(&mut self, key: &str, values: &[U]) -> Result<()> {
        let items = values.iter().map(encode_union).collect::<Result<Vec<_>>>()?;
        self.fields.insert(key.to_string(), Value::Array(items));
        Ok(())
    }

    /// Finish and return the fields in write order
    pub fn finish(self) -> Map<String, Value> {
        self.fields
    }

    /// Finish as a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

// =============================================================================
// Reader
// =============================================================================

/// Reads fields out of one wire object
///
/// Reads are independent of key order in the document.
#[derive(Debug, Clone, Copy)]
pub struct ObjectReader<'a> {
    object: &'a Map<String, Value>,
    options: &'a DecodeOptions,
}

impl<'a> ObjectReader<'a> {
    /// Read from an object
    pub fn new(object: &'a Map<String, Value>, options: &'a DecodeOptions) -> Self {
        Self { object, options }
    }

    /// Read from a value that must be an object; `expected` names it in errors
    pub fn from_value(
        value: &'a Value,
        expected: &str,
        options: &'a DecodeOptions,
    ) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self::new(object, options)),
            _ => Err(CodecError::NotAnObject {
                expected: expected.to_string(),
            }),
        }
    }

    /// Decode options in effect
    pub fn options(&self) -> &'a DecodeOptions {
        self.options
    }

    /// The `$type` of this object, if present
    pub fn discriminant(&self) -> Option<&'a str> {
        type_of(self.object)
    }

    /// Whether a key is present with a non-null value
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    fn require(&self, key: &str) -> Result<&'a Value> {
        self.get(key).ok_or_else(|| CodecError::MissingField {
            field: key.to_string(),
        })
    }

    fn deserialize<T: DeserializeOwned>(key: &str, value: &'a Value) -> Result<T> {
        T::deserialize(value).map_err(|e| CodecError::MalformedValue {
            field: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read a required serde value
    pub fn required<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        Self::deserialize(key, self.require(key)?)
    }

    /// Read an optional serde value; absence is not an error
    pub fn optional<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|value| Self::deserialize(key, value))
            .transpose()
    }

    /// Read the whole object as a serde struct
    pub fn flattened<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.object.clone())).map_err(|e| {
            CodecError::MalformedValue {
                field: String::new(),
                reason: e.to_string(),
            }
        })
    }

    /// Read a required timestamp through the datetime parser
    pub fn datetime(&self, key: &str) -> Result<DateTime<Utc>> {
        let raw: String = self.required(key)?;
        parse_datetime(&raw).map_err(|e| CodecError::MalformedValue {
            field: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read a required nested codec object
    pub fn object<T: LexObject>(&self, key: &str) -> Result<T> {
        let value = self.require(key)?;
        decode_nested(value, key, self.options).map_err(|e| e.nested_in(key))
    }

    /// Read a required nested object that carries its own `$type`
    ///
    /// The discriminant is checked only under strict options.
    pub fn tagged_object<T: LexObject + LexiconType>(&self, key: &str) -> Result<T> {
        let value = self.require(key)?;
        let decode = || {
            let reader = ObjectReader::from_value(value, T::NSID, self.options)?;
            check_type(reader.object, T::NSID, self.options.strict_types)?;
            T::decode_fields(&reader)
        };
        decode().map_err(|e| e.nested_in(key))
    }

    /// Read an optional nested codec object
    pub fn optional_object<T: LexObject>(&self, key: &str) -> Result<Option<T>> {
        if self.has(key) {
            self.object(key).map(Some)
        } else {
            Ok(None)
        }
    }

    fn array(&self, key: &str, value: &'a Value) -> Result<&'a Vec<Value>> {
        value.as_array().ok_or_else(|| CodecError::MalformedValue {
            field: key.to_string(),
            reason: format!("expected an array, found {}", json_kind(value)),
        })
    }

    /// Read a required array of codec objects
    pub fn objects<T: LexObject>(&self, key: &str) -> Result<Vec<T>> {
        let items = self.array(key, self.require(key)?)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                decode_nested(item, key, self.options)
                    .map_err(|e| e.nested_in(&format!("{key}[{index}]")))
            })
            .collect()
    }

    /// Read an optional array of codec objects
    pub fn optional_objects<T: LexObject>(&self, key: &str) -> Result<Option<Vec<T>>> {
        if self.has(key) {
            self.objects(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read a required union field
    pub fn union<U: LexUnion>(&self, key: &str) -> Result<U> {
        decode_union(key, self.require(key)?, self.options)
    }

    /// Read an optional union field
    pub fn optional_union<U: LexUnion>(&self, key: &str) -> Result<Option<U>> {
        match self.get(key) {
            Some(value) => decode_union(key, value, self.options).map(Some),
            None => Ok(None),
        }
    }

    /// Read a required array of union values
    pub fn unions<U: LexUnion>(&self, key: &str) -> Result<Vec<U>> {
        let items = self.array(key, self.require(key)?)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| decode_union(&format!("{key}[{index}]"), item, self.options))
            .collect()
    }
}

/// Short name of a JSON value's kind, for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

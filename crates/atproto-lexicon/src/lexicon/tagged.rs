//! Type-tagged lexicon values
//!
//! Every lexicon object that can appear in a polymorphic position carries its
//! schema identifier under the reserved `$type` key, flattened into the same
//! JSON object as its own fields:
//!
//! ```json
//! { "$type": "app.bsky.richtext.facet#mention", "did": "did:plc:abc123" }
//! ```
//!
//! The discriminant is fixed by the Rust type ([`LexiconType::NSID`]) and can
//! not be set per instance.
//!
//! Decoding a known type is lax: the `$type` on the wire is read but a
//! mismatch is tolerated, since producers extend schemas additively and the
//! payload shape is what matters. Callers that want the check use
//! [`Tagged::from_value_strict`] or `DecodeOptions::with_strict_types`.

use super::error::{CodecError, Result};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{self, Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::ops::Deref;

/// Reserved key holding the discriminant
pub const TYPE_KEY: &str = "$type";

/// A Rust type bound to one lexicon schema identifier
pub trait LexiconType {
    /// Schema identifier emitted as `$type` (e.g. `app.bsky.feed.post`)
    const NSID: &'static str;
}

impl<T: LexiconType + ?Sized> LexiconType for &T {
    const NSID: &'static str = T::NSID;
}

/// Read the `$type` of a JSON object, if present and a string
pub fn type_of(object: &Map<String, Value>) -> Option<&str> {
    object.get(TYPE_KEY).and_then(Value::as_str)
}

/// Compare a wire discriminant against the expected one
///
/// Returns an error only when `strict` is set and a *present* `$type` differs.
pub(crate) fn check_type(
    object: &Map<String, Value>,
    expected: &'static str,
    strict: bool,
) -> Result<()> {
    match type_of(object) {
        Some(actual) if actual != expected => {
            if strict {
                return Err(CodecError::TypeMismatch {
                    expected,
                    actual: actual.to_string(),
                });
            }
            tracing::debug!(expected, actual, "tolerating mismatched $type");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// A payload serialized with its type-level discriminant flattened in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tagged<T>(T);

impl<T: LexiconType> Tagged<T> {
    /// Wrap a payload
    pub fn new(payload: T) -> Self {
        Tagged(payload)
    }

    /// The discriminant this value encodes with
    pub fn discriminant(&self) -> &'static str {
        T::NSID
    }

    /// Unwrap the payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Tagged<T>
where
    T: LexiconType + for<'de> Deserialize<'de>,
{
    /// Decode from a JSON value, requiring `$type` to be present and match
    pub fn from_value_strict(value: Value) -> Result<Self> {
        let Value::Object(object) = &value else {
            return Err(CodecError::NotAnObject { expected: T::NSID.to_string() });
        };
        match type_of(object) {
            None => return Err(CodecError::MissingField { field: TYPE_KEY.to_string() }),
            Some(_) => check_type(object, T::NSID, true)?,
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl<T> Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: LexiconType> From<T> for Tagged<T> {
    fn from(payload: T) -> Self {
        Tagged(payload)
    }
}

impl<T> Serialize for Tagged<T>
where
    T: Serialize + LexiconType,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = match serde_json::to_value(&self.0).map_err(ser::Error::custom)? {
            Value::Object(fields) => fields,
            other => {
                return Err(ser::Error::custom(format!(
                    "{} payload must serialize to an object, got {other}",
                    T::NSID
                )))
            }
        };

        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        map.serialize_entry(TYPE_KEY, T::NSID)?;
        for (key, value) in fields.iter().filter(|(key, _)| key.as_str() != TYPE_KEY) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, T> Deserialize<'de> for Tagged<T>
where
    T: Deserialize<'de> + LexiconType,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        if let Some(Value::String(actual)) = fields.remove(TYPE_KEY) {
            if actual != T::NSID {
                tracing::debug!(
                    expected = T::NSID,
                    actual = %actual,
                    "tolerating mismatched $type"
                );
            }
        }
        T::deserialize(Value::Object(fields))
            .map(Tagged)
            .map_err(de::Error::custom)
    }
}

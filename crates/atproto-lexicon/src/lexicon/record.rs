//! Record-level encode and decode
//!
//! A record is a tagged [`LexObject`]: its `$type` is a constant of the Rust
//! type and always comes first on the wire, followed by the fields in the order
//! the record's [`LexObject::encode_fields`] writes them.
//!
//! # Example
//!
//! ```rust
//! use atproto_lexicon::lexicon::{decode_record, encode_record};
//! use atproto_lexicon::lexicon::formats::FixedClock;
//! use atproto_lexicon::records::Post;
//!
//! let post = Post::now("Hello, AT Protocol!", &FixedClock::from_millis(1_704_067_200_000));
//!
//! let bytes = encode_record(&post).unwrap();
//! assert!(bytes.starts_with(br#"{"$type":"app.bsky.feed.post""#));
//!
//! let decoded: Post = decode_record(&bytes).unwrap();
//! assert_eq!(decoded, post);
//! ```

use super::error::{CodecError, Result};
use super::object::{LexObject, ObjectReader, ObjectWriter};
use super::tagged::{check_type, LexiconType, TYPE_KEY};
use serde_json::Value;

/// Options controlling how permissive decoding is
///
/// The default is lax: `$type` is neither required nor checked, matching how
/// records from other producers are expected to be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject a present `$type` that differs from the expected discriminant
    pub strict_types: bool,
    /// Reject a record with no `$type`
    pub require_type: bool,
}

impl DecodeOptions {
    /// Lax decoding (the default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Both checks on
    pub fn strict() -> Self {
        Self {
            strict_types: true,
            require_type: true,
        }
    }

    /// Set whether mismatched discriminants are rejected
    pub fn with_strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }

    /// Set whether a missing record discriminant is rejected
    pub fn with_require_type(mut self, require: bool) -> Self {
        self.require_type = require;
        self
    }
}

/// A repository record: a tagged object with a fixed collection NSID
pub trait LexRecord: LexObject + LexiconType {
    /// Encode to a JSON value, `$type` first
    fn to_value(&self) -> Result<Value> {
        let mut writer = ObjectWriter::tagged(Self::NSID);
        self.encode_fields(&mut writer)?;
        Ok(writer.into_value())
    }

    /// Decode from a JSON value
    fn from_value(value: &Value, options: &DecodeOptions) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(CodecError::NotAnObject {
                expected: Self::NSID.to_string(),
            });
        };
        let reader = ObjectReader::new(object, options);
        if options.require_type && !reader.has(TYPE_KEY) {
            return Err(CodecError::MissingField {
                field: TYPE_KEY.to_string(),
            });
        }
        check_type(object, Self::NSID, options.strict_types)?;
        Self::decode_fields(&reader)
    }
}

/// Encode a record to wire JSON bytes
pub fn encode_record<R: LexRecord>(record: &R) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&record.to_value()?)?)
}

/// Decode a record from wire JSON bytes with lax options
pub fn decode_record<R: LexRecord>(bytes: &[u8]) -> Result<R> {
    decode_record_with(bytes, &DecodeOptions::default())
}

/// Decode a record from wire JSON bytes
pub fn decode_record_with<R: LexRecord>(bytes: &[u8], options: &DecodeOptions) -> Result<R> {
    let value: Value = serde_json::from_slice(bytes)?;
    R::from_value(&value, options)
}

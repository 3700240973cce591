//! Union (polymorphic) field codec
//!
//! A union field holds exactly one of a closed set of variants. Each union
//! type declares its variants as an ordered table of [`UnionVariant`]
//! descriptors; the table order is the probe order.
//!
//! Decoding walks the table and, for each candidate whose wire key is present,
//! attempts a structural decode. The first candidate that decodes wins and the
//! rest are never attempted. When two variants could both decode the same
//! object, the table order is the tie-break, so every union documents its
//! order next to its table.
//!
//! Encoding emits only the selected variant: its discriminant first, then its
//! payload under its own wire key.

use super::error::{CodecError, Result};
use super::object::{ObjectReader, ObjectWriter};
use super::record::DecodeOptions;
use super::tagged::type_of;
use serde_json::Value;

/// Descriptor for one variant of a union
pub struct UnionVariant<U> {
    /// Wire key whose presence makes this variant a candidate
    pub key: &'static str,
    /// Discriminant written on encode
    pub nsid: &'static str,
    /// Structural decoder for the variant's object
    pub decode: fn(&ObjectReader<'_>) -> Result<U>,
}

impl<U> std::fmt::Debug for UnionVariant<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionVariant")
            .field("key", &self.key)
            .field("nsid", &self.nsid)
            .finish()
    }
}

/// A closed union of lexicon variants
pub trait LexUnion: Sized + 'static {
    /// Variants in probe order
    const VARIANTS: &'static [UnionVariant<Self>];

    /// The descriptor of the selected variant
    fn variant(&self) -> &'static UnionVariant<Self>;

    /// Write the selected variant's payload (everything except `$type`)
    fn encode_payload(&self, writer: &mut ObjectWriter) -> Result<()>;

    /// Wire keys in probe order
    fn probe_keys() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|variant| variant.key).collect()
    }
}

/// Decode a union field by probing its variants in declared order
pub fn decode_union<U: LexUnion>(field: &str, value: &Value, options: &DecodeOptions) -> Result<U> {
    let no_match = || CodecError::UnionDecodeFailure {
        field: field.to_string(),
        expected: U::probe_keys(),
    };

    let Value::Object(object) = value else {
        return Err(no_match());
    };
    let reader = ObjectReader::new(object, options);

    for variant in U::VARIANTS {
        if !reader.has(variant.key) {
            continue;
        }
        if options.strict_types {
            if let Some(actual) = type_of(object) {
                if actual != variant.nsid {
                    tracing::trace!(
                        field,
                        candidate = variant.nsid,
                        actual,
                        "skipping candidate on $type mismatch"
                    );
                    continue;
                }
            }
        }

        match (variant.decode)(&reader) {
            Ok(decoded) => {
                tracing::trace!(field, variant = variant.nsid, "union variant selected");
                return Ok(decoded);
            }
            Err(e) => {
                tracing::trace!(
                    field,
                    candidate = variant.nsid,
                    error = %e,
                    "union candidate rejected"
                );
            }
        }
    }

    Err(no_match())
}

/// Encode the selected variant of a union, tagged with its discriminant
pub fn encode_union<U: LexUnion>(value: &U) -> Result<Value> {
    let variant = value.variant();
    let mut writer = ObjectWriter::tagged(variant.nsid);
    value.encode_payload(&mut writer)?;
    debug_assert!(
        writer.contains(variant.key),
        "variant {} must write its wire key '{}'",
        variant.nsid,
        variant.key
    );
    Ok(writer.into_value())
}

//! Lexicon record codec
//!
//! This module implements the mapping between in-memory lexicon records and
//! their wire JSON: type discriminants, union discrimination, key renames,
//! optional-field omission and protocol size bounds.
//!
//! Reference: <https://atproto.com/specs/lexicon>
//!
//! # Overview
//!
//! - [`truncate`]: grapheme-aware truncation
//! - [`constraints`]: declared bounds applied at encode time
//! - [`tagged`]: the `$type` discriminant and the [`Tagged`] envelope
//! - [`union`]: ordered-probe decoding of polymorphic fields
//! - [`object`]: the field-level writer/reader every record is built on
//! - [`record`]: record encode/decode and [`DecodeOptions`]
//! - [`formats`]: datetime formatting and the injected clock
//!
//! Every operation here is a pure, synchronous transformation with no shared
//! state; the codec can be used from any number of threads at once.

pub mod constraints;
pub mod error;
pub mod formats;
pub mod object;
pub mod record;
pub mod tagged;
pub mod truncate;
pub mod union;

// Re-export commonly used types
pub use constraints::{ArrayConstraints, StringConstraints};
pub use error::{CodecError, Result};
pub use formats::{format_datetime, parse_datetime, wire_precision, Clock, FixedClock, SystemClock};
pub use object::{object_from_value, object_to_value, LexObject, ObjectReader, ObjectWriter};
pub use record::{decode_record, decode_record_with, encode_record, DecodeOptions, LexRecord};
pub use tagged::{LexiconType, Tagged, TYPE_KEY};
pub use truncate::{grapheme_len, truncate_graphemes, truncate_items};
pub use union::{decode_union, encode_union, LexUnion, UnionVariant};

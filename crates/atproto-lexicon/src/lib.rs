//! AT Protocol Lexicon Codec
//!
//! This crate maps AT Protocol lexicon records to and from their wire JSON:
//! type discriminants, polymorphic (union) fields, key renames, optional-field
//! omission and protocol size limits. It also decodes XRPC error bodies and
//! publishes records through a caller-supplied transport.
//!
//! ```rust
//! use atproto_lexicon::lexicon::{decode_record, encode_record, FixedClock};
//! use atproto_lexicon::records::Post;
//!
//! let post = Post::now("Hello from Rust", &FixedClock::from_millis(1_704_067_200_000))
//!     .with_languages(["en"]);
//! let bytes = encode_record(&post).unwrap();
//! let decoded: Post = decode_record(&bytes).unwrap();
//! assert_eq!(decoded.languages, Some(vec!["en".to_string()]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lexicon;
pub mod records;
pub mod repo;
pub mod types;
pub mod xrpc;

#[cfg(test)]
mod test_utils;

pub use lexicon::{
    decode_record, decode_record_with, encode_record, CodecError, DecodeOptions, LexRecord,
};
pub use records::Post;
pub use repo::{PublishError, PublisherConfig, RecordPublisher, RecordTransport};
pub use types::{BlobRef, ReplyRef, StrongRef};
pub use xrpc::{decode_error, ProtocolError, ProtocolErrorKind};

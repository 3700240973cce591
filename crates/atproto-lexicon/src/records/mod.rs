//! Record and document schemas built on the lexicon codec
//!
//! Each type lists its wire fields once, in its `LexObject` impl; records add a
//! `$type` through [`LexRecord`](crate::lexicon::LexRecord).

pub mod embed;
pub mod facet;
pub mod feed;
pub mod graph;
pub mod label;
pub mod post;
pub mod server;

pub use embed::{
    Embed, EmbedImage, External, ExternalEmbed, ImagesEmbed, Media, RecordEmbed,
    RecordWithMediaEmbed,
};
pub use facet::{ByteSlice, Facet, FacetFeature, Link, Mention, Tag};
pub use feed::{Like, Repost};
pub use graph::Follow;
pub use label::{Labels, SelfLabel, SelfLabels};
pub use post::Post;
pub use server::{ServerContact, ServerDescription, ServerLinks};

//! Rich text facets (`app.bsky.richtext.facet`)
//!
//! A facet annotates a byte range of post text with one or more features.

use crate::lexicon::{
    LexObject, LexUnion, LexiconType, ObjectReader, ObjectWriter, Result, UnionVariant,
};
use serde::{Deserialize, Serialize};

/// Byte range index for facet positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByteSlice {
    /// Start position in UTF-8 bytes
    pub byte_start: usize,
    /// End position in UTF-8 bytes (exclusive)
    pub byte_end: usize,
}

/// Mention feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// DID of the mentioned account
    pub did: String,
}

impl LexiconType for Mention {
    const NSID: &'static str = "app.bsky.richtext.facet#mention";
}

/// Link feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// URI of the link
    pub uri: String,
}

impl LexiconType for Link {
    const NSID: &'static str = "app.bsky.richtext.facet#link";
}

/// Tag (hashtag) feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name without the # symbol
    pub tag: String,
}

impl LexiconType for Tag {
    const NSID: &'static str = "app.bsky.richtext.facet#tag";
}

/// Facet feature union
///
/// Probe order: mention (`did`), link (`uri`), tag (`tag`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetFeature {
    /// Mention feature
    Mention(Mention),
    /// Link feature
    Link(Link),
    /// Tag (hashtag) feature
    Tag(Tag),
}

impl FacetFeature {
    fn decode_mention(r: &ObjectReader<'_>) -> Result<Self> {
        r.flattened().map(FacetFeature::Mention)
    }

    fn decode_link(r: &ObjectReader<'_>) -> Result<Self> {
        r.flattened().map(FacetFeature::Link)
    }

    fn decode_tag(r: &ObjectReader<'_>) -> Result<Self> {
        r.flattened().map(FacetFeature::Tag)
    }
}

impl LexUnion for FacetFeature {
    const VARIANTS: &'static [UnionVariant<Self>] = &[
        UnionVariant {
            key: "did",
            nsid: Mention::NSID,
            decode: FacetFeature::decode_mention,
        },
        UnionVariant {
            key: "uri",
            nsid: Link::NSID,
            decode: FacetFeature::decode_link,
        },
        UnionVariant {
            key: "tag",
            nsid: Tag::NSID,
            decode: FacetFeature::decode_tag,
        },
    ];

    fn variant(&self) -> &'static UnionVariant<Self> {
        match self {
            FacetFeature::Mention(_) => &Self::VARIANTS[0],
            FacetFeature::Link(_) => &Self::VARIANTS[1],
            FacetFeature::Tag(_) => &Self::VARIANTS[2],
        }
    }

    fn encode_payload(&self, w: &mut ObjectWriter) -> Result<()> {
        match self {
            FacetFeature::Mention(mention) => w.flatten(mention),
            FacetFeature::Link(link) => w.flatten(link),
            FacetFeature::Tag(tag) => w.flatten(tag),
        }
    }
}

/// A span of text with special meaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    /// Byte range of the facet in the text
    pub index: ByteSlice,
    /// Features associated with this facet
    pub features: Vec<FacetFeature>,
}

impl Facet {
    /// Facet covering `byte_start..byte_end` with a single feature
    pub fn new(byte_start: usize, byte_end: usize, feature: FacetFeature) -> Self {
        Self {
            index: ByteSlice { byte_start, byte_end },
            features: vec![feature],
        }
    }
}

impl LexObject for Facet {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.required("index", &self.index)?;
        w.unions("features", &self.features)
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(Facet {
            index: r.required("index")?,
            features: r.unions("features")?,
        })
    }
}

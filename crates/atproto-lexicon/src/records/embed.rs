//! Post embeds (`app.bsky.embed.*`)
//!
//! The `embed` field of a post is a union of images, an external link card, a
//! quoted record, or a quoted record together with media.

use crate::lexicon::{
    ArrayConstraints, LexObject, LexUnion, LexiconType, ObjectReader, ObjectWriter, Result,
    UnionVariant,
};
use crate::types::{AspectRatio, BlobRef, StrongRef};

/// Image in an images embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedImage {
    /// Blob reference to the image
    pub image: BlobRef,
    /// Alt text for accessibility
    pub alt: String,
    /// Aspect ratio
    pub aspect_ratio: Option<AspectRatio>,
}

impl EmbedImage {
    /// Create an image with alt text
    pub fn new(image: BlobRef, alt: impl Into<String>) -> Self {
        Self {
            image,
            alt: alt.into(),
            aspect_ratio: None,
        }
    }

    /// Set the aspect ratio
    pub fn with_aspect_ratio(mut self, width: u32, height: u32) -> Self {
        self.aspect_ratio = Some(AspectRatio { width, height });
        self
    }
}

impl LexObject for EmbedImage {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        self.image.write(w, "image")?;
        w.required("alt", &self.alt)?;
        w.optional("aspectRatio", self.aspect_ratio.as_ref())
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(EmbedImage {
            image: BlobRef::read(r, "image")?,
            alt: r.required("alt")?,
            aspect_ratio: r.optional("aspectRatio")?,
        })
    }
}

/// Images embed (`app.bsky.embed.images`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagesEmbed {
    /// The images; at most [`ImagesEmbed::MAX_IMAGES`] are written
    pub images: Vec<EmbedImage>,
}

impl ImagesEmbed {
    /// Maximum number of images per embed
    pub const MAX_IMAGES: usize = 4;

    /// Create a new images embed
    pub fn new(images: Vec<EmbedImage>) -> Self {
        Self { images }
    }

    fn fits_limits(&self) -> bool {
        self.images.len() <= Self::MAX_IMAGES
    }
}

impl LexiconType for ImagesEmbed {
    const NSID: &'static str = "app.bsky.embed.images";
}

impl LexObject for ImagesEmbed {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.objects("images", &self.images, ArrayConstraints::items(Self::MAX_IMAGES))
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(ImagesEmbed {
            images: r.objects("images")?,
        })
    }
}

/// Link card target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct External {
    /// URI of the linked page
    pub uri: String,
    /// Page title
    pub title: String,
    /// Page description
    pub description: String,
    /// Thumbnail image
    pub thumb: Option<BlobRef>,
}

impl LexObject for External {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.required("uri", &self.uri)?;
        w.required("title", &self.title)?;
        w.required("description", &self.description)?;
        if let Some(thumb) = &self.thumb {
            thumb.write(w, "thumb")?;
        }
        Ok(())
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(External {
            uri: r.required("uri")?,
            title: r.required("title")?,
            description: r.required("description")?,
            thumb: BlobRef::read_optional(r, "thumb")?,
        })
    }
}

/// External link card embed (`app.bsky.embed.external`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEmbed {
    /// The linked page
    pub external: External,
}

impl ExternalEmbed {
    /// Create a link card without a thumbnail
    pub fn new(
        uri: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            external: External {
                uri: uri.into(),
                title: title.into(),
                description: description.into(),
                thumb: None,
            },
        }
    }
}

impl LexiconType for ExternalEmbed {
    const NSID: &'static str = "app.bsky.embed.external";
}

impl LexObject for ExternalEmbed {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.object("external", &self.external)
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(ExternalEmbed {
            external: r.object("external")?,
        })
    }
}

/// Quoted record embed (`app.bsky.embed.record`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEmbed {
    /// The quoted record
    pub record: StrongRef,
}

impl LexiconType for RecordEmbed {
    const NSID: &'static str = "app.bsky.embed.record";
}

impl LexObject for RecordEmbed {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.object("record", &self.record)
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(RecordEmbed {
            record: r.object("record")?,
        })
    }
}

/// Media half of a record-with-media embed
///
/// Probe order: images, external.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    /// Images
    Images(ImagesEmbed),
    /// External link card
    External(ExternalEmbed),
}

impl Media {
    fn decode_images(r: &ObjectReader<'_>) -> Result<Self> {
        ImagesEmbed::decode_fields(r).map(Media::Images)
    }

    fn decode_external(r: &ObjectReader<'_>) -> Result<Self> {
        ExternalEmbed::decode_fields(r).map(Media::External)
    }
}

impl LexUnion for Media {
    const VARIANTS: &'static [UnionVariant<Self>] = &[
        UnionVariant {
            key: "images",
            nsid: ImagesEmbed::NSID,
            decode: Media::decode_images,
        },
        UnionVariant {
            key: "external",
            nsid: ExternalEmbed::NSID,
            decode: Media::decode_external,
        },
    ];

    fn variant(&self) -> &'static UnionVariant<Self> {
        match self {
            Media::Images(_) => &Self::VARIANTS[0],
            Media::External(_) => &Self::VARIANTS[1],
        }
    }

    fn encode_payload(&self, w: &mut ObjectWriter) -> Result<()> {
        match self {
            Media::Images(images) => images.encode_fields(w),
            Media::External(external) => external.encode_fields(w),
        }
    }
}

/// Quoted record plus media (`app.bsky.embed.recordWithMedia`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordWithMediaEmbed {
    /// The quoted record
    pub record: RecordEmbed,
    /// Attached media
    pub media: Media,
}

impl LexiconType for RecordWithMediaEmbed {
    const NSID: &'static str = "app.bsky.embed.recordWithMedia";
}

impl LexObject for RecordWithMediaEmbed {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.tagged_object("record", &self.record)?;
        w.union("media", &self.media)
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(RecordWithMediaEmbed {
            record: r.tagged_object("record")?,
            media: r.union("media")?,
        })
    }
}

/// Post embed union
///
/// Probe order: images (`images`), external (`external`), record (`record`),
/// record-with-media (`media`). A record-with-media body also has a `record`
/// key, but its value nests the strong reference one level down, so the
/// record candidate rejects it structurally and probing falls through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    /// Images
    Images(ImagesEmbed),
    /// External link card
    External(ExternalEmbed),
    /// Quoted record
    Record(RecordEmbed),
    /// Quoted record with media
    RecordWithMedia(RecordWithMediaEmbed),
}

impl Embed {
    fn decode_images(r: &ObjectReader<'_>) -> Result<Self> {
        ImagesEmbed::decode_fields(r).map(Embed::Images)
    }

    fn decode_external(r: &ObjectReader<'_>) -> Result<Self> {
        ExternalEmbed::decode_fields(r).map(Embed::External)
    }

    fn decode_record(r: &ObjectReader<'_>) -> Result<Self> {
        RecordEmbed::decode_fields(r).map(Embed::Record)
    }

    fn decode_record_with_media(r: &ObjectReader<'_>) -> Result<Self> {
        RecordWithMediaEmbed::decode_fields(r).map(Embed::RecordWithMedia)
    }

    /// Quote a record
    pub fn quote(record: StrongRef) -> Self {
        Embed::Record(RecordEmbed { record })
    }

    /// Whether encoding this embed keeps every image
    pub fn fits_limits(&self) -> bool {
        match self {
            Embed::Images(images)
            | Embed::RecordWithMedia(RecordWithMediaEmbed {
                media: Media::Images(images),
                ..
            }) => images.fits_limits(),
            _ => true,
        }
    }
}

impl LexUnion for Embed {
    const VARIANTS: &'static [UnionVariant<Self>] = &[
        UnionVariant {
            key: "images",
            nsid: ImagesEmbed::NSID,
            decode: Embed::decode_images,
        },
        UnionVariant {
            key: "external",
            nsid: ExternalEmbed::NSID,
            decode: Embed::decode_external,
        },
        UnionVariant {
            key: "record",
            nsid: RecordEmbed::NSID,
            decode: Embed::decode_record,
        },
        UnionVariant {
            key: "media",
            nsid: RecordWithMediaEmbed::NSID,
            decode: Embed::decode_record_with_media,
        },
    ];

    fn variant(&self) -> &'static UnionVariant<Self> {
        match self {
            Embed::Images(_) => &Self::VARIANTS[0],
            Embed::External(_) => &Self::VARIANTS[1],
            Embed::Record(_) => &Self::VARIANTS[2],
            Embed::RecordWithMedia(_) => &Self::VARIANTS[3],
        }
    }

    fn encode_payload(&self, w: &mut ObjectWriter) -> Result<()> {
        match self {
            Embed::Images(images) => images.encode_fields(w),
            Embed::External(external) => external.encode_fields(w),
            Embed::Record(record) => record.encode_fields(w),
            Embed::RecordWithMedia(record_with_media) => record_with_media.encode_fields(w),
        }
    }
}

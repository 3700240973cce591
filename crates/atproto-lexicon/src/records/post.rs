//! Post record (`app.bsky.feed.post`)
//!
//! Wire order: `$type`, `text`, `facets`, `reply`, `embed`, `langs`, `labels`,
//! `tags`, `createdAt`. Bounds are applied when the post is encoded; a `Post`
//! built or decoded with over-limit values keeps them in memory.

use super::embed::Embed;
use super::facet::Facet;
use super::label::Labels;
use crate::lexicon::{
    grapheme_len, wire_precision, ArrayConstraints, Clock, LexObject, LexRecord, LexiconType,
    ObjectReader, ObjectWriter, Result, StringConstraints,
};
use crate::types::ReplyRef;
use chrono::{DateTime, Utc};

/// A post record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Post text, bounded to [`Post::MAX_TEXT_GRAPHEMES`] on the wire
    pub text: String,
    /// Rich text annotations
    pub facets: Option<Vec<Facet>>,
    /// Thread position, when this post is a reply
    pub reply: Option<ReplyRef>,
    /// Attached embed
    pub embed: Option<Embed>,
    /// BCP-47 language codes (`langs` on the wire)
    pub languages: Option<Vec<String>>,
    /// Self-applied labels
    pub labels: Option<Labels>,
    /// Additional hashtags not present in the text
    pub tags: Option<Vec<String>>,
    /// Client-declared creation time, held at millisecond precision
    pub created_at: DateTime<Utc>,
}

impl LexiconType for Post {
    const NSID: &'static str = "app.bsky.feed.post";
}

impl Post {
    /// Maximum text length in graphemes
    pub const MAX_TEXT_GRAPHEMES: usize = 300;
    /// Maximum number of language codes
    pub const MAX_LANGS: usize = 3;
    /// Maximum number of tags
    pub const MAX_TAGS: usize = 8;
    /// Maximum length of each tag in graphemes
    pub const MAX_TAG_GRAPHEMES: usize = 64;

    const TEXT: StringConstraints = StringConstraints::graphemes(Self::MAX_TEXT_GRAPHEMES);
    const LANGS: ArrayConstraints = ArrayConstraints::items(Self::MAX_LANGS);
    const TAG: StringConstraints = StringConstraints::graphemes(Self::MAX_TAG_GRAPHEMES);
    const TAGS: ArrayConstraints = ArrayConstraints::items(Self::MAX_TAGS);

    /// Create a post with an explicit creation time
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            facets: None,
            reply: None,
            embed: None,
            languages: None,
            labels: None,
            tags: None,
            created_at: wire_precision(created_at),
        }
    }

    /// Create a post timestamped by `clock`
    pub fn now(text: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(text, clock.now())
    }

    /// Set the rich text facets
    pub fn with_facets(mut self, facets: Vec<Facet>) -> Self {
        self.facets = Some(facets);
        self
    }

    /// Make this post a reply
    pub fn with_reply(mut self, reply: ReplyRef) -> Self {
        self.reply = Some(reply);
        self
    }

    /// Attach an embed
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    /// Set the language codes
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Set self-labels
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Whether this post is a reply
    pub fn is_reply(&self) -> bool {
        self.reply.is_some()
    }

    /// Text length in graphemes
    pub fn text_graphemes(&self) -> usize {
        grapheme_len(&self.text)
    }

    /// Whether every bounded field already fits, so encoding loses nothing
    pub fn fits_limits(&self) -> bool {
        let langs_fit = self
            .languages
            .as_ref()
            .map_or(true, |langs| langs.len() <= Self::MAX_LANGS);
        let tags_fit = self.tags.as_ref().map_or(true, |tags| {
            tags.len() <= Self::MAX_TAGS
                && tags
                    .iter()
                    .all(|tag| grapheme_len(tag) <= Self::MAX_TAG_GRAPHEMES)
        });
        let embed_fits = self.embed.as_ref().map_or(true, Embed::fits_limits);
        let labels_fit = self.labels.as_ref().map_or(true, Labels::fits_limits);

        self.text_graphemes() <= Self::MAX_TEXT_GRAPHEMES
            && langs_fit
            && tags_fit
            && embed_fits
            && labels_fit
    }
}

impl LexObject for Post {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.text("text", &self.text, Self::TEXT);
        if let Some(facets) = &self.facets {
            w.objects("facets", facets, ArrayConstraints::UNBOUNDED)?;
        }
        w.optional_object("reply", self.reply.as_ref())?;
        w.optional_union("embed", self.embed.as_ref())?;
        w.optional_strings(
            "langs",
            self.languages.as_deref(),
            StringConstraints::UNBOUNDED,
            Self::LANGS,
        );
        w.optional_union("labels", self.labels.as_ref())?;
        w.optional_strings("tags", self.tags.as_deref(), Self::TAG, Self::TAGS);
        w.datetime("createdAt", &self.created_at)?;
        Ok(())
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(Post {
            text: r.required("text")?,
            facets: r.optional_objects("facets")?,
            reply: r.optional_object("reply")?,
            embed: r.optional_union("embed")?,
            languages: r.optional("langs")?,
            labels: r.optional_union("labels")?,
            tags: r.optional("tags")?,
            created_at: r.datetime("createdAt")?,
        })
    }
}

impl LexRecord for Post {}

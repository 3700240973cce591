//! Like and repost records (`app.bsky.feed.like`, `app.bsky.feed.repost`)

use crate::lexicon::{
    wire_precision, Clock, LexObject, LexRecord, LexiconType, ObjectReader, ObjectWriter, Result,
};
use crate::types::StrongRef;
use chrono::{DateTime, Utc};

/// A like of another record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    /// The liked record
    pub subject: StrongRef,
    /// Client-declared creation time, held at millisecond precision
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Like `subject` at an explicit time
    pub fn new(subject: StrongRef, created_at: DateTime<Utc>) -> Self {
        Self {
            subject,
            created_at: wire_precision(created_at),
        }
    }

    /// Like `subject` at the clock's current time
    pub fn now(subject: StrongRef, clock: &impl Clock) -> Self {
        Self::new(subject, clock.now())
    }
}

impl LexiconType for Like {
    const NSID: &'static str = "app.bsky.feed.like";
}

impl LexObject for Like {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.object("subject", &self.subject)?;
        w.datetime("createdAt", &self.created_at)?;
        Ok(())
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(Like {
            subject: r.object("subject")?,
            created_at: r.datetime("createdAt")?,
        })
    }
}

impl LexRecord for Like {}

/// A repost of another record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repost {
    /// The reposted record
    pub subject: StrongRef,
    /// Client-declared creation time, held at millisecond precision
    pub created_at: DateTime<Utc>,
}

impl Repost {
    /// Repost `subject` at an explicit time
    pub fn new(subject: StrongRef, created_at: DateTime<Utc>) -> Self {
        Self {
            subject,
            created_at: wire_precision(created_at),
        }
    }

    /// Repost `subject` at the clock's current time
    pub fn now(subject: StrongRef, clock: &impl Clock) -> Self {
        Self::new(subject, clock.now())
    }
}

impl LexiconType for Repost {
    const NSID: &'static str = "app.bsky.feed.repost";
}

impl LexObject for Repost {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.object("subject", &self.subject)?;
        w.datetime("createdAt", &self.created_at)?;
        Ok(())
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(Repost {
            subject: r.object("subject")?,
            created_at: r.datetime("createdAt")?,
        })
    }
}

impl LexRecord for Repost {}

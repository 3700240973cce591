//! Social graph records (`app.bsky.graph.*`)

use crate::lexicon::{
    wire_precision, Clock, LexObject, LexRecord, LexiconType, ObjectReader, ObjectWriter, Result,
};
use chrono::{DateTime, Utc};

/// A follow of another account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    /// DID of the followed account
    pub subject: String,
    /// Client-declared creation time, held at millisecond precision
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Follow `subject` at an explicit time
    pub fn new(subject: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            created_at: wire_precision(created_at),
        }
    }

    /// Follow `subject` at the clock's current time
    pub fn now(subject: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(subject, clock.now())
    }
}

impl LexiconType for Follow {
    const NSID: &'static str = "app.bsky.graph.follow";
}

impl LexObject for Follow {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.required("subject", &self.subject)?;
        w.datetime("createdAt", &self.created_at)?;
        Ok(())
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(Follow {
            subject: r.required("subject")?,
            created_at: r.datetime("createdAt")?,
        })
    }
}

impl LexRecord for Follow {}

//! Test utilities and fixtures for lexicon codec tests
//!
//! Stable identifiers, timestamps and sample records shared by the unit tests.

#![allow(dead_code)] // Not every fixture is used by every test module

use crate::lexicon::formats::FixedClock;
use crate::records::Post;
use crate::types::{ReplyRef, StrongRef};
use chrono::{TimeZone, Utc};

/// Test DIDs
pub mod dids {
    /// Alice's DID (PLC method)
    pub fn alice() -> String {
        "did:plc:alice123456789abc".to_string()
    }

    /// Bob's DID (PLC method)
    pub fn bob() -> String {
        "did:plc:bob123456789defg".to_string()
    }

    /// Carol's DID (Web method)
    pub fn carol() -> String {
        "did:web:carol.example.com".to_string()
    }
}

/// Test AT URIs
pub mod uris {
    /// Post URI for Alice
    pub fn alice_post() -> String {
        "at://did:plc:alice123456789abc/app.bsky.feed.post/abc123".to_string()
    }

    /// Reply URI for Bob
    pub fn bob_reply() -> String {
        "at://did:plc:bob123456789defg/app.bsky.feed.post/def456".to_string()
    }

    /// Like record URI
    pub fn like_record() -> String {
        "at://did:plc:alice123456789abc/app.bsky.feed.like/xyz789".to_string()
    }
}

/// Test CIDs
pub mod cids {
    /// CID of Alice's post
    pub fn post() -> String {
        "bafyreibjo4xmgaevkgud7mbifn3dzp4v4lyaui4yvqp3f2bqwtxcjrdqg4".to_string()
    }

    /// CID of Bob's reply
    pub fn reply() -> String {
        "bafyreie5737gdxlw5i64vzichcalba3z2v5n6icifvx5xytvske7mr3hpm".to_string()
    }

    /// CID of an uploaded image blob
    pub fn blob() -> String {
        "bafkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku".to_string()
    }
}

/// 2024-01-01T00:00:00.000Z
pub fn new_year_clock() -> FixedClock {
    FixedClock::from_millis(1_704_067_200_000)
}

/// 2024-01-01T00:00:00.095324525Z, finer than the wire carries
pub fn sub_millisecond_clock() -> FixedClock {
    FixedClock(Utc.timestamp_nanos(1_704_067_200_095_324_525))
}

/// Strong reference to Alice's post
pub fn alice_post_ref() -> StrongRef {
    StrongRef::new(uris::alice_post(), cids::post())
}

/// Reply reference: Bob replying under Alice's thread
pub fn thread_reply_ref() -> ReplyRef {
    ReplyRef::in_thread(alice_post_ref(), StrongRef::new(uris::bob_reply(), cids::reply()))
}

/// A plain text post at the fixed clock
pub fn text_post(text: &str) -> Post {
    Post::now(text, &new_year_clock())
}

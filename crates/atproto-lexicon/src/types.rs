//! Core AT Protocol value types shared across records

use crate::lexicon::{LexObject, LexiconType, ObjectReader, ObjectWriter, Result, Tagged};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strong reference to a record: its AT-URI plus the CID of the exact version
///
/// The codec treats both parts as opaque strings; URI syntax and CID format
/// are the repository layer's business. Two references are equal when both
/// parts match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrongRef {
    /// AT-URI of the record
    pub uri: String,
    /// CID of the record version
    pub cid: String,
}

impl StrongRef {
    /// Create a new strong reference
    pub fn new(uri: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            cid: cid.into(),
        }
    }
}

impl LexiconType for StrongRef {
    const NSID: &'static str = "com.atproto.repo.strongRef";
}

impl LexObject for StrongRef {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.required("uri", &self.uri)?;
        w.required("cid", &self.cid)
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(StrongRef {
            uri: r.required("uri")?,
            cid: r.required("cid")?,
        })
    }
}

impl fmt::Display for StrongRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.uri, self.cid)
    }
}

/// Reply reference containing root and parent posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRef {
    /// Reference to the root post of the thread
    pub root: StrongRef,
    /// Reference to the immediate parent post
    pub parent: StrongRef,
}

impl ReplyRef {
    /// Reply to a top-level post: root and parent are the same
    pub fn to_post(post: StrongRef) -> Self {
        Self {
            root: post.clone(),
            parent: post,
        }
    }

    /// Reply within a thread
    pub fn in_thread(root: StrongRef, parent: StrongRef) -> Self {
        Self { root, parent }
    }

    /// Check if this is a reply to a top-level post
    pub fn is_top_level_reply(&self) -> bool {
        self.root == self.parent
    }
}

impl LexObject for ReplyRef {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.object("root", &self.root)?;
        w.object("parent", &self.parent)
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(ReplyRef {
            root: r.object("root")?,
            parent: r.object("parent")?,
        })
    }
}

/// CID link, `{"$link": "bafy..."}` in JSON
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CidLink {
    /// The CID string
    #[serde(rename = "$link")]
    pub cid: String,
}

impl CidLink {
    /// Create a new CID link
    pub fn new(cid: impl Into<String>) -> Self {
        Self { cid: cid.into() }
    }

    /// Get the CID string
    pub fn as_str(&self) -> &str {
        &self.cid
    }
}

/// Blob reference: metadata about uploaded binary data
///
/// Encoded through [`Tagged`] so the wire form carries `"$type": "blob"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobRef {
    /// CID reference to the blob data
    #[serde(rename = "ref")]
    pub ref_link: CidLink,

    /// MIME type of the blob
    pub mime_type: String,

    /// Size of the blob in bytes
    pub size: u64,
}

impl BlobRef {
    /// Create a new blob reference
    pub fn new(mime_type: impl Into<String>, size: u64, cid: impl Into<String>) -> Self {
        Self {
            ref_link: CidLink::new(cid),
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Write this blob under `key`
    pub(crate) fn write(&self, w: &mut ObjectWriter, key: &str) -> Result<()> {
        w.required(key, &Tagged::new(self))
    }

    /// Read a blob from `key`
    pub(crate) fn read(r: &ObjectReader<'_>, key: &str) -> Result<Self> {
        r.required::<Tagged<BlobRef>>(key).map(Tagged::into_inner)
    }

    /// Read an optional blob from `key`
    pub(crate) fn read_optional(r: &ObjectReader<'_>, key: &str) -> Result<Option<Self>> {
        Ok(r.optional::<Tagged<BlobRef>>(key)?.map(Tagged::into_inner))
    }
}

impl LexiconType for BlobRef {
    const NSID: &'static str = "blob";
}

/// Width/height ratio of an image or video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{object_from_value, object_to_value, CodecError, DecodeOptions};
    use crate::test_utils::{cids, uris};
    use serde_json::json;

    #[test]
    fn test_strong_ref_wire_shape() {
        let strong_ref = StrongRef::new(uris::alice_post(), cids::post());
        let value = object_to_value(&strong_ref).unwrap();
        assert_eq!(value, json!({ "uri": uris::alice_post(), "cid": cids::post() }));
    }

    #[test]
    fn test_strong_ref_equality() {
        let a = StrongRef::new("at://a", "bafy1");
        assert_eq!(a, StrongRef::new("at://a", "bafy1"));
        assert_ne!(a, StrongRef::new("at://a", "bafy2"));
        assert_ne!(a, StrongRef::new("at://b", "bafy1"));
    }

    #[test]
    fn test_strong_ref_is_not_validated() {
        let value = json!({ "uri": "not a uri", "cid": "" });
        let decoded: StrongRef = object_from_value(&value, &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, StrongRef::new("not a uri", ""));
    }

    #[test]
    fn test_strong_ref_missing_cid() {
        let value = json!({ "uri": "at://a" });
        let err = object_from_value::<StrongRef>(&value, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, CodecError::MissingField { ref field } if field == "cid"));
    }

    #[test]
    fn test_reply_ref_error_path() {
        let value = json!({
            "root": { "uri": "at://a", "cid": "bafy1" },
            "parent": { "uri": "at://b" }
        });
        let err = object_from_value::<ReplyRef>(&value, &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.field(), Some("parent.cid"));
    }

    #[test]
    fn test_reply_ref_to_post() {
        let reply = ReplyRef::to_post(StrongRef::new("at://a", "bafy1"));
        assert!(reply.is_top_level_reply());

        let reply = ReplyRef::in_thread(
            StrongRef::new("at://a", "bafy1"),
            StrongRef::new("at://b", "bafy2"),
        );
        assert!(!reply.is_top_level_reply());
    }

    #[test]
    fn test_blob_ref_wire_shape() {
        let blob = BlobRef::new("image/png", 12345, cids::blob());
        let json = serde_json::to_string(&Tagged::new(&blob)).unwrap();
        assert_eq!(
            json,
            format!(
                r#"{{"$type":"blob","ref":{{"$link":"{}"}},"mimeType":"image/png","size":12345}}"#,
                cids::blob()
            )
        );

        let decoded: Tagged<BlobRef> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.into_inner(), blob);
    }

    #[test]
    fn test_strong_ref_display() {
        assert_eq!(StrongRef::new("at://a", "bafy1").to_string(), "at://a@bafy1");
    }
}

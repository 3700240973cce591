//! End-to-end post codec tests
//!
//! Encode and decode full posts through the public API, with wire JSON written
//! out by hand the way a PDS would return it.

use atproto_lexicon::lexicon::{grapheme_len, FixedClock};
use atproto_lexicon::records::{
    Embed, EmbedImage, ExternalEmbed, Facet, FacetFeature, ImagesEmbed, Labels, Like, Link, Media,
    Post,
};
use atproto_lexicon::{
    decode_record, decode_record_with, encode_record, BlobRef, DecodeOptions, ReplyRef, StrongRef,
};
use serde_json::{json, Value};

const POST_URI: &str = "at://did:plc:alice123456789abc/app.bsky.feed.post/3kabc";
const POST_CID: &str = "bafyreibjo4xmgaevkgud7mbifn3dzp4v4lyaui4yvqp3f2bqwtxcjrdqg4";
const BLOB_CID: &str = "bafkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn clock() -> FixedClock {
    FixedClock::from_millis(1_704_067_200_000)
}

fn wire(post: &Post) -> Value {
    serde_json::from_slice(&encode_record(post).unwrap()).unwrap()
}

/// Text over the limit and an overlong tag are clamped on the wire
#[test]
fn test_text_and_tags_truncated_on_encode() {
    init_tracing();

    // thumbs up with a skin tone modifier: two scalars, one grapheme
    let text = "\u{1F44D}\u{1F3FD}".repeat(310);
    let post = Post::now(text, &clock()).with_tags(["a".repeat(70), "b".to_string()]);

    let value = wire(&post);
    let text = value["text"].as_str().unwrap();
    assert_eq!(grapheme_len(text), 300);
    assert_eq!(text.chars().count(), 600);

    let tags = value["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(grapheme_len(tags[0].as_str().unwrap()), 64);
    assert_eq!(tags[1], "b");

    // stored value is untouched
    assert_eq!(grapheme_len(&post.text), 310);
    assert_eq!(post.tags.as_ref().unwrap()[0].len(), 70);
}

/// Five language codes are written as the first three, in order
#[test]
fn test_languages_clamped_to_first_three() {
    let post = Post::now("multilingual", &clock()).with_languages(["en", "es", "fr", "de", "ja"]);
    assert_eq!(wire(&post)["langs"], json!(["en", "es", "fr"]));
}

/// An embed with only an `external` key decodes as external
#[test]
fn test_external_key_selects_external_embed() {
    init_tracing();

    let body = json!({
        "$type": "app.bsky.feed.post",
        "text": "check this out",
        "embed": {
            "$type": "app.bsky.embed.external",
            "external": {
                "uri": "https://example.com/article",
                "title": "Article",
                "description": "An article"
            },
            "alt": "stray",
            "image": { "ref": { "$link": BLOB_CID }, "mimeType": "image/png", "size": 1 }
        },
        "createdAt": "2024-01-01T00:00:00.000Z"
    });
    let post: Post = decode_record(&serde_json::to_vec(&body).unwrap()).unwrap();

    match post.embed {
        Some(Embed::External(embed)) => {
            assert_eq!(embed.external.uri, "https://example.com/article");
            assert_eq!(embed.external.thumb, None);
        }
        other => panic!("expected external embed, got {other:?}"),
    }
}

#[test]
fn test_union_selection_ignores_key_order() {
    let body = json!({
        "createdAt": "2024-01-01T00:00:00Z",
        "embed": {
            "record": { "cid": "bafy1", "uri": "at://x" },
            "$type": "app.bsky.embed.record"
        },
        "text": "q"
    });
    let post: Post = decode_record(&serde_json::to_vec(&body).unwrap()).unwrap();
    assert_eq!(post.embed, Some(Embed::quote(StrongRef::new("at://x", "bafy1"))));
}

#[test]
fn test_reply_with_images_and_labels_round_trip() {
    init_tracing();

    let root = StrongRef::new(POST_URI, POST_CID);
    let parent = StrongRef::new(
        "at://did:plc:bob123456789defg/app.bsky.feed.post/3kdef",
        "bafyparent",
    );
    let image = EmbedImage::new(BlobRef::new("image/jpeg", 48_213, BLOB_CID), "sunset")
        .with_aspect_ratio(16, 9);

    let post = Post::now("replying with a photo https://example.com", &clock())
        .with_reply(ReplyRef::in_thread(root.clone(), parent.clone()))
        .with_embed(Embed::Images(ImagesEmbed::new(vec![image])))
        .with_facets(vec![Facet::new(
            22,
            41,
            FacetFeature::Link(Link { uri: "https://example.com".to_string() }),
        )])
        .with_labels(Labels::self_labels(["graphic-media"]))
        .with_languages(["en"]);
    assert!(post.fits_limits());

    let bytes = encode_record(&post).unwrap();
    let decoded: Post = decode_record(&bytes).unwrap();
    assert_eq!(decoded, post);

    let reply = decoded.reply.unwrap();
    assert_eq!(reply.root, root);
    assert_eq!(reply.parent, parent);
    assert!(!reply.is_top_level_reply());
}

#[test]
fn test_record_with_media_from_wire() {
    let body = json!({
        "$type": "app.bsky.feed.post",
        "text": "quote with pictures",
        "embed": {
            "$type": "app.bsky.embed.recordWithMedia",
            "record": {
                "$type": "app.bsky.embed.record",
                "record": { "uri": POST_URI, "cid": POST_CID }
            },
            "media": {
                "$type": "app.bsky.embed.images",
                "images": [{
                    "alt": "",
                    "image": {
                        "$type": "blob",
                        "ref": { "$link": BLOB_CID },
                        "mimeType": "image/webp",
                        "size": 1024
                    }
                }]
            }
        },
        "createdAt": "2024-01-01T00:00:00.000Z"
    });
    let bytes = serde_json::to_vec(&body).unwrap();
    let post: Post = decode_record(&bytes).unwrap();

    let Some(Embed::RecordWithMedia(embed)) = &post.embed else {
        panic!("expected recordWithMedia, got {:?}", post.embed);
    };
    assert_eq!(embed.record.record, StrongRef::new(POST_URI, POST_CID));
    let Media::Images(images) = &embed.media else {
        panic!("expected images media");
    };
    assert_eq!(images.images[0].image.mime_type, "image/webp");

    // re-encoding reproduces the document
    assert_eq!(wire(&post), body);
}

#[test]
fn test_over_limit_record_is_stable_after_first_encode() {
    let post = Post::now("x".repeat(500), &clock())
        .with_languages(["a", "b", "c", "d"])
        .with_tags((0..20).map(|i| format!("{i}").repeat(100)))
        .with_embed(Embed::External(ExternalEmbed::new("https://example.com", "t", "d")));

    let first = encode_record(&post).unwrap();
    let decoded: Post = decode_record(&first).unwrap();
    assert!(decoded.fits_limits());
    assert_eq!(encode_record(&decoded).unwrap(), first);
}

#[test]
fn test_strict_decoding_of_foreign_record() {
    let like = Like::now(StrongRef::new(POST_URI, POST_CID), &clock());
    let bytes = encode_record(&like).unwrap();

    // a like body has no text, so decoding it as a post fails either way
    assert!(decode_record::<Post>(&bytes).is_err());

    let strict = DecodeOptions::strict();
    let decoded: Like = decode_record_with(&bytes, &strict).unwrap();
    assert_eq!(decoded, like);
}

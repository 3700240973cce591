//! Property tests for truncation and the record codec

use atproto_lexicon::lexicon::{grapheme_len, truncate_graphemes, truncate_items, FixedClock};
use atproto_lexicon::records::{Embed, Labels, Post, SelfLabels};
use atproto_lexicon::{decode_record, encode_record, StrongRef};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

/// Strings mixing ASCII, combining marks, ZWJ emoji sequences and flags
fn text() -> impl Strategy<Value = String> {
    text_of(40)
}

fn text_of(max_pieces: usize) -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-z ]{1,4}".prop_map(String::from),
        Just("e\u{0301}".to_string()),
        Just("\u{1F469}\u{200D}\u{1F4BB}".to_string()),
        Just("\u{1F1EF}\u{1F1F5}".to_string()),
        Just("\u{D55C}".to_string()),
        any::<char>().prop_map(String::from),
    ];
    prop::collection::vec(piece, 0..max_pieces).prop_map(|pieces| pieces.concat())
}

fn short_strings(max_len: usize, max_items: usize) -> impl Strategy<Value = Vec<String>> {
    let item = proptest::string::string_regex(&format!("[a-z]{{1,{max_len}}}")).unwrap();
    prop::collection::vec(item, 0..=max_items)
}

/// Nanosecond instants between 1970 and 2100, finer than the wire carries
fn clock() -> impl Strategy<Value = FixedClock> {
    (0i64..=4_102_444_800_000_000_000).prop_map(|nanos| FixedClock(Utc.timestamp_nanos(nanos)))
}

fn labels(max_values: usize) -> impl Strategy<Value = Option<Labels>> {
    prop::option::of(short_strings(12, max_values).prop_map(Labels::self_labels))
}

fn embed() -> impl Strategy<Value = Option<Embed>> {
    prop::option::of(("[a-z]{1,8}", "[a-z0-9]{1,8}").prop_map(|(path, cid)| {
        Embed::quote(StrongRef::new(format!("at://did:plc:x/app.bsky.feed.post/{path}"), cid))
    }))
}

/// Size knobs for generated posts
#[derive(Debug, Clone, Copy)]
struct Sizes {
    text_pieces: usize,
    langs: usize,
    tag_len: usize,
    tags: usize,
    labels: usize,
}

/// Every bounded field stays within its limit
const WITHIN_LIMITS: Sizes = Sizes {
    text_pieces: 40,
    langs: Post::MAX_LANGS,
    tag_len: Post::MAX_TAG_GRAPHEMES,
    tags: Post::MAX_TAGS,
    labels: SelfLabels::MAX_VALUES,
};

/// Bounded fields may go well past their limits
const ANY_SIZE: Sizes = Sizes {
    text_pieces: 400,
    langs: 6,
    tag_len: 80,
    tags: 12,
    labels: 12,
};

fn post(sizes: Sizes) -> impl Strategy<Value = Post> {
    (
        text_of(sizes.text_pieces),
        clock(),
        prop::option::of(short_strings(4, sizes.langs)),
        prop::option::of(short_strings(sizes.tag_len, sizes.tags)),
        labels(sizes.labels),
        embed(),
    )
        .prop_map(|(text, clock, languages, tags, labels, embed)| {
            let mut post = Post::now(text, &clock);
            post.languages = languages;
            post.tags = tags;
            post.labels = labels;
            post.embed = embed;
            post
        })
}

fn boundaries(s: &str) -> Vec<usize> {
    s.grapheme_indices(true).map(|(i, _)| i).collect()
}

proptest! {
    #[test]
    fn truncation_length_is_min(s in text(), n in 0usize..60) {
        let truncated = truncate_graphemes(&s, n);
        prop_assert_eq!(grapheme_len(&truncated), grapheme_len(&s).min(n));
        if grapheme_len(&s) <= n {
            prop_assert_eq!(truncated.as_ref(), s.as_str());
        }
    }

    #[test]
    fn truncation_never_splits_a_cluster(s in text(), n in 0usize..60) {
        let truncated = truncate_graphemes(&s, n);
        prop_assert!(s.starts_with(truncated.as_ref()));

        let original = boundaries(&s);
        for boundary in boundaries(&truncated) {
            prop_assert!(original.contains(&boundary));
        }
        prop_assert!(truncated.len() == s.len() || original.contains(&truncated.len()));
    }

    #[test]
    fn item_truncation_keeps_prefix(
        items in prop::collection::vec(any::<u16>(), 0..20),
        n in 0usize..25,
    ) {
        let kept = truncate_items(&items, n);
        prop_assert_eq!(kept.len(), items.len().min(n));
        prop_assert_eq!(kept, &items[..kept.len()]);
    }

    #[test]
    fn round_trip_within_limits(post in post(WITHIN_LIMITS)) {
        prop_assert!(post.fits_limits());
        let decoded: Post = decode_record(&encode_record(&post).unwrap()).unwrap();
        prop_assert_eq!(decoded, post);
    }

    #[test]
    fn encode_is_idempotent(post in post(ANY_SIZE)) {
        let first = encode_record(&post).unwrap();
        let decoded: Post = decode_record(&first).unwrap();
        prop_assert!(decoded.fits_limits());
        prop_assert_eq!(encode_record(&decoded).unwrap(), first);
    }
}

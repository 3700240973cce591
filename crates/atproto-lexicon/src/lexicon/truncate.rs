//! Grapheme-aware truncation
//!
//! Lexicon string limits that matter to users (`maxGraphemes`) are expressed in
//! user-perceived characters, so a family emoji or an `e` followed by two
//! combining accents counts as one unit. These helpers cut values down to a
//! limit without ever splitting a grapheme cluster.
//!
//! # Example
//!
//! ```rust
//! use atproto_lexicon::lexicon::truncate::{grapheme_len, truncate_graphemes};
//!
//! let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
//! let text = format!("h\u{00E9}llo {family}!");
//! assert_eq!(grapheme_len(&text), 8);
//! assert_eq!(truncate_graphemes(&text, 7), format!("h\u{00E9}llo {family}"));
//! ```

use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// Count the extended grapheme clusters in `value`
pub fn grapheme_len(value: &str) -> usize {
    value.graphemes(true).count()
}

/// Truncate `value` to at most `max_graphemes` grapheme clusters
///
/// Returns the input borrowed and untouched when it already fits. Otherwise
/// returns the longest prefix holding exactly `max_graphemes` clusters.
pub fn truncate_graphemes(value: &str, max_graphemes: usize) -> Cow<'_, str> {
    // Every cluster is at least one byte.
    if value.len() <= max_graphemes {
        return Cow::Borrowed(value);
    }

    match value.grapheme_indices(true).nth(max_graphemes) {
        Some((cut, _)) => Cow::Owned(value[..cut].to_string()),
        None => Cow::Borrowed(value),
    }
}

/// Keep the first `max_items` items of `items`, in order
pub fn truncate_items<T>(items: &[T], max_items: usize) -> &[T] {
    &items[..items.len().min(max_items)]
}

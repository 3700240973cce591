//! Declared field bounds for lexicon records
//!
//! A bound describes the protocol maximum for a field. It is applied to the
//! *output* of an encode, never to the stored value: a record may hold a value
//! that is over the limit, and decoding never rejects one. The wire format is
//! where the limit is enforced, and receivers have to tolerate older or foreign
//! data written before a limit changed.

use super::truncate::{grapheme_len, truncate_graphemes, truncate_items};
use std::borrow::Cow;

/// Bounds for string fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringConstraints {
    /// Maximum length in Unicode grapheme clusters
    pub max_graphemes: Option<usize>,
}

impl StringConstraints {
    /// No bound
    pub const UNBOUNDED: Self = Self { max_graphemes: None };

    /// Bound a string to `max` grapheme clusters
    pub const fn graphemes(max: usize) -> Self {
        Self { max_graphemes: Some(max) }
    }

    /// Apply the bound, borrowing the input when it already fits
    pub fn apply<'a>(&self, field: &str, value: &'a str) -> Cow<'a, str> {
        let Some(max) = self.max_graphemes else {
            return Cow::Borrowed(value);
        };

        let clamped = truncate_graphemes(value, max);
        if let Cow::Owned(_) = clamped {
            tracing::debug!(
                field,
                graphemes = grapheme_len(value),
                max,
                "truncating bounded string on encode"
            );
        }
        clamped
    }
}

/// Bounds for array fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArrayConstraints {
    /// Maximum number of items
    pub max_length: Option<usize>,
}

impl ArrayConstraints {
    /// No bound
    pub const UNBOUNDED: Self = Self { max_length: None };

    /// Bound an array to `max` items
    pub const fn items(max: usize) -> Self {
        Self { max_length: Some(max) }
    }

    /// Apply the bound, keeping the leading items in order
    pub fn apply<'a, T>(&self, field: &str, items: &'a [T]) -> &'a [T] {
        match self.max_length {
            Some(max) if items.len() > max => {
                tracing::debug!(
                    field,
                    items = items.len(),
                    max,
                    "truncating bounded array on encode"
                );
                truncate_items(items, max)
            }
            _ => items,
        }
    }
}

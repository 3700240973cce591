//! Self-applied content labels (`com.atproto.label.defs#selfLabels`)

use crate::lexicon::{
    ArrayConstraints, LexObject, LexUnion, LexiconType, ObjectReader, ObjectWriter, Result,
    UnionVariant,
};
use serde::{Deserialize, Serialize};

/// A single label value set by the author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfLabel {
    /// Label value (e.g. `nudity`, `graphic-media`)
    pub val: String,
}

impl SelfLabel {
    /// Create a label
    pub fn new(val: impl Into<String>) -> Self {
        Self { val: val.into() }
    }
}

/// Labels the author applied to their own record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfLabels {
    /// Label values; at most [`SelfLabels::MAX_VALUES`] are written
    pub values: Vec<SelfLabel>,
}

impl SelfLabels {
    /// Maximum number of self-labels
    pub const MAX_VALUES: usize = 10;

    /// Build from label values
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(SelfLabel::new).collect(),
        }
    }

    /// Whether a label value is present
    pub fn contains(&self, val: &str) -> bool {
        self.values.iter().any(|label| label.val == val)
    }
}

impl LexiconType for SelfLabels {
    const NSID: &'static str = "com.atproto.label.defs#selfLabels";
}

impl LexObject for SelfLabels {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        let values = ArrayConstraints::items(Self::MAX_VALUES).apply("values", &self.values);
        w.required("values", values)
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(SelfLabels {
            values: r.required("values")?,
        })
    }
}

/// Record labels union
///
/// Only one variant exists today; the field is still a union so that other
/// label sources can be added without changing the record shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Labels {
    /// Self-applied labels
    SelfLabels(SelfLabels),
}

impl Labels {
    fn decode_self_labels(r: &ObjectReader<'_>) -> Result<Self> {
        SelfLabels::decode_fields(r).map(Labels::SelfLabels)
    }

    /// Self-labels from values
    pub fn self_labels<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Labels::SelfLabels(SelfLabels::new(values))
    }

    /// Whether encoding these labels keeps every value
    pub fn fits_limits(&self) -> bool {
        match self {
            Labels::SelfLabels(labels) => labels.values.len() <= SelfLabels::MAX_VALUES,
        }
    }
}

impl LexUnion for Labels {
    const VARIANTS: &'static [UnionVariant<Self>] = &[UnionVariant {
        key: "values",
        nsid: SelfLabels::NSID,
        decode: Labels::decode_self_labels,
    }];

    fn variant(&self) -> &'static UnionVariant<Self> {
        match self {
            Labels::SelfLabels(_) => &Self::VARIANTS[0],
        }
    }

    fn encode_payload(&self, w: &mut ObjectWriter) -> Result<()> {
        match self {
            Labels::SelfLabels(labels) => labels.encode_fields(w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{decode_union, encode_union, CodecError, DecodeOptions};
    use serde_json::json;

    #[test]
    fn test_self_labels_wire_shape() {
        let value = encode_union(&Labels::self_labels(["graphic-media"])).unwrap();
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"$type":"com.atproto.label.defs#selfLabels","values":[{"val":"graphic-media"}]}"#
        );
    }

    #[test]
    fn test_self_labels_clamped() {
        let labels = Labels::self_labels((0..12).map(|i| format!("label-{i}")));
        let value = encode_union(&labels).unwrap();
        assert_eq!(value["values"].as_array().unwrap().len(), SelfLabels::MAX_VALUES);
        assert_eq!(value["values"][9]["val"], "label-9");
    }

    #[test]
    fn test_decode() {
        let value = json!({ "values": [{ "val": "nudity" }, { "val": "porn" }] });
        let Labels::SelfLabels(labels) =
            decode_union("labels", &value, &DecodeOptions::default()).unwrap();
        assert!(labels.contains("porn"));
        assert!(!labels.contains("gore"));
    }

    #[test]
    fn test_decode_without_values_fails() {
        let value = json!({ "vals": [] });
        let err = decode_union::<Labels>("labels", &value, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnionDecodeFailure { ref field, .. } if field == "labels"
        ));
    }
}

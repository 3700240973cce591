//! Codec error taxonomy

use thiserror::Error;

/// Errors raised while encoding or decoding a lexicon document
///
/// Decode failures abort the enclosing record; there are no partial records.
/// Field names are dotted paths from the document root (`embed.external.uri`).
#[derive(Debug, Error)]
pub enum CodecError {
    /// A required field is absent
    #[error("Missing required field: {field}")]
    MissingField {
        /// Path of the missing field
        field: String,
    },

    /// No declared variant of a union field matched
    #[error(
        "No matching variant for union field '{field}' (expected one of: {})",
        .expected.join(", ")
    )]
    UnionDecodeFailure {
        /// Path of the union field
        field: String,
        /// Wire keys that were probed, in priority order
        expected: Vec<&'static str>,
    },

    /// A field is present with the wrong JSON shape
    #[error("Malformed value for field '{field}': {reason}")]
    MalformedValue {
        /// Path of the offending field
        field: String,
        /// What was expected and what was found
        reason: String,
    },

    /// The document (or a nested value that must be an object) is not a JSON object
    #[error("Expected a JSON object for {expected}")]
    NotAnObject {
        /// What the object was supposed to be
        expected: String,
    },

    /// Strict decoding found a `$type` that does not match
    #[error("Type mismatch: expected '{expected}', found '{actual}'")]
    TypeMismatch {
        /// Discriminant the decoder expected
        expected: &'static str,
        /// Discriminant found on the wire
        actual: String,
    },

    /// JSON syntax or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Field path this error points at, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CodecError::MissingField { field }
            | CodecError::UnionDecodeFailure { field, .. }
            | CodecError::MalformedValue { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }

    /// Prefix the field path with the enclosing field name
    pub(crate) fn nested_in(self, parent: &str) -> Self {
        fn join(parent: &str, field: String) -> String {
            if parent.is_empty() {
                field
            } else {
                format!("{parent}.{field}")
            }
        }

        match self {
            CodecError::MissingField { field } => CodecError::MissingField {
                field: join(parent, field),
            },
            CodecError::UnionDecodeFailure { field, expected } => CodecError::UnionDecodeFailure {
                field: join(parent, field),
                expected,
            },
            CodecError::MalformedValue { field, reason } => {
                CodecError::MalformedValue { field: join(parent, field), reason }
            }
            CodecError::NotAnObject { expected } => {
                CodecError::MalformedValue {
                    field: parent.to_string(),
                    reason: format!("expected an object for {expected}"),
                }
            }
            other => other,
        }
    }
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = CodecError::MissingField { field: "createdAt".to_string() };
        assert!(err.to_string().contains("createdAt"));

        let err = CodecError::UnionDecodeFailure {
            field: "embed".to_string(),
            expected: vec!["images", "external"],
        };
        let message = err.to_string();
        assert!(message.contains("embed"));
        assert!(message.contains("images, external"));
    }

    #[test]
    fn test_nested_path() {
        let err = CodecError::MissingField {
            field: "uri".to_string(),
        }
        .nested_in("external")
        .nested_in("embed");
        assert_eq!(err.field(), Some("embed.external.uri"));
    }

    #[test]
    fn test_not_an_object_becomes_malformed_when_nested() {
        let err = CodecError::NotAnObject {
            expected: "strong ref".to_string(),
        }
        .nested_in("subject");
        assert!(matches!(
            err,
            CodecError::MalformedValue { ref field, .. } if field == "subject"
        ));
    }
}

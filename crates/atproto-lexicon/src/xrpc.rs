//! XRPC error bodies
//!
//! Failed XRPC calls answer with a `{"error": code, "message": text}` body.
//! This module maps the error code onto a closed taxonomy of protocol error
//! kinds. Any code outside the lookup table maps to [`ProtocolErrorKind::Unknown`];
//! decoding only fails when the body lacks one of the two fields.

use crate::lexicon::{CodecError, DecodeOptions, ObjectReader, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Error Response Format
// =============================================================================

/// Standard XRPC error response format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrpcErrorResponse {
    /// Error code
    pub error: String,
    /// Error message
    pub message: String,
}

impl XrpcErrorResponse {
    /// Create an error body
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Error Taxonomy
// =============================================================================

/// Protocol error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolErrorKind {
    /// Malformed or rejected request, including token problems
    BadRequest,
    /// Authentication required or missing
    Unauthorized,
    /// Authenticated but not permitted
    Forbidden,
    /// Request body too large
    PayloadTooLarge,
    /// Rate limited
    TooManyRequests,
    /// Server failure
    InternalServerError,
    /// Method not implemented by this service
    MethodNotImplemented,
    /// Upstream service failed
    BadGateway,
    /// Service unavailable or out of resources
    ServiceUnavailable,
    /// Upstream service timed out
    GatewayTimeout,
    /// Any code not in the lookup table
    Unknown,
}

impl ProtocolErrorKind {
    /// Map a wire error code to its kind
    ///
    /// The table is fixed. Note that the bare code `Unauthorized` is *not* in
    /// it and so lands in [`ProtocolErrorKind::Unknown`]; only
    /// `AuthenticationRequired` and `AuthMissing` map to
    /// [`ProtocolErrorKind::Unauthorized`]. That asymmetry is deliberately
    /// left as is.
    pub fn from_code(code: &str) -> Self {
        match code {
            "InvalidRequest" | "BadRequest" | "ExpiredToken" | "InvalidToken" => Self::BadRequest,
            "AuthenticationRequired" | "AuthMissing" => Self::Unauthorized,
            "Forbidden" => Self::Forbidden,
            "PayloadTooLarge" => Self::PayloadTooLarge,
            "TooManyRequests" | "RateLimitExceeded" => Self::TooManyRequests,
            "InternalServerError" => Self::InternalServerError,
            "MethodNotImplemented" => Self::MethodNotImplemented,
            "BadGateway" | "UpstreamFailure" => Self::BadGateway,
            "ServiceUnavailable" | "NotEnoughResources" => Self::ServiceUnavailable,
            "GatewayTimeout" | "UpstreamTimeout" => Self::GatewayTimeout,
            _ => Self::Unknown,
        }
    }

    /// Lower camel case name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "badRequest",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::PayloadTooLarge => "payloadTooLarge",
            Self::TooManyRequests => "tooManyRequests",
            Self::InternalServerError => "internalServerError",
            Self::MethodNotImplemented => "methodNotImplemented",
            Self::BadGateway => "badGateway",
            Self::ServiceUnavailable => "serviceUnavailable",
            Self::GatewayTimeout => "gatewayTimeout",
            Self::Unknown => "unknown",
        }
    }

    /// Whether retrying the same request later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::TooManyRequests
                | Self::InternalServerError
                | Self::BadGateway
                | Self::ServiceUnavailable
                | Self::GatewayTimeout
        )
    }
}

impl fmt::Display for ProtocolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded protocol error
///
/// Only produced by decoding an error body.
///
/// # Examples
/// ```
/// use atproto_lexicon::xrpc::{decode_error, ProtocolErrorKind};
///
/// let error = decode_error(br#"{"error":"TooManyRequests","message":"slow down"}"#).unwrap();
/// assert_eq!(error.kind(), ProtocolErrorKind::TooManyRequests);
/// assert_eq!(error.message(), "slow down");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    kind: ProtocolErrorKind,
    code: String,
    message: String,
}

impl ProtocolError {
    /// Classify a parsed error body
    pub fn from_response(response: XrpcErrorResponse) -> Self {
        let kind = ProtocolErrorKind::from_code(&response.error);
        if kind == ProtocolErrorKind::Unknown {
            tracing::warn!(code = %response.error, "unrecognized XRPC error code");
        }
        Self {
            kind,
            code: response.error,
            message: response.message,
        }
    }

    /// Decode an error body from JSON bytes
    pub fn from_body(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }

    /// Decode an error body from a JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        let options = DecodeOptions::default();
        let reader = ObjectReader::from_value(value, "XRPC error body", &options)?;
        let response = XrpcErrorResponse {
            error: reader.required("error")?,
            message: reader.required("message")?,
        };
        Ok(Self::from_response(response))
    }

    /// The error kind
    pub fn kind(&self) -> ProtocolErrorKind {
        self.kind
    }

    /// The wire error code as received
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.code, self.message)
    }
}

impl std::error::Error for ProtocolError {}

impl TryFrom<&[u8]> for ProtocolError {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_body(bytes)
    }
}

/// Decode an XRPC error body
pub fn decode_error(bytes: &[u8]) -> Result<ProtocolError> {
    ProtocolError::from_body(bytes)
}

// =============================================================================
// Tests
// =============================================================================

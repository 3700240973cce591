//! Record publishing through an injected transport
//!
//! [`RecordPublisher`] is the glue between the codec and a repository write
//! endpoint (`com.atproto.repo.createRecord`): it encodes a record, hands the
//! bytes to a [`RecordTransport`], and decodes the answer into either a
//! [`StrongRef`] or a [`ProtocolError`]. No HTTP client lives here; callers
//! supply the transport.

use crate::lexicon::{encode_record, object_from_value, CodecError, DecodeOptions, LexRecord};
use crate::types::StrongRef;
use crate::xrpc::ProtocolError;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure to deliver a request at all (connection, TLS, timeout)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Transport failure: {0}")]
pub struct TransportError(pub String);

/// A create-record call as handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordRequest {
    /// Repository identifier (DID or handle)
    pub repo: String,
    /// Collection NSID, the record's `$type`
    pub collection: String,
    /// Encoded record JSON
    pub record: Vec<u8>,
    /// Ask the server to validate against its lexicons; `None` leaves it to the server
    pub validate: Option<bool>,
}

/// Raw HTTP answer from the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers create-record calls to a repository
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordTransport: Send + Sync {
    /// Send one create-record call
    async fn create_record(
        &self,
        request: CreateRecordRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// Publishing errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// The record could not be encoded
    #[error("Failed to encode record: {0}")]
    Encode(#[source] CodecError),

    /// The server rejected the write
    #[error("Server rejected record (HTTP {status}): {error}")]
    Protocol {
        /// HTTP status
        status: u16,
        /// Decoded error body
        error: ProtocolError,
    },

    /// The server answered with a body that could not be decoded
    #[error("Malformed response (HTTP {status}): {source}")]
    MalformedResponse {
        /// HTTP status
        status: u16,
        /// Decode failure
        #[source]
        source: CodecError,
    },

    /// The request never completed
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result type for publishing
pub type Result<T> = std::result::Result<T, PublishError>;

/// Publisher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Repository records are written to
    pub repo: String,
    /// Forwarded as the `validate` flag
    pub validate: Option<bool>,
}

impl PublisherConfig {
    /// Configuration for a repository
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            validate: None,
        }
    }

    /// Set the validate flag
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = Some(validate);
        self
    }
}

/// Writes records to one repository
#[derive(Debug)]
pub struct RecordPublisher<T> {
    transport: T,
    config: PublisherConfig,
}

impl<T: RecordTransport> RecordPublisher<T> {
    /// Create a publisher
    pub fn new(transport: T, config: PublisherConfig) -> Self {
        Self { transport, config }
    }

    /// Publisher configuration
    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Encode and write a record, returning a reference to the created version
    pub async fn publish<R: LexRecord + Sync>(&self, record: &R) -> Result<StrongRef> {
        let bytes = encode_record(record).map_err(PublishError::Encode)?;
        let request = CreateRecordRequest {
            repo: self.config.repo.clone(),
            collection: R::NSID.to_string(),
            record: bytes,
            validate: self.config.validate,
        };

        tracing::debug!(
            repo = %request.repo,
            collection = %request.collection,
            "publishing record"
        );

        let response = self.transport.create_record(request).await?;
        let status = response.status;

        if !response.is_success() {
            let error = ProtocolError::from_body(&response.body)
                .map_err(|source| PublishError::MalformedResponse { status, source })?;
            tracing::warn!(status, kind = %error.kind(), "record rejected");
            return Err(PublishError::Protocol { status, error });
        }

        let created = decode_created(&response.body)
            .map_err(|source| PublishError::MalformedResponse { status, source })?;
        tracing::debug!(uri = %created.uri, cid = %created.cid, "record created");
        Ok(created)
    }
}

/// The create-record output also carries `commit` and `validationStatus`; only
/// the reference is kept.
fn decode_created(body: &[u8]) -> std::result::Result<StrongRef, CodecError> {
    let value: Value = serde_json::from_slice(body)?;
    object_from_value(&value, &DecodeOptions::default())
}

//! Server metadata (`com.atproto.server.describeServer` output)
//!
//! Not a repository record: the document carries no `$type` and is decoded
//! from a query response body.

use crate::lexicon::{
    object_from_value, object_to_value, DecodeOptions, LexObject, ObjectReader, ObjectWriter,
    Result,
};
use serde::{Deserialize, Serialize};

/// Links to the server's legal documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerLinks {
    /// Privacy policy URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<String>,
    /// Terms of service URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
}

/// Server contact information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerContact {
    /// Contact email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Description of a PDS and its account policies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDescription {
    /// DID of the server
    pub did: String,
    /// Handle domains users may register under
    pub available_user_domains: Vec<String>,
    /// Whether an invite code is required to create an account
    pub invite_code_required: Option<bool>,
    /// Whether phone verification is required to create an account
    pub phone_verification_required: Option<bool>,
    /// Legal document links
    pub links: Option<ServerLinks>,
    /// Contact information
    pub contact: Option<ServerContact>,
}

impl ServerDescription {
    /// Create a description with only the required fields
    pub fn new(did: impl Into<String>, available_user_domains: Vec<String>) -> Self {
        Self {
            did: did.into(),
            available_user_domains,
            invite_code_required: None,
            phone_verification_required: None,
            links: None,
            contact: None,
        }
    }

    /// Whether signing up needs an invite code; absent means no
    pub fn requires_invite(&self) -> bool {
        self.invite_code_required.unwrap_or(false)
    }

    /// Decode from a response body
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        object_from_value(&value, &DecodeOptions::default())
    }

    /// Encode to JSON bytes
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&object_to_value(self)?)?)
    }
}

impl LexObject for ServerDescription {
    fn encode_fields(&self, w: &mut ObjectWriter) -> Result<()> {
        w.required("did", &self.did)?;
        w.required("availableUserDomains", &self.available_user_domains)?;
        w.optional("inviteCodeRequired", self.invite_code_required.as_ref())?;
        w.optional("phoneVerificationRequired", self.phone_verification_required.as_ref())?;
        w.optional("links", self.links.as_ref())?;
        w.optional("contact", self.contact.as_ref())
    }

    fn decode_fields(r: &ObjectReader<'_>) -> Result<Self> {
        Ok(ServerDescription {
            did: r.required("did")?,
            available_user_domains: r.required("availableUserDomains")?,
            invite_code_required: r.optional("inviteCodeRequired")?,
            phone_verification_required: r.optional("phoneVerificationRequired")?,
            links: r.optional("links")?,
            contact: r.optional("contact")?,
        })
    }
}

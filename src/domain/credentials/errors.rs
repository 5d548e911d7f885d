//! Credentials - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("invalid Azure subscription key format (expected 32 hex characters)")]
    InvalidSubscriptionKey,

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("missing required keys: {0}")]
    MissingKeys(String),

    #[error("invalid relay url {url}: {reason}")]
    InvalidRelayUrl { url: String, reason: String },
}

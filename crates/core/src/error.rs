use thiserror::Error;

/// Result type for inspection operations.
pub type Result<T> = std::result::Result<T, InspectError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InspectError {
    /// The token is not three base64url segments of JSON.
    #[error("invalid JWT format: {0}")]
    MalformedToken(String),

    /// The SAML Response is not base64 or not UTF-8 once decoded.
    #[error("failed to decode SAML response: {0}")]
    Decode(String),

    #[error("failed to parse XML: {0}")]
    MalformedXml(String),

    /// Well-formed XML that is not usable IdP metadata.
    #[error("invalid IdP metadata: {0}")]
    InvalidMetadata(String),

    #[error("failed to encode token: {0}")]
    Encode(String),
}

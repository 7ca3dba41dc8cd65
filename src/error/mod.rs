//! Error types and handlers for registry operations

pub mod handlers;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Credential source missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request could not be sent or the response could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Registry answered with a status outside the operation's accepted set
    #[error("Unexpected HTTP status {code} during {operation}")]
    UnexpectedStatus { code: u16, operation: String },

    /// Manifest carried no usable config digest, or a tag resolved to none
    #[error("No content digest found for {image}:{reference}")]
    MissingDigest { image: String, reference: String },

    /// Config blob has no `created` field
    #[error("Config blob {digest} of {image} has no 'created' field")]
    MissingCreatedField { image: String, digest: String },

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Response body did not match the expected document
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl RegistryError {
    /// Numeric HTTP status carried by an `UnexpectedStatus` error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RegistryError::UnexpectedStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether a read operation failing with this error may be attempted again.
    ///
    /// Structural errors (missing fields, bad config) will fail the same way on
    /// every attempt. Delete failures must never be retried blindly regardless
    /// of what this returns.
    pub fn is_retryable(&self) -> bool {
        match self {
            RegistryError::Network(_) => true,
            RegistryError::UnexpectedStatus { code, .. } => {
                matches!(code, 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        RegistryError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for RegistryError {
    fn from(err: toml::de::Error) -> Self {
        RegistryError::Configuration(err.to_string())
    }
}

impl From<url::ParseError> for RegistryError {
    fn from(err: url::ParseError) -> Self {
        RegistryError::Configuration(err.to_string())
    }
}

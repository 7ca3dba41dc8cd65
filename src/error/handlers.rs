//! Shared error mapping for registry responses and transport failures

use crate::error::{RegistryError, Result};
use reqwest::StatusCode;

/// Maps registry status codes onto the operation's accepted set
pub struct HttpErrorHandler;

impl HttpErrorHandler {
    /// Accept exactly `expected`; anything else becomes `UnexpectedStatus`.
    ///
    /// The body of a rejected response is not inspected.
    pub fn expect_status(status: StatusCode, expected: StatusCode, operation: &str) -> Result<()> {
        if status == expected {
            Ok(())
        } else {
            Err(RegistryError::UnexpectedStatus {
                code: status.as_u16(),
                operation: operation.to_string(),
            })
        }
    }

    /// Reads succeed only on 200
    pub fn expect_ok(status: StatusCode, operation: &str) -> Result<()> {
        Self::expect_status(status, StatusCode::OK, operation)
    }

    /// Manifest deletes are acknowledged with 202 and nothing else
    pub fn expect_accepted(status: StatusCode, operation: &str) -> Result<()> {
        Self::expect_status(status, StatusCode::ACCEPTED, operation)
    }
}

/// Network error categorization
pub struct NetworkErrorHandler;

impl NetworkErrorHandler {
    pub fn handle_network_error(error: &reqwest::Error, context: &str) -> RegistryError {
        if error.is_timeout() {
            RegistryError::Network(format!("{} timed out: {}", context, error))
        } else if error.is_connect() {
            RegistryError::Network(format!("Connection error during {}: {}", context, error))
        } else if error.is_builder() {
            RegistryError::Network(format!("Failed to build request for {}: {}", context, error))
        } else if error.is_body() || error.is_decode() {
            RegistryError::Network(format!("Failed to read response for {}: {}", context, error))
        } else {
            RegistryError::Network(format!("{} network error: {}", context, error))
        }
    }
}

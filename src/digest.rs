//! Content digest handling
//!
//! A digest is `<algorithm>:<encoded>` and may stand in for a tag in manifest
//! URLs. The encoded part must match `[A-Za-z0-9=_.-]+`; it is not checked
//! for length or hex alphabet.

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Response header carrying the canonical digest of a manifest
pub const CONTENT_DIGEST_HEADER: &str = "docker-content-digest";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest {
    algorithm: String,
    encoded: String,
}

impl Digest {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let (algorithm, encoded) = value.split_once(':').ok_or_else(|| {
            RegistryError::InvalidArgument(format!("Digest '{}' has no algorithm prefix", value))
        })?;

        if algorithm.is_empty() || encoded.is_empty() {
            return Err(RegistryError::InvalidArgument(format!(
                "Digest '{}' must be <algorithm>:<hex>",
                value
            )));
        }

        let valid_algorithm = algorithm
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '_' | '-'));
        let valid_encoded = encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '=' | '_' | '.' | '-'));
        if !valid_algorithm || !valid_encoded {
            return Err(RegistryError::InvalidArgument(format!(
                "Digest '{}' contains invalid characters",
                value
            )));
        }

        Ok(Self {
            algorithm: algorithm.to_string(),
            encoded: encoded.to_string(),
        })
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Abbreviated form for log lines, e.g. `sha256:0123456789ab`
    pub fn short(&self) -> String {
        let prefix: String = self.encoded.chars().take(12).collect();
        format!("{}:{}", self.algorithm, prefix)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.encoded)
    }
}

impl FromStr for Digest {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.to_string()
    }
}

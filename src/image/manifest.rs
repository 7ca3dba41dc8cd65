//! Manifest documents returned by the registry
//!
//! [`ManifestV2`] is decoded as-is from `GET /v2/{name}/manifests/{tag}`.
//! [`LegacyManifestInfo`] is assembled by the client from the manifest and
//! the image config blob it references.

use crate::error::{RegistryError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Docker image manifest, version 2 schema 2
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";
/// Docker image manifest, version 2 schema 1 (legacy)
pub const MANIFEST_V1_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v1+json";

/// Reference to a config or layer blob inside a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub size: i64,
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestV2 {
    pub schema_version: i64,
    #[serde(default)]
    pub media_type: String,
    pub config: LayerDescriptor,
    #[serde(default)]
    pub layers: Vec<LayerDescriptor>,
}

impl ManifestV2 {
    /// Bytes referenced by the manifest: config blob plus every layer
    pub fn total_size(&self) -> i64 {
        self.config.size + self.layers.iter().map(|layer| layer.size).sum::<i64>()
    }
}

/// Creation metadata of one image:tag, derived from its config blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyManifestInfo {
    pub schema_version: i64,
    pub name: String,
    pub tag: String,
    pub architecture: String,
    /// `created` exactly as the config blob spells it
    pub created: String,
    pub created_at: DateTime<Utc>,
}

/// The part of a manifest needed to find its config blob.
///
/// `config` is kept untyped so a schema 1 manifest, or one whose `config` is
/// not an object, reads as having no config digest.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ManifestConfigRef {
    #[serde(default)]
    pub schema_version: i64,
    #[serde(default)]
    pub config: Option<Value>,
}

impl ManifestConfigRef {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| RegistryError::Decode(format!("Failed to parse manifest: {}", e)))
    }

    /// Non-empty string `config.digest`, if the manifest has one
    pub fn config_digest(&self) -> Option<&str> {
        self.config
            .as_ref()
            .and_then(|config| config.get("digest"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|digest| !digest.is_empty())
    }
}

/// The fields of an image config blob that feed [`LegacyManifestInfo`]
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfigBlob {
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
}

impl ConfigBlob {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| RegistryError::Decode(format!("Failed to parse config blob: {}", e)))
    }
}

/// Parse a config blob `created` value.
///
/// Registries emit RFC 3339 with up to nanosecond fractions
/// (`2023-06-01T12:30:45.123456789Z`); offsetless values are taken as UTC.
pub fn parse_created(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| RegistryError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

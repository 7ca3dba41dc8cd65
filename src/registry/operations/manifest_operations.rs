//! Manifest operations for registry client
//!
//! - Manifest download (GET /v2/{name}/manifests/{reference})
//! - Tag to digest resolution via the `docker-content-digest` header
//! - Manifest deletion by digest (DELETE /v2/{name}/manifests/{digest})

use crate::digest::{CONTENT_DIGEST_HEADER, Digest};
use crate::error::handlers::HttpErrorHandler;
use crate::error::{RegistryError, Result};
use crate::image::{MANIFEST_V2_MEDIA_TYPE, ManifestV2};
use crate::registry::endpoint::{RegistryEndpoint, require_segment};
use reqwest::Method;

#[derive(Clone)]
pub struct ManifestOperations {
    endpoint: RegistryEndpoint,
}

impl ManifestOperations {
    pub fn new(endpoint: RegistryEndpoint) -> Self {
        Self { endpoint }
    }

    fn manifest_url(&self, image: &str, reference: &str) -> Result<String> {
        require_segment(image, "image name")?;
        require_segment(reference, "manifest reference")?;
        Ok(self
            .endpoint
            .url(&format!("{}/manifests/{}", image, reference)))
    }

    /// Fetch and decode the v2 manifest of `image:reference`
    pub async fn fetch_manifest(&self, image: &str, reference: &str) -> Result<ManifestV2> {
        let body = self
            .fetch_manifest_raw(image, reference, &[MANIFEST_V2_MEDIA_TYPE])
            .await?;

        serde_json::from_slice(&body)
            .map_err(|e| RegistryError::Decode(format!("Failed to parse manifest: {}", e)))
    }

    /// Fetch the manifest body without decoding it
    pub async fn fetch_manifest_raw(
        &self,
        image: &str,
        reference: &str,
        accept: &[&str],
    ) -> Result<Vec<u8>> {
        let operation = "manifest fetch";
        let url = self.manifest_url(image, reference)?;

        let response = self.endpoint.send(Method::GET, &url, accept, operation).await?;
        HttpErrorHandler::expect_ok(response.status(), operation)?;

        RegistryEndpoint::read_body(response, operation).await
    }

    /// Digest the registry reports for `image:tag`.
    ///
    /// Returns an empty string when the `docker-content-digest` header is absent.
    pub async fn resolve_digest(&self, image: &str, tag: &str) -> Result<String> {
        let operation = "digest resolution";
        let url = self.manifest_url(image, tag)?;

        let response = self
            .endpoint
            .send(Method::GET, &url, &[MANIFEST_V2_MEDIA_TYPE], operation)
            .await?;
        HttpErrorHandler::expect_ok(response.status(), operation)?;

        let digest = response
            .headers()
            .get(CONTENT_DIGEST_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string())
            .unwrap_or_default();

        if digest.is_empty() {
            self.endpoint.output().warning(&format!(
                "Registry returned no {} header for {}:{}",
                CONTENT_DIGEST_HEADER, image, tag
            ));
        } else {
            self.endpoint
                .output()
                .detail(&format!("{}:{} resolves to {}", image, tag, digest));
        }

        Ok(digest)
    }

    /// Delete the manifest addressed by `digest`; only 202 counts as success
    pub async fn delete_manifest(&self, image: &str, digest: &Digest) -> Result<()> {
        let operation = "manifest delete";
        let url = self.manifest_url(image, &digest.to_string())?;

        let response = self
            .endpoint
            .send(Method::DELETE, &url, &[MANIFEST_V2_MEDIA_TYPE], operation)
            .await?;
        HttpErrorHandler::expect_accepted(response.status(), operation)
    }
}

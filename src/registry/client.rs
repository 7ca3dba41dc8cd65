// Registry client for one Nexus host / repository namespace pair.
//
// Lists repositories and tags, fetches manifests, derives creation metadata
// from config blobs and deletes tagged images. All operations share the
// read-only configuration and a single pooled HTTP client.

use crate::config::RegistryConfig;
use crate::digest::Digest;
use crate::error::{RegistryError, Result};
use crate::image::manifest::{ConfigBlob, ManifestConfigRef};
use crate::image::{
    LegacyManifestInfo, MANIFEST_V1_MEDIA_TYPE, MANIFEST_V2_MEDIA_TYPE, ManifestV2, parse_created,
};
use crate::logging::Logger;
use crate::registry::endpoint::{RegistryEndpoint, build_http_client};
use crate::registry::operations::{BlobOperations, ManifestOperations, RepositoryOperations};
use std::sync::Arc;

/// Accept headers for the legacy-info fetches: v2 body, v1 compatibility signal
const LEGACY_ACCEPT: [&str; 2] = [MANIFEST_V2_MEDIA_TYPE, MANIFEST_V1_MEDIA_TYPE];

pub struct RegistryClientBuilder {
    config: RegistryConfig,
    output: Logger,
}

impl RegistryClientBuilder {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            output: Logger::default(),
        }
    }

    pub fn with_output(mut self, output: Logger) -> Self {
        self.output = output;
        self
    }

    /// Create the shared connection pool. No request is sent.
    pub fn build(self) -> Result<RegistryClient> {
        self.config.validate()?;

        let http = build_http_client(&self.config)?;
        let config = Arc::new(self.config);
        let endpoint = RegistryEndpoint::new(http, Arc::clone(&config), self.output.clone());

        Ok(RegistryClient {
            config,
            output: self.output,
            repositories: RepositoryOperations::new(endpoint.clone()),
            manifests: ManifestOperations::new(endpoint.clone()),
            blobs: BlobOperations::new(endpoint),
        })
    }
}

#[derive(Clone)]
pub struct RegistryClient {
    config: Arc<RegistryConfig>,
    output: Logger,
    repositories: RepositoryOperations,
    manifests: ManifestOperations,
    blobs: BlobOperations,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: RegistryConfig) -> RegistryClientBuilder {
        RegistryClientBuilder::new(config)
    }

    /// Client configured from the `.credentials` file in the working directory
    pub fn from_credentials_file() -> Result<Self> {
        Self::new(RegistryConfig::load_default()?)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Repository names from the catalog, in registry order
    pub async fn list_images(&self) -> Result<Vec<String>> {
        self.repositories.list_images().await
    }

    /// Tags of `image`, in registry order
    pub async fn list_tags_by_image(&self, image: &str) -> Result<Vec<String>> {
        Ok(self.repositories.list_tags(image).await?.tags)
    }

    /// The v2 manifest of `image:tag`, trusted as returned
    pub async fn fetch_manifest(&self, image: &str, tag: &str) -> Result<ManifestV2> {
        self.manifests.fetch_manifest(image, tag).await
    }

    /// Creation metadata of `image:tag`.
    ///
    /// The v2 manifest does not carry a creation time. It lives in the image
    /// config blob, which is addressed by the manifest's `config.digest`, so
    /// this takes two requests: manifest, then blob.
    pub async fn fetch_legacy_manifest_info(
        &self,
        image: &str,
        tag: &str,
    ) -> Result<LegacyManifestInfo> {
        let manifest_body = self
            .manifests
            .fetch_manifest_raw(image, tag, &LEGACY_ACCEPT)
            .await?;
        let manifest = ManifestConfigRef::from_slice(&manifest_body)?;

        let missing_digest = || RegistryError::MissingDigest {
            image: image.to_string(),
            reference: tag.to_string(),
        };
        let digest = manifest
            .config_digest()
            .ok_or_else(missing_digest)
            .and_then(|value| Digest::parse(value).map_err(|_| missing_digest()))?;

        self.output
            .detail(&format!("{}:{} config blob is {}", image, tag, digest.short()));

        let blob_body = self.blobs.fetch_blob(image, &digest, &LEGACY_ACCEPT).await?;
        let blob = ConfigBlob::from_slice(&blob_body)?;

        let created = blob.created.ok_or_else(|| RegistryError::MissingCreatedField {
            image: image.to_string(),
            digest: digest.to_string(),
        })?;
        let created_at = parse_created(&created)?;

        Ok(LegacyManifestInfo {
            schema_version: manifest.schema_version,
            name: image.to_string(),
            tag: tag.to_string(),
            architecture: blob.architecture.unwrap_or_default(),
            created,
            created_at,
        })
    }

    /// `docker-content-digest` of `image:tag`, or an empty string if the
    /// registry did not send the header
    pub async fn resolve_tag_digest(&self, image: &str, tag: &str) -> Result<String> {
        self.manifests.resolve_digest(image, tag).await
    }

    /// Delete the manifest `image:tag` points at.
    ///
    /// Irreversible. Succeeds only when the registry acknowledges the delete
    /// with 202; a digest that was resolved but not deleted is an error.
    pub async fn delete_image_by_tag(&self, image: &str, tag: &str) -> Result<()> {
        let resolved = self.resolve_tag_digest(image, tag).await?;
        let digest = Digest::parse(&resolved).map_err(|_| RegistryError::MissingDigest {
            image: image.to_string(),
            reference: tag.to_string(),
        })?;

        self.manifests.delete_manifest(image, &digest).await?;

        self.output
            .success(&format!("{}:{} has been deleted ({})", image, tag, digest.short()));
        Ok(())
    }
}

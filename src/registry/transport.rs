//! Registry operations as a trait
//!
//! Code that orchestrates several calls (cleanup policies, reports) can be
//! written against [`ImageRegistry`] and exercised with a fake registry.

use crate::error::Result;
use crate::image::{LegacyManifestInfo, ManifestV2};
use crate::registry::client::RegistryClient;
use async_trait::async_trait;

#[async_trait]
pub trait ImageRegistry: Send + Sync {
    /// Repository names from the catalog
    async fn list_images(&self) -> Result<Vec<String>>;

    /// Tags of one image
    async fn list_tags_by_image(&self, image: &str) -> Result<Vec<String>>;

    /// v2 manifest of `image:tag`
    async fn fetch_manifest(&self, image: &str, tag: &str) -> Result<ManifestV2>;

    /// Creation metadata of `image:tag`
    async fn fetch_legacy_manifest_info(
        &self,
        image: &str,
        tag: &str,
    ) -> Result<LegacyManifestInfo>;

    /// Content digest of `image:tag`, empty when the registry reports none
    async fn resolve_tag_digest(&self, image: &str, tag: &str) -> Result<String>;

    /// Delete the manifest `image:tag` points at
    async fn delete_image_by_tag(&self, image: &str, tag: &str) -> Result<()>;
}

#[async_trait]
impl ImageRegistry for RegistryClient {
    async fn list_images(&self) -> Result<Vec<String>> {
        RegistryClient::list_images(self).await
    }

    async fn list_tags_by_image(&self, image: &str) -> Result<Vec<String>> {
        RegistryClient::list_tags_by_image(self, image).await
    }

    async fn fetch_manifest(&self, image: &str, tag: &str) -> Result<ManifestV2> {
        RegistryClient::fetch_manifest(self, image, tag).await
    }

    async fn fetch_legacy_manifest_info(
        &self,
        image: &str,
        tag: &str,
    ) -> Result<LegacyManifestInfo> {
        RegistryClient::fetch_legacy_manifest_info(self, image, tag).await
    }

    async fn resolve_tag_digest(&self, image: &str, tag: &str) -> Result<String> {
        RegistryClient::resolve_tag_digest(self, image, tag).await
    }

    async fn delete_image_by_tag(&self, image: &str, tag: &str) -> Result<()> {
        RegistryClient::delete_image_by_tag(self, image, tag).await
    }
}

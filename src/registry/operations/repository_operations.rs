//! Repository operations for registry client
//!
//! Implements the listing endpoints:
//! - Catalog listing (GET /v2/_catalog)
//! - Tag listing (GET /v2/{name}/tags/list)

use crate::error::handlers::HttpErrorHandler;
use crate::error::{RegistryError, Result};
use crate::image::{Catalog, MANIFEST_V2_MEDIA_TYPE, TagList};
use crate::registry::endpoint::{RegistryEndpoint, require_segment};
use reqwest::Method;

#[derive(Clone)]
pub struct RepositoryOperations {
    endpoint: RegistryEndpoint,
}

impl RepositoryOperations {
    pub fn new(endpoint: RegistryEndpoint) -> Self {
        Self { endpoint }
    }

    /// Repository names in the order the registry lists them
    pub async fn list_images(&self) -> Result<Vec<String>> {
        let operation = "catalog listing";
        let url = self.endpoint.url("_catalog");

        let response = self
            .endpoint
            .send(Method::GET, &url, &[MANIFEST_V2_MEDIA_TYPE], operation)
            .await?;
        HttpErrorHandler::expect_ok(response.status(), operation)?;

        let body = RegistryEndpoint::read_body(response, operation).await?;
        let catalog: Catalog = serde_json::from_slice(&body)
            .map_err(|e| RegistryError::Decode(format!("Failed to parse catalog: {}", e)))?;

        self.endpoint
            .output()
            .verbose(&format!("Found {} repositories", catalog.repositories.len()));

        Ok(catalog.repositories)
    }

    /// Tags of one image in the order the registry lists them
    pub async fn list_tags(&self, image: &str) -> Result<TagList> {
        require_segment(image, "image name")?;

        let operation = "tag listing";
        let url = self.endpoint.url(&format!("{}/tags/list", image));

        let response = self
            .endpoint
            .send(Method::GET, &url, &[MANIFEST_V2_MEDIA_TYPE], operation)
            .await?;
        HttpErrorHandler::expect_ok(response.status(), operation)?;

        let body = RegistryEndpoint::read_body(response, operation).await?;
        let mut tags: TagList = serde_json::from_slice(&body)
            .map_err(|e| RegistryError::Decode(format!("Failed to parse tag list: {}", e)))?;
        if tags.name.is_empty() {
            tags.name = image.to_string();
        }

        self.endpoint.output().verbose(&format!(
            "Found {} tags for repository {}",
            tags.tags.len(),
            image
        ));

        Ok(tags)
    }
}

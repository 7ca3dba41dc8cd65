//! Blob download (GET /v2/{name}/blobs/{digest})

use crate::digest::Digest;
use crate::error::Result;
use crate::error::handlers::HttpErrorHandler;
use crate::registry::endpoint::{RegistryEndpoint, require_segment};
use reqwest::Method;

#[derive(Clone)]
pub struct BlobOperations {
    endpoint: RegistryEndpoint,
}

impl BlobOperations {
    pub fn new(endpoint: RegistryEndpoint) -> Self {
        Self { endpoint }
    }

    /// Raw bytes of the blob; the content is not verified against the digest
    pub async fn fetch_blob(&self, image: &str, digest: &Digest, accept: &[&str]) -> Result<Vec<u8>> {
        require_segment(image, "image name")?;

        let operation = "blob fetch";
        let url = self.endpoint.url(&format!("{}/blobs/{}", image, digest));

        let response = self.endpoint.send(Method::GET, &url, accept, operation).await?;
        HttpErrorHandler::expect_ok(response.status(), operation)?;

        let body = RegistryEndpoint::read_body(response, operation).await?;
        self.endpoint.output().detail(&format!(
            "Blob {} is {}",
            digest.short(),
            self.endpoint.output().format_size(body.len() as u64)
        ));

        Ok(body)
    }
}

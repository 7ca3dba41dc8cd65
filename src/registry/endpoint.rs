//! Authenticated request construction against one registry namespace
//!
//! Every request goes to `{host}/repository/{repository}/v2/...`, carries
//! HTTP basic auth and is sent through the one pooled [`Client`] owned by the
//! registry client.

use crate::config::RegistryConfig;
use crate::error::handlers::NetworkErrorHandler;
use crate::error::{RegistryError, Result};
use crate::logging::Logger;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::sync::Arc;
use std::time::Instant;

/// Build the shared HTTP client from the transport settings
pub fn build_http_client(config: &RegistryConfig) -> Result<Client> {
    let transport = config.transport();

    Client::builder()
        .timeout(transport.request_timeout())
        .connect_timeout(transport.connect_timeout())
        .pool_max_idle_per_host(transport.pool_max_idle_per_host)
        .danger_accept_invalid_certs(transport.skip_tls)
        .build()
        .map_err(|e| RegistryError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Clone)]
pub struct RegistryEndpoint {
    client: Client,
    config: Arc<RegistryConfig>,
    output: Logger,
}

impl RegistryEndpoint {
    pub fn new(client: Client, config: Arc<RegistryConfig>, output: Logger) -> Self {
        Self {
            client,
            config,
            output,
        }
    }

    pub fn output(&self) -> &Logger {
        &self.output
    }

    /// Absolute URL for a path below `/v2/`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base(), path.trim_start_matches('/'))
    }

    /// Authenticated request with one `Accept` header per media type, in order
    pub fn request(&self, method: Method, url: &str, accept: &[&str]) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .basic_auth(self.config.username(), Some(self.config.password()));

        for media_type in accept {
            request = request.header(ACCEPT, *media_type);
        }

        request
    }

    /// Send a request, logging the round trip and categorising transport failures
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        accept: &[&str],
        operation: &str,
    ) -> Result<Response> {
        let started = Instant::now();
        self.output.request(method.as_str(), url);

        let response = self
            .request(method.clone(), url, accept)
            .send()
            .await
            .map_err(|e| {
                self.output.debug(&format!("{} failed: {}", operation, e));
                NetworkErrorHandler::handle_network_error(&e, operation)
            })?;

        self.output.response(
            method.as_str(),
            url,
            response.status().as_u16(),
            started.elapsed(),
        );

        Ok(response)
    }

    /// Read the full body of a response
    pub async fn read_body(response: Response, operation: &str) -> Result<Vec<u8>> {
        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, operation))?;
        Ok(body.to_vec())
    }
}

/// Reject empty path segments before they are formatted into a URL
pub fn require_segment(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidArgument(format!(
            "{} cannot be empty",
            what
        )));
    }
    Ok(())
}

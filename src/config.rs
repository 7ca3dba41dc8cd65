//! Configuration module for registry credentials and transport settings
//!
//! Credentials are read from a TOML file (`.credentials` by default):
//!
//! ```toml
//! nexus_host = "https://nexus.example.com"
//! nexus_username = "deployer"
//! nexus_password = "secret"
//! nexus_repository = "docker-private"
//! ```
//!
//! Transport settings are optional keys in the same file.

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const CREDENTIALS_FILE: &str = ".credentials";

pub const ENV_HOST: &str = "NEXUS_HOST";
pub const ENV_USERNAME: &str = "NEXUS_USERNAME";
pub const ENV_PASSWORD: &str = "NEXUS_PASSWORD";
pub const ENV_REPOSITORY: &str = "NEXUS_REPOSITORY";

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_pool_max_idle_per_host() -> usize {
    16
}

/// Connection pool and timeout settings for the shared HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(rename = "request_timeout_secs", default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(rename = "connect_timeout_secs", default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
    #[serde(default)]
    pub skip_tls: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            skip_tls: false,
        }
    }
}

impl TransportConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout == 0 {
            return Err(RegistryError::Configuration(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.connect_timeout == 0 {
            return Err(RegistryError::Configuration(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.pool_max_idle_per_host == 0 {
            return Err(RegistryError::Configuration(
                "pool_max_idle_per_host must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Registry host, credentials and repository namespace.
///
/// Immutable once loaded; the client only ever reads it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(rename = "nexus_host")]
    host: String,
    #[serde(rename = "nexus_username")]
    username: String,
    #[serde(rename = "nexus_password")]
    password: String,
    #[serde(rename = "nexus_repository")]
    repository: String,
    #[serde(flatten)]
    transport: TransportConfig,
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("repository", &self.repository)
            .field("transport", &self.transport)
            .finish()
    }
}

impl RegistryConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        repository: impl Into<String>,
    ) -> Result<Self> {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            repository: repository.into(),
            transport: TransportConfig::default(),
        }
        .normalized()
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Result<Self> {
        transport.validate()?;
        self.transport = transport;
        Ok(self)
    }

    /// Load `.credentials` from the working directory
    pub fn load_default() -> Result<Self> {
        Self::load(CREDENTIALS_FILE)
    }

    /// Load credentials from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RegistryError::Configuration(format!(
                "{} file not found",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RegistryConfig = toml::from_str(content)?;
        config.normalized()
    }

    /// Build from `NEXUS_HOST`, `NEXUS_USERNAME`, `NEXUS_PASSWORD` and `NEXUS_REPOSITORY`
    pub fn from_env() -> Result<Self> {
        let read = |key: &str| {
            env::var(key).map_err(|_| RegistryError::Configuration(format!("{} not set", key)))
        };

        Self::new(
            read(ENV_HOST)?,
            read(ENV_USERNAME)?,
            read(ENV_PASSWORD)?,
            read(ENV_REPOSITORY)?,
        )
    }

    fn normalized(mut self) -> Result<Self> {
        self.host = self.host.trim().trim_end_matches('/').to_string();
        self.repository = self.repository.trim().trim_matches('/').to_string();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(RegistryError::Configuration(
                "nexus_host cannot be empty".to_string(),
            ));
        }

        let url = Url::parse(&self.host)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RegistryError::Configuration(format!(
                "nexus_host must use http:// or https://, got {}",
                self.host
            )));
        }

        if self.repository.is_empty() {
            return Err(RegistryError::Configuration(
                "nexus_repository cannot be empty".to_string(),
            ));
        }

        self.transport.validate()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    /// Base of every registry URL: `{host}/repository/{repository}/v2`
    pub fn api_base(&self) -> String {
        format!("{}/repository/{}/v2", self.host, self.repository)
    }
}

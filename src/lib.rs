//! Nexus Registry Client Library
//!
//! This file serves as the library root for the nexus-registry-client crate,
//! organizing and exposing the modules behind the `nexus-registry` binary.

pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod image;
pub mod logging;
pub mod registry;

pub use config::{RegistryConfig, TransportConfig};
pub use digest::Digest;
pub use error::{RegistryError, Result};
pub use image::{LayerDescriptor, LegacyManifestInfo, ManifestV2};
pub use logging::Logger;
pub use registry::{ImageRegistry, RegistryClient, RegistryClientBuilder};

//! Registry module for Docker Registry HTTP API v2 interactions
//!
//! This module provides the [`RegistryClient`] for one Nexus-hosted Docker
//! repository: catalog and tag listing, manifest retrieval, creation metadata
//! from config blobs, and deletion by tag.

pub mod client;
pub mod endpoint;
pub mod operations;
pub mod transport;

pub use crate::config::RegistryConfig;
pub use client::{RegistryClient, RegistryClientBuilder};
pub use transport::ImageRegistry;

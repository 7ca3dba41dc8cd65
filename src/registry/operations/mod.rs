//! Registry operations grouped by resource
//!
//! Each group holds a clone of the same [`RegistryEndpoint`], so all of them
//! share one connection pool.
//!
//! [`RegistryEndpoint`]: crate::registry::endpoint::RegistryEndpoint

pub mod blob_operations;
pub mod manifest_operations;
pub mod repository_operations;

pub use blob_operations::BlobOperations;
pub use manifest_operations::ManifestOperations;
pub use repository_operations::RepositoryOperations;

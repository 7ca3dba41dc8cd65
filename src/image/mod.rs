//! Registry documents
//!
//! Typed forms of the JSON bodies the registry returns: the catalog, tag
//! lists, v2 manifests, and the config-blob fields used to derive legacy
//! creation metadata.

pub mod catalog;
pub mod manifest;

pub use catalog::{Catalog, TagList};
pub use manifest::{
    LayerDescriptor, LegacyManifestInfo, MANIFEST_V1_MEDIA_TYPE, MANIFEST_V2_MEDIA_TYPE,
    ManifestV2, parse_created,
};

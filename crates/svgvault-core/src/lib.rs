//! svgvault-core
//!
//! Shared domain types, the metadata extraction capability, configuration
//! and logging for the vault indexer and query engine.

#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::MetadataExtractor;
pub use types::{
    color_key, AssetMeta, AssetRecord, ColorCount, IndexStats, SearchFilters, VaultIndex,
    INDEX_VERSION, SIDECAR_FILE_NAME, TOP_COLORS,
};

//! svgvault-index
//!
//! Walks a vault directory, extracts structural metadata from each SVG,
//! persists the result as a sidecar JSON document and answers filtered
//! queries against it. See `index` and `search`; `handler` wraps both in the
//! request/response envelopes a UI transport expects.

pub mod extract;
pub mod handler;
pub mod index;
pub mod search;
pub mod sidecar;
pub mod walk;
#[cfg(feature = "xml")]
pub mod xml;

pub use extract::{default_extractor, PatternExtractor};
pub use handler::{IndexRequest, IndexResponse, SearchRequest, SearchResponse, VaultHandler};
pub use index::{index_vault, index_vault_with_stats, IndexOptions, VaultIndexer};
pub use search::{filter_index, search_vault, VaultSearchEngine};
#[cfg(feature = "xml")]
pub use xml::XmlExtractor;

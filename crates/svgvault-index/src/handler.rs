//! Request/response envelopes for a UI transport.
//!
//! Both handlers answer `{ success: true, .. }` or `{ success: false, error }`
//! and never return `Err`. Root validation happens here, at the boundary;
//! the search path below it treats a missing sidecar as an empty vault.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use svgvault_core::{SearchFilters, VaultIndex};

use crate::index::VaultIndexer;
use crate::search::VaultSearchEngine;

pub const INVALID_ROOT: &str = "Invalid rootDir";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexRequest {
    pub root_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub root_dir: String,
    pub query: Option<String>,
    pub filters: Option<SearchFilters>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<VaultIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IndexResponse {
    fn ok(index: VaultIndex) -> Self {
        Self { success: true, index: Some(index), error: None }
    }

    fn err(message: impl Into<String>) -> Self {
        Self { success: false, index: None, error: Some(message.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<VaultIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    fn ok(results: VaultIndex) -> Self {
        Self { success: true, results: Some(results), error: None }
    }

    fn err(message: impl Into<String>) -> Self {
        Self { success: false, results: None, error: Some(message.into()) }
    }
}

pub struct VaultHandler {
    indexer: VaultIndexer,
}

impl VaultHandler {
    pub fn new(indexer: VaultIndexer) -> Self {
        Self { indexer }
    }

    pub fn handle_index(&self, request: &IndexRequest) -> IndexResponse {
        let Some(root) = checked_root(&request.root_dir) else {
            return IndexResponse::err(INVALID_ROOT);
        };
        match self.indexer.index(&root) {
            Ok(index) => IndexResponse::ok(index),
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Index request failed");
                IndexResponse::err(e.to_string())
            }
        }
    }

    pub fn handle_search(&self, request: &SearchRequest) -> SearchResponse {
        let Some(root) = checked_root(&request.root_dir) else {
            return SearchResponse::err(INVALID_ROOT);
        };
        let engine = VaultSearchEngine::with_sidecar_name(root, self.indexer.options().sidecar_name.clone());
        let filters = request.filters.clone().unwrap_or_default();
        SearchResponse::ok(engine.search(request.query.as_deref(), &filters))
    }
}

/// The root as a path, if it names something that exists.
pub fn checked_root(root_dir: &str) -> Option<PathBuf> {
    if root_dir.trim().is_empty() {
        return None;
    }
    let root = PathBuf::from(root_dir);
    root.exists().then_some(root)
}

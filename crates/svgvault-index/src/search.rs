use std::path::{Path, PathBuf};
use tracing::debug;

use svgvault_core::{color_key, AssetRecord, SearchFilters, VaultIndex, SIDECAR_FILE_NAME};

use crate::sidecar;

/// Read-only query access to one vault's sidecar. Each query reloads the
/// sidecar, so results reflect the most recent completed index run.
pub struct VaultSearchEngine {
    root: PathBuf,
    sidecar_name: String,
}

impl VaultSearchEngine {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_sidecar_name(root, SIDECAR_FILE_NAME)
    }

    pub fn with_sidecar_name(root: impl Into<PathBuf>, sidecar_name: impl Into<String>) -> Self {
        Self { root: root.into(), sidecar_name: sidecar_name.into() }
    }

    /// The stored index, or an empty one when there is none.
    pub fn load(&self) -> VaultIndex {
        sidecar::load(&self.root, &self.sidecar_name)
    }

    pub fn search(&self, query: Option<&str>, filters: &SearchFilters) -> VaultIndex {
        let index = self.load();
        let total = index.count;
        let results = filter_index(index, query, filters);
        debug!(root = %self.root.display(), total, matched = results.count, "Vault search");
        results
    }
}

/// Search the sidecar under `root`. Never fails: a missing or unreadable
/// sidecar yields zero results.
pub fn search_vault(root: &Path, query: Option<&str>, filters: &SearchFilters) -> VaultIndex {
    VaultSearchEngine::new(root).search(query, filters)
}

/// Narrow `index.items` to the assets matching both the text query and every
/// given filter. `colors`, `createdAt`, `rootDir` and `version` pass through
/// untouched, so the palette still describes the whole vault.
pub fn filter_index(mut index: VaultIndex, query: Option<&str>, filters: &SearchFilters) -> VaultIndex {
    let predicate = Predicate::new(query, filters);
    let items = std::mem::take(&mut index.items);
    let matched = items.into_iter().filter(|item| predicate.matches(item)).collect();
    index.with_items(matched)
}

struct Predicate {
    text: String,
    min_paths: Option<usize>,
    max_paths: Option<usize>,
    fill: Option<String>,
    stroke: Option<String>,
}

impl Predicate {
    fn new(query: Option<&str>, filters: &SearchFilters) -> Self {
        Self {
            text: query.unwrap_or_default().trim().to_lowercase(),
            min_paths: filters.min_paths,
            max_paths: filters.max_paths,
            fill: filters.fill_key(),
            stroke: filters.stroke_key(),
        }
    }

    fn matches(&self, item: &AssetRecord) -> bool {
        self.matches_text(item) && self.matches_filters(item)
    }

    /// Substring match against the name, any tag, or any fill/stroke color.
    fn matches_text(&self, item: &AssetRecord) -> bool {
        let q = self.text.as_str();
        if q.is_empty() {
            return true;
        }
        item.name.to_lowercase().contains(q)
            || item.tags.iter().any(|t| t.to_lowercase().contains(q))
            || item.fills.iter().any(|c| color_key(c).contains(q))
            || item.strokes.iter().any(|c| color_key(c).contains(q))
    }

    fn matches_filters(&self, item: &AssetRecord) -> bool {
        if self.min_paths.is_some_and(|min| item.path_count < min) {
            return false;
        }
        if self.max_paths.is_some_and(|max| item.path_count > max) {
            return false;
        }
        if let Some(fill) = &self.fill {
            if !item.has_fill(fill) {
                return false;
            }
        }
        if let Some(stroke) = &self.stroke {
            if !item.has_stroke(stroke) {
                return false;
            }
        }
        true
    }
}

//! Domain types shared by the indexer and the query engine.
//!
//! Serialized field names follow the sidecar document layout (`rootDir`,
//! `createdAt`, `viewBox`, `pathCount`). Every struct deserializes with
//! defaults so that absent fields read as missing instead of failing.

use serde::{Deserialize, Serialize};

/// Schema version written into every sidecar.
pub const INDEX_VERSION: u32 = 1;

/// Sidecar filename written at the top of a vault root.
pub const SIDECAR_FILE_NAME: &str = ".svgwiz.index.json";

/// Number of entries kept in the global fill histogram.
pub const TOP_COLORS: usize = 24;

/// File extensions treated as assets when nothing else is configured.
pub const ASSET_EXTENSIONS: &[&str] = &["svg"];

/// Structural metadata extracted from one asset's markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMeta {
    pub width: Option<String>,
    pub height: Option<String>,
    pub view_box: Option<String>,
    pub path_count: usize,
    pub fills: Vec<String>,
    pub strokes: Vec<String>,
}

/// One discovered asset file.
///
/// - `id`: path relative to the vault root
/// - `file`: absolute path of the asset
/// - `tags`: slugs of up to three nearest enclosing directories
/// - `fills`/`strokes`: literal attribute values, trimmed and deduplicated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetRecord {
    pub id: String,
    pub file: String,
    pub name: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_box: Option<String>,
    pub path_count: usize,
    pub fills: Vec<String>,
    pub strokes: Vec<String>,
}

impl AssetRecord {
    pub fn from_meta(id: String, file: String, name: String, tags: Vec<String>, meta: AssetMeta) -> Self {
        Self {
            id,
            file,
            name,
            tags,
            width: meta.width,
            height: meta.height,
            view_box: meta.view_box,
            path_count: meta.path_count,
            fills: meta.fills,
            strokes: meta.strokes,
        }
    }

    pub fn has_fill(&self, key: &str) -> bool {
        self.fills.iter().any(|c| color_key(c) == key)
    }

    pub fn has_stroke(&self, key: &str) -> bool {
        self.strokes.iter().any(|c| color_key(c) == key)
    }
}

/// A histogram entry: color key and the number of assets using it as a fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorCount {
    pub color: String,
    pub count: usize,
}

/// The persisted index of one vault root. Search results share this shape,
/// with `items` and `count` narrowed to the matching subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultIndex {
    pub version: u32,
    pub root_dir: String,
    /// Epoch milliseconds of the build; 0 for an index that was never built.
    pub created_at: i64,
    pub count: usize,
    pub colors: Vec<ColorCount>,
    pub items: Vec<AssetRecord>,
}

impl VaultIndex {
    pub fn empty(root_dir: impl Into<String>) -> Self {
        Self {
            version: INDEX_VERSION,
            root_dir: root_dir.into(),
            created_at: 0,
            count: 0,
            colors: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Replace the item list, keeping `count` in step with it.
    pub fn with_items(mut self, items: Vec<AssetRecord>) -> Self {
        self.count = items.len();
        self.items = items;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Structured search constraints. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_paths: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

impl SearchFilters {
    /// Color key of the fill constraint, if one with content was given.
    pub fn fill_key(&self) -> Option<String> {
        self.fill.as_deref().map(color_key).filter(|k| !k.is_empty())
    }

    pub fn stroke_key(&self) -> Option<String> {
        self.stroke.as_deref().map(color_key).filter(|k| !k.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.min_paths.is_none()
            && self.max_paths.is_none()
            && self.fill_key().is_none()
            && self.stroke_key().is_none()
    }
}

/// Counters for one indexing run. Not part of the persisted document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub files_seen: usize,
    pub files_indexed: usize,
    pub files_skipped: usize,
    pub dirs_skipped: usize,
}

/// Normalized form of a color value used for aggregation and matching.
pub fn color_key(color: &str) -> String {
    color.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_key_trims_and_lowercases() {
        assert_eq!(color_key("  #FFF "), "#fff");
        assert_eq!(color_key("Red"), "red");
        assert_eq!(color_key(""), "");
    }

    #[test]
    fn blank_color_filters_are_treated_as_absent() {
        let filters = SearchFilters { fill: Some("   ".into()), stroke: Some(String::new()), ..Default::default() };
        assert_eq!(filters.fill_key(), None);
        assert_eq!(filters.stroke_key(), None);
        assert!(filters.is_empty());
    }

    #[test]
    fn asset_record_omits_absent_attributes() {
        let record = AssetRecord { id: "a.svg".into(), name: "a.svg".into(), path_count: 2, ..Default::default() };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("width").is_none());
        assert!(json.get("viewBox").is_none());
        assert_eq!(json["pathCount"], 2);
    }

    #[test]
    fn index_reads_partial_documents() {
        let index: VaultIndex = serde_json::from_str(r#"{"rootDir":"/v","items":[{"name":"x.svg","extra":true}]}"#).unwrap();
        assert_eq!(index.root_dir, "/v");
        assert_eq!(index.items.len(), 1);
        assert_eq!(index.items[0].path_count, 0);
        assert!(index.items[0].fills.is_empty());
        assert!(index.colors.is_empty());
    }

    #[test]
    fn with_items_keeps_count_in_step() {
        let items = vec![AssetRecord::default(), AssetRecord::default()];
        let index = VaultIndex::empty("/v").with_items(items);
        assert_eq!(index.count, 2);
        assert_eq!(index.len(), 2);
    }
}

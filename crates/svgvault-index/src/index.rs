use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use svgvault_core::config::VaultSettings;
use svgvault_core::{
    color_key, AssetRecord, ColorCount, Error, IndexStats, MetadataExtractor, Result, VaultIndex,
    INDEX_VERSION,
};

use crate::extract::default_extractor;
use crate::sidecar;
use crate::walk::{collect_asset_files, derive_tags};

#[derive(Debug, Clone, PartialEq)]
pub struct IndexOptions {
    pub sidecar_name: String,
    pub extensions: Vec<String>,
    pub top_colors: usize,
    /// Write the sidecar after building. Turned off for dry runs.
    pub persist: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self::from(&VaultSettings::default())
    }
}

impl From<&VaultSettings> for IndexOptions {
    fn from(settings: &VaultSettings) -> Self {
        Self {
            sidecar_name: settings.sidecar_name.clone(),
            extensions: settings.extensions.clone(),
            top_colors: settings.top_colors,
            persist: true,
        }
    }
}

/// Builds a full [`VaultIndex`] for a root directory. Every run rebuilds the
/// index from scratch and replaces the sidecar.
pub struct VaultIndexer {
    options: IndexOptions,
    extractor: Box<dyn MetadataExtractor>,
}

impl VaultIndexer {
    pub fn new() -> Result<Self> {
        Self::with_options(IndexOptions::default())
    }

    pub fn with_options(options: IndexOptions) -> Result<Self> {
        Ok(Self::with_extractor(options, default_extractor()?))
    }

    pub fn with_extractor(options: IndexOptions, extractor: Box<dyn MetadataExtractor>) -> Self {
        Self { options, extractor }
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    pub fn index(&self, root: &Path) -> Result<VaultIndex> {
        self.index_with_stats(root).map(|(index, _)| index)
    }

    /// Index `root`, also reporting how many files and directories were
    /// skipped. Fails only when `root` is not an existing directory.
    pub fn index_with_stats(&self, root: &Path) -> Result<(VaultIndex, IndexStats)> {
        let root = validate_root(root)?;
        let walk = collect_asset_files(&root, &self.options.extensions);
        let mut stats = IndexStats {
            files_seen: walk.files.len(),
            dirs_skipped: walk.dirs_skipped,
            ..Default::default()
        };
        info!(root = %root.display(), files = stats.files_seen, strategy = self.extractor_name(), "Indexing vault");

        let mut histogram = ColorHistogram::default();
        let mut items = Vec::with_capacity(walk.files.len());
        for path in &walk.files {
            match self.read_asset(&root, path) {
                Ok(record) => {
                    histogram.add_all(&record.fills);
                    items.push(record);
                    stats.files_indexed += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable asset");
                    stats.files_skipped += 1;
                }
            }
        }

        let index = VaultIndex {
            version: INDEX_VERSION,
            root_dir: root.to_string_lossy().into_owned(),
            created_at: Utc::now().timestamp_millis(),
            count: 0,
            colors: histogram.top(self.options.top_colors),
            items: Vec::new(),
        }
        .with_items(items);

        if self.options.persist {
            if let Err(e) = sidecar::save(&root, &self.options.sidecar_name, &index) {
                warn!(root = %root.display(), error = %e, "Could not persist vault index");
            }
        }
        info!(
            items = index.count,
            colors = index.colors.len(),
            files_skipped = stats.files_skipped,
            dirs_skipped = stats.dirs_skipped,
            "Vault indexing complete"
        );
        Ok((index, stats))
    }

    fn read_asset(&self, root: &Path, path: &Path) -> Result<AssetRecord> {
        let markup = read_markup(path)?;
        let meta = self.extractor.extract(&markup);
        let relative = path.strip_prefix(root).unwrap_or(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(id = %relative.display(), paths = meta.path_count, "Extracted asset metadata");
        Ok(AssetRecord::from_meta(
            relative.to_string_lossy().into_owned(),
            path.to_string_lossy().into_owned(),
            name,
            derive_tags(relative),
            meta,
        ))
    }
}

/// Index `root` with default options and persist the sidecar.
pub fn index_vault(root: &Path) -> Result<VaultIndex> {
    VaultIndexer::new()?.index(root)
}

pub fn index_vault_with_stats(root: &Path) -> Result<(VaultIndex, IndexStats)> {
    VaultIndexer::new()?.index_with_stats(root)
}

fn validate_root(root: &Path) -> Result<PathBuf> {
    if root.as_os_str().is_empty() || !root.is_dir() {
        return Err(Error::InvalidRoot(root.display().to_string()));
    }
    Ok(std::path::absolute(root)?)
}

/// Read markup as text. Invalid UTF-8 is replaced rather than rejected and a
/// leading byte-order mark is dropped.
fn read_markup(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Fill usage counted per color key. Keys keep first-seen order so ties
/// rank by discovery.
#[derive(Debug, Default)]
struct ColorHistogram {
    entries: Vec<(String, usize)>,
    slots: HashMap<String, usize>,
}

impl ColorHistogram {
    fn add(&mut self, color: &str) {
        let key = color_key(color);
        match self.slots.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    fn add_all(&mut self, colors: &[String]) {
        for color in colors {
            self.add(color);
        }
    }

    fn top(self, n: usize) -> Vec<ColorCount> {
        let mut entries = self.entries;
        // stable: equal counts keep discovery order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
            .into_iter()
            .map(|(color, count)| ColorCount { color, count })
            .collect()
    }
}

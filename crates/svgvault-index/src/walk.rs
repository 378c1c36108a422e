use std::path::{Component, Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Files found under a vault root, plus how many entries could not be read.
#[derive(Debug, Default)]
pub struct AssetWalk {
    pub files: Vec<PathBuf>,
    pub dirs_skipped: usize,
}

/// Recursively list asset files below `root`.
///
/// Symlinks are not followed. Entries are visited in file-name order so an
/// unchanged tree always yields the same list. A directory that cannot be
/// listed is logged and skipped; its siblings are still visited.
pub fn collect_asset_files(root: &Path, extensions: &[String]) -> AssetWalk {
    let mut walk = AssetWalk::default();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_asset_extension(entry.path(), extensions) {
                    walk.files.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                warn!(path = %path, error = %e, "Skipping unreadable directory");
                walk.dirs_skipped += 1;
            }
        }
    }
    walk
}

pub fn has_asset_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.trim().trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Tags for an asset from its path relative to the vault root: the slugs of
/// the (up to) three nearest enclosing directories, outermost first.
pub fn derive_tags(relative_file: &Path) -> Vec<String> {
    let dirs: Vec<String> = relative_file
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let nearest = &dirs[dirs.len().saturating_sub(3)..];
    nearest
        .iter()
        .map(|d| slugify(d))
        .filter(|slug| !slug.is_empty())
        .collect()
}

/// Collapse every run of non-alphanumeric characters to one `-` and
/// lower-case the rest.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_gap = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

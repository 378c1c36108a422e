use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use svgvault_core::{Result, VaultIndex, INDEX_VERSION};

pub fn sidecar_path(root: &Path, sidecar_name: &str) -> PathBuf {
    root.join(sidecar_name)
}

/// Write the index next to the assets. The document is written to a
/// temporary sibling first and renamed into place, so readers never observe
/// a half-written sidecar.
pub fn save(root: &Path, sidecar_name: &str, index: &VaultIndex) -> Result<PathBuf> {
    let path = sidecar_path(root, sidecar_name);
    let tmp = root.join(format!("{}.tmp", sidecar_name));
    let json = serde_json::to_string_pretty(index)?;
    fs::write(&tmp, json)?;
    if let Err(e) = fs::rename(&tmp, &path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    debug!(path = %path.display(), items = index.count, "Wrote vault sidecar");
    Ok(path)
}

/// Load the sidecar for `root`. Anything short of a readable, well-formed
/// document of a supported version reads as an empty vault.
pub fn load(root: &Path, sidecar_name: &str) -> VaultIndex {
    match try_load(root, sidecar_name) {
        Ok(Some(index)) => index,
        Ok(None) => VaultIndex::empty(root.to_string_lossy()),
        Err(e) => {
            warn!(root = %root.display(), error = %e, "Unreadable vault sidecar, treating vault as empty");
            VaultIndex::empty(root.to_string_lossy())
        }
    }
}

fn try_load(root: &Path, sidecar_name: &str) -> Result<Option<VaultIndex>> {
    let path = sidecar_path(root, sidecar_name);
    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut index: VaultIndex = serde_json::from_str(&json)?;
    if index.version > INDEX_VERSION {
        warn!(path = %path.display(), version = index.version, supported = INDEX_VERSION, "Sidecar written by a newer schema, ignoring");
        return Ok(None);
    }
    index.count = index.items.len();
    Ok(Some(index))
}

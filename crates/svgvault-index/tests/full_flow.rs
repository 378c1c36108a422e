use std::fs;
use std::path::Path;
use tempfile::TempDir;

use svgvault_core::{SearchFilters, VaultIndex, SIDECAR_FILE_NAME};
use svgvault_index::{index_vault, index_vault_with_stats, search_vault, VaultSearchEngine};

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

fn sample_vault() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "ui/star-icon.svg", r##"<svg width="24" height="24" viewBox="0 0 24 24"><path fill="#FF0000" d="M0"/></svg>"##);
    write(root, "space/stars/sun.svg", r##"<svg viewBox="0 0 8 8"><path fill="#ff0000 "/><path/><path stroke="#000"/></svg>"##);
    write(root, "space/nebula.svg", r##"<svg><circle fill="starlight"/><path/><path/><path/><path/><path/><path/><path/></svg>"##);
    write(root, "misc/moon.svg", r##"<svg><rect fill="#00f"/></svg>"##);
    write(root, "misc/readme.md", "# not an asset");
    tmp
}

fn names(index: &VaultIndex) -> Vec<&str> {
    let mut names: Vec<&str> = index.items.iter().map(|i| i.name.as_str()).collect();
    names.sort();
    names
}

#[test]
fn index_counts_every_asset_and_persists() {
    let vault = sample_vault();
    let index = index_vault(vault.path()).expect("index");
    assert_eq!(index.count, 4);
    assert_eq!(index.items.len(), 4);
    assert!(vault.path().join(SIDECAR_FILE_NAME).exists());

    let by_name = |n: &str| index.items.iter().find(|i| i.name == n).unwrap();
    assert_eq!(by_name("star-icon.svg").path_count, 1);
    assert_eq!(by_name("sun.svg").path_count, 3);
    assert_eq!(by_name("nebula.svg").path_count, 7);
    assert_eq!(by_name("moon.svg").path_count, 0);
    assert_eq!(by_name("sun.svg").tags, vec!["space", "stars"]);
    assert_eq!(by_name("sun.svg").strokes, vec!["#000"]);
}

#[test]
fn colors_are_ranked_fill_keys() {
    let vault = sample_vault();
    let index = index_vault(vault.path()).expect("index");
    assert_eq!(index.colors.len(), 3);
    assert_eq!(index.colors[0].color, "#ff0000");
    assert_eq!(index.colors[0].count, 2);
    assert!(index.colors.windows(2).all(|w| w[0].count >= w[1].count));
    assert!(index.colors.iter().all(|c| c.color != "#000"), "strokes stay out of the histogram");
}

#[test]
fn reindexing_unchanged_tree_is_stable() {
    let vault = sample_vault();
    let first = index_vault(vault.path()).expect("first");
    let second = index_vault(vault.path()).expect("second");
    assert_eq!(first.items, second.items);
    assert_eq!(first.colors, second.colors);
    assert_eq!(first.count, second.count);
}

#[test]
fn empty_query_returns_stored_items() {
    let vault = sample_vault();
    let stored = index_vault(vault.path()).expect("index");
    let all = search_vault(vault.path(), Some(""), &SearchFilters::default());
    assert_eq!(all.count, stored.count);
    assert_eq!(all.items, stored.items);
    assert_eq!(all.created_at, stored.created_at);
}

#[test]
fn text_query_spans_name_tag_and_color() {
    let vault = sample_vault();
    index_vault(vault.path()).expect("index");
    let hits = search_vault(vault.path(), Some("star"), &SearchFilters::default());
    assert_eq!(names(&hits), vec!["nebula.svg", "star-icon.svg", "sun.svg"]);
    assert_eq!(hits.count, 3);
    assert_eq!(hits.colors.len(), 3, "palette describes the whole vault");
}

#[test]
fn structured_filters_narrow_results() {
    let vault = sample_vault();
    index_vault(vault.path()).expect("index");

    let filters = SearchFilters { min_paths: Some(2), max_paths: Some(5), ..Default::default() };
    assert_eq!(names(&search_vault(vault.path(), None, &filters)), vec!["sun.svg"]);

    let filters = SearchFilters { fill: Some("#FF0000".into()), ..Default::default() };
    assert_eq!(names(&search_vault(vault.path(), None, &filters)), vec!["star-icon.svg", "sun.svg"]);

    let filters = SearchFilters { fill: Some("#ff0000".into()), stroke: Some("#000".into()), ..Default::default() };
    assert_eq!(names(&search_vault(vault.path(), Some("sun"), &filters)), vec!["sun.svg"]);
}

#[test]
fn unindexed_root_searches_empty() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.svg", "<svg/>");
    let results = search_vault(tmp.path(), Some("a"), &SearchFilters::default());
    assert_eq!(results.count, 0);
    assert!(results.items.is_empty());

    let missing = VaultSearchEngine::new(tmp.path().join("gone")).search(None, &SearchFilters::default());
    assert_eq!(missing.count, 0);
}

#[test]
fn nesting_depth_changes_tags() {
    let shallow = TempDir::new().unwrap();
    let deep = TempDir::new().unwrap();
    write(shallow.path(), "Icons/arrow.svg", "<svg/>");
    write(deep.path(), "Library/2024/Icons/Line Art/arrow.svg", "<svg/>");

    let a = index_vault(shallow.path()).expect("shallow");
    let b = index_vault(deep.path()).expect("deep");
    assert_eq!(a.items[0].tags, vec!["icons"]);
    assert_eq!(b.items[0].tags, vec!["2024", "icons", "line-art"]);
    assert_eq!(a.items[0].name, b.items[0].name);
}

#[test]
fn many_assets_stay_in_memory() {
    // The whole item list is held in memory; this only documents that a few
    // hundred assets index and search without issue.
    let tmp = TempDir::new().unwrap();
    for i in 0..300 {
        let fill = if i % 3 == 0 { "#111" } else { "#222" };
        write(tmp.path(), &format!("set{}/icon-{i}.svg", i % 10), &format!(r#"<svg><path fill="{fill}"/></svg>"#));
    }
    let (index, stats) = index_vault_with_stats(tmp.path()).expect("index");
    assert_eq!(index.count, 300);
    assert_eq!(stats.files_seen, 300);
    assert_eq!(index.colors[0].color, "#222");
    assert_eq!(index.colors[0].count, 200);

    let hits = search_vault(tmp.path(), Some("#111"), &SearchFilters::default());
    assert_eq!(hits.count, 100);
}

#[cfg(unix)]
#[test]
fn unreadable_subtree_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "open/a.svg", "<svg/>");
    write(tmp.path(), "locked/b.svg", "<svg/>");
    let locked = tmp.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can still list the directory; nothing to check then.
    let still_readable = fs::read_dir(&locked).is_ok();

    let result = index_vault_with_stats(tmp.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let (index, stats) = result.expect("index");

    if !still_readable {
        assert_eq!(index.count, 1);
        assert_eq!(index.items[0].name, "a.svg");
        assert_eq!(stats.dirs_skipped, 1);
    }
}

//! Build inputs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One stylesheet presented to the build.
///
/// Carries what the surrounding build tool knows about an input: where it
/// is, its name without the extension, and where it sits relative to the
/// reference root (used when outputs mirror the source tree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// File name without extension.
    pub file_stem: String,
    /// Directory of the file relative to the reference root.
    pub relative_dir: PathBuf,
}

impl SourceItem {
    /// Describe one file relative to `root`. Returns `None` for paths
    /// without a representable file stem.
    pub fn from_path(path: &Path, root: &Path) -> Option<Self> {
        let file_stem = path.file_stem()?.to_str()?.to_string();
        let relative_dir = path
            .parent()
            .and_then(|dir| dir.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Some(Self {
            path: path.to_path_buf(),
            file_stem,
            relative_dir,
        })
    }
}

/// Recursively find all `.less` files under `root`, in walk order.
pub fn discover(root: &Path) -> Vec<SourceItem> {
    let items: Vec<SourceItem> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("less"))
        .filter_map(|entry| SourceItem::from_path(entry.path(), root))
        .collect();

    debug!(root = %root.display(), count = items.len(), "discovered stylesheets");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_from_path_fills_relative_dir() {
        let item = SourceItem::from_path(
            Path::new("/project/themes/dark/app.less"),
            Path::new("/project"),
        )
        .unwrap();

        assert_eq!(item.file_stem, "app");
        assert_eq!(item.relative_dir, Path::new("themes/dark"));
    }

    #[test]
    fn test_discover_finds_nested_stylesheets() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("themes/dark")).unwrap();
        fs::write(dir.path().join("app.less"), "").unwrap();
        fs::write(dir.path().join("themes/dark/app.less"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let items = discover(dir.path());

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.file_stem == "app"));
    }
}

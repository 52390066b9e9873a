//! Compiled output removal

use crate::item::SourceItem;
use crate::output::OutputNaming;
use std::fs;
use tracing::{error, info};

/// Delete the computed output of every item. Outputs that do not exist
/// are ignored; a failed deletion is logged and flips the returned flag
/// but never stops the sweep.
pub fn clean_outputs(items: &[SourceItem], naming: &OutputNaming) -> bool {
    let mut success = true;

    for item in items {
        let output = naming.output_path(item);
        if !output.exists() {
            continue;
        }
        match fs::remove_file(&output) {
            Ok(()) => info!(output = %output.display(), "removed"),
            Err(err) => {
                error!(output = %output.display(), "cannot remove: {err}");
                success = false;
            }
        }
    }

    success
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_clean_removes_only_computed_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(out_dir.join("app.css"), "").unwrap();
        fs::write(out_dir.join("unrelated.css"), "").unwrap();

        let items = vec![
            SourceItem {
                path: dir.path().join("app.less"),
                file_stem: "app".to_string(),
                relative_dir: PathBuf::new(),
            },
            // No output on disk for this one; tolerated.
            SourceItem {
                path: dir.path().join("theme.less"),
                file_stem: "theme".to_string(),
                relative_dir: PathBuf::new(),
            },
        ];

        assert!(clean_outputs(&items, &OutputNaming::new(&out_dir)));
        assert!(!out_dir.join("app.css").exists());
        assert!(out_dir.join("unrelated.css").exists());
    }
}

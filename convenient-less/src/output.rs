//! Output path construction

use crate::item::SourceItem;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where compiled files land and what they are called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputNaming {
    /// Directory all outputs are placed under.
    pub output_dir: PathBuf,
    /// Mirror each input's relative directory under `output_dir` instead
    /// of flattening everything into it.
    pub keep_relative_dir: bool,
    /// Extension of compiled files, dot included.
    pub extension: String,
}

impl OutputNaming {
    /// Flat naming into `output_dir` with a `.css` extension.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            keep_relative_dir: false,
            extension: ".css".to_string(),
        }
    }

    /// Computed output path for one input.
    pub fn output_path(&self, item: &SourceItem) -> PathBuf {
        let file_name = format!("{}{}", item.file_stem, self.extension);
        if self.keep_relative_dir {
            self.output_dir.join(&item.relative_dir).join(file_name)
        } else {
            self.output_dir.join(file_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn item() -> SourceItem {
        SourceItem {
            path: PathBuf::from("/project/themes/dark/app.less"),
            file_stem: "app".to_string(),
            relative_dir: PathBuf::from("themes/dark"),
        }
    }

    #[test]
    fn test_flat_naming() {
        let naming = OutputNaming::new("/out");

        assert_eq!(naming.output_path(&item()), Path::new("/out/app.css"));
    }

    #[test]
    fn test_relative_preserving_naming() {
        let naming = OutputNaming {
            output_dir: PathBuf::from("/out"),
            keep_relative_dir: true,
            extension: ".css".to_string(),
        };

        assert_eq!(
            naming.output_path(&item()),
            Path::new("/out/themes/dark/app.css")
        );
    }

    #[test]
    fn test_custom_extension() {
        let naming = OutputNaming {
            extension: ".min.css".to_string(),
            ..OutputNaming::new("/out")
        };

        assert_eq!(naming.output_path(&item()), Path::new("/out/app.min.css"));
    }
}

//! Fallback in-process engine

use convenient_less::{EngineOptions, LessEngine};
use std::path::Path;

/// Engine that passes stylesheet text through unchanged.
///
/// Stands in where no real LESS engine is linked, so the embedded backend
/// can be driven end to end; library consumers supply their own
/// [`LessEngine`] implementation for actual compilation. Options are
/// accepted for interface parity, but only `minify` has an effect
/// (whitespace folding, not a real minifier).
pub struct IdentityEngine {
    options: EngineOptions,
}

impl IdentityEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }
}

impl LessEngine for IdentityEngine {
    fn transform(&mut self, text: &str, _path: &Path, _base_dir: &Path) -> Result<String, String> {
        if self.options.minify {
            Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
        } else {
            Ok(text.to_string())
        }
    }

    fn reset_imports(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_by_default() {
        let mut engine = IdentityEngine::new(EngineOptions::default());
        let css = engine
            .transform("body { color: red; }", Path::new("a.less"), Path::new("."))
            .unwrap();

        assert_eq!(css, "body { color: red; }");
    }

    #[test]
    fn test_minify_folds_whitespace() {
        let mut engine = IdentityEngine::new(EngineOptions {
            minify: true,
            ..EngineOptions::default()
        });
        let css = engine
            .transform("body {\n  color: red;\n}\n", Path::new("a.less"), Path::new("."))
            .unwrap();

        assert_eq!(css, "body { color: red; }");
    }
}

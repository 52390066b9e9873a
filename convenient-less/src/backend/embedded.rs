//! In-process compile backend

use super::{CompileBackend, CompileError, CompileInput};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Engine configuration, fixed for the lifetime of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Strip whitespace from the compiled output.
    pub minify: bool,
    /// Annotate the output with source line information.
    pub debug: bool,
    /// Leave urls exactly as written instead of rewriting them relative
    /// to the output.
    pub disable_url_rewriting: bool,
    /// Treat every imported file as LESS regardless of its extension.
    pub import_all_files_as_less: bool,
    /// Embed imported CSS files into the output.
    pub inline_css_files: bool,
    /// Reject redefinition of variables.
    pub disable_variable_redefines: bool,
    /// Keep the first `/*!` comment in the output.
    pub keep_first_special_comment: bool,
}

/// An in-process LESS-to-CSS transformation.
///
/// Engines are constructed once per run from one [`EngineOptions`] and may
/// keep import bookkeeping between calls; the backend resets that state
/// after every file so unrelated inputs cannot contaminate each other.
///
/// `base_dir` is the directory relative imports and urls resolve against.
/// It is passed explicitly per call; engines must not depend on the
/// process-wide working directory.
pub trait LessEngine {
    fn transform(&mut self, text: &str, path: &Path, base_dir: &Path) -> Result<String, String>;

    /// Clear import state retained from the previous transform.
    fn reset_imports(&mut self);
}

/// Compile backend driving an in-process [`LessEngine`].
///
/// Not safe to share across files running concurrently: the engine keeps
/// cross-call state and every compile mutates it. The orchestrator runs
/// files sequentially, which is the supported mode for this backend.
pub struct EmbeddedBackend {
    engine: Box<dyn LessEngine>,
}

impl EmbeddedBackend {
    pub fn new(engine: Box<dyn LessEngine>) -> Self {
        Self { engine }
    }
}

impl CompileBackend for EmbeddedBackend {
    fn compile(&mut self, input: &CompileInput<'_>, output: &Path) -> Result<(), CompileError> {
        let result = self
            .engine
            .transform(input.text, input.path, input.directory);

        // Import state from this file must not leak into the next one,
        // whether the transform succeeded or not.
        self.engine.reset_imports();

        let css = result.map_err(CompileError::Engine)?;

        // The whole transform completes before anything is written, so a
        // failed compile leaves no partial output behind.
        fs::write(output, css).map_err(|source| CompileError::Output {
            path: output.to_path_buf(),
            source,
        })?;

        debug!(output = %output.display(), "wrote compiled stylesheet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        transforms: usize,
        resets: usize,
    }

    struct CountingEngine {
        calls: Rc<RefCell<Calls>>,
        fail: bool,
    }

    impl LessEngine for CountingEngine {
        fn transform(
            &mut self,
            text: &str,
            _path: &Path,
            _base_dir: &Path,
        ) -> Result<String, String> {
            self.calls.borrow_mut().transforms += 1;
            if self.fail {
                Err("boom".to_string())
            } else {
                Ok(text.to_uppercase())
            }
        }

        fn reset_imports(&mut self) {
            self.calls.borrow_mut().resets += 1;
        }
    }

    #[test]
    fn test_output_written_after_successful_transform() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("app.less");
        let output = dir.path().join("app.css");
        std::fs::write(&source, "body {}").unwrap();

        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut backend = EmbeddedBackend::new(Box::new(CountingEngine {
            calls: Rc::clone(&calls),
            fail: false,
        }));

        let input = CompileInput {
            path: &source,
            text: "body {}",
            directory: dir.path(),
        };
        backend.compile(&input, &output).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "BODY {}");
        assert_eq!(calls.borrow().resets, 1);
    }

    #[test]
    fn test_failed_transform_writes_nothing_and_still_resets() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("app.less");
        let output = dir.path().join("app.css");
        std::fs::write(&source, "body {").unwrap();

        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut backend = EmbeddedBackend::new(Box::new(CountingEngine {
            calls: Rc::clone(&calls),
            fail: true,
        }));

        let input = CompileInput {
            path: &source,
            text: "body {",
            directory: dir.path(),
        };
        let err = backend.compile(&input, &output).unwrap_err();

        assert!(matches!(err, CompileError::Engine(_)));
        assert!(!output.exists());
        assert_eq!(calls.borrow().resets, 1);
    }
}

//! Compile backends
//!
//! One contract, two implementations selected by configuration:
//! [`embedded::EmbeddedBackend`] drives an in-process engine, and
//! [`external::LesscBackend`] spawns the node-based `lessc` compiler as a
//! separate process per file.

pub mod embedded;
pub mod external;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors a backend can report for a single input file
#[derive(Debug, Error)]
pub enum CompileError {
    /// The in-process engine rejected the stylesheet.
    #[error("engine error: {0}")]
    Engine(String),

    /// The external compiler reported errors on its error stream.
    #[error("{0}")]
    Failed(String),

    /// The external compiler process could not be started or awaited.
    #[error("failed to run {program}: {source}")]
    Process {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The compiled output could not be written.
    #[error("cannot write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One source file as presented to a backend.
#[derive(Debug, Clone, Copy)]
pub struct CompileInput<'a> {
    /// Absolute path of the source file.
    pub path: &'a Path,
    /// Full text of the source file.
    pub text: &'a str,
    /// Directory containing the source file. Relative imports and urls
    /// resolve against it.
    pub directory: &'a Path,
}

/// Text-to-text stylesheet compiler behind the orchestrator.
///
/// On `Ok` the compiled output exists at `output` (or the call was an
/// intentional no-op, see the lessc backend's duplicate-error
/// suppression). On `Err` no partially written output file is left
/// behind.
pub trait CompileBackend {
    fn compile(&mut self, input: &CompileInput<'_>, output: &Path) -> Result<(), CompileError>;
}

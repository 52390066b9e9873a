//! Build orchestration
//!
//! Drives a batch of inputs through output-path computation, staleness
//! checking and compilation. Every file is processed independently: one
//! file's failure is logged, recorded in the report and never aborts the
//! rest of the batch.

use crate::backend::{CompileBackend, CompileError, CompileInput};
use crate::item::SourceItem;
use crate::output::OutputNaming;
use crate::staleness::{StalenessError, StalenessResolver};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// Result of one input file within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompileOutcome {
    /// Output was already newer than the input and all of its transitive
    /// imports.
    Skipped,
    Succeeded,
    Failed(String),
}

impl CompileOutcome {
    /// Skipped and succeeded both count as non-failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, CompileOutcome::Failed(_))
    }
}

/// One input's outcome, paired with the paths involved.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: CompileOutcome,
}

/// Per-run summary: every input's outcome, in input order, plus counts.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<FileOutcome>,
    pub compiled: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BuildReport {
    /// Logical AND across the batch; skipped files count as success.
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Everything that can go wrong while processing one file. Contained at
/// the per-file boundary and turned into a [`CompileOutcome::Failed`].
#[derive(Debug, Error)]
enum FileError {
    #[error(transparent)]
    Staleness(#[from] StalenessError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Iterates a batch of inputs, recompiling the stale ones.
pub struct BuildOrchestrator {
    naming: OutputNaming,
    force: bool,
}

impl BuildOrchestrator {
    pub fn new(naming: OutputNaming) -> Self {
        Self {
            naming,
            force: false,
        }
    }

    /// Recompile every input regardless of timestamps.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Process `items` in order with one backend instance.
    ///
    /// The staleness memo lives exactly as long as this call; the backend
    /// should equally be fresh per run (the lessc backend's error dedupe
    /// set is scoped to the instance).
    pub fn run(&self, items: &[SourceItem], backend: &mut dyn CompileBackend) -> BuildReport {
        let started_at = Utc::now();
        let mut resolver = StalenessResolver::new();
        let mut outcomes = Vec::with_capacity(items.len());
        let (mut compiled, mut skipped, mut failed) = (0usize, 0usize, 0usize);

        for item in items {
            let output = self.naming.output_path(item);
            let outcome = match self.process(item, &output, &mut resolver, backend) {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(input = %item.path.display(), "{err}");
                    CompileOutcome::Failed(err.to_string())
                }
            };

            match &outcome {
                CompileOutcome::Skipped => skipped += 1,
                CompileOutcome::Succeeded => compiled += 1,
                CompileOutcome::Failed(_) => failed += 1,
            }

            outcomes.push(FileOutcome {
                input: item.path.clone(),
                output,
                outcome,
            });
        }

        info!(compiled, skipped, failed, "build finished");

        BuildReport {
            started_at,
            outcomes,
            compiled,
            skipped,
            failed,
        }
    }

    fn process(
        &self,
        item: &SourceItem,
        output: &Path,
        resolver: &mut StalenessResolver,
        backend: &mut dyn CompileBackend,
    ) -> Result<CompileOutcome, FileError> {
        // A missing output and a stale output are the same thing: compile.
        let should_run = if self.force || !output.exists() {
            true
        } else {
            let reference = fs::metadata(output)
                .and_then(|metadata| metadata.modified())
                .map_err(|source| FileError::FileAccess {
                    path: output.to_path_buf(),
                    source,
                })?;
            resolver.is_stale(&item.path, reference)?
        };

        if !should_run {
            info!(input = %item.path.display(), "up to date, skipping");
            return Ok(CompileOutcome::Skipped);
        }

        let text = fs::read_to_string(&item.path).map_err(|source| FileError::FileAccess {
            path: item.path.clone(),
            source,
        })?;
        let directory = item
            .path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|source| FileError::FileAccess {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        info!("Compiling: {} to {}", item.path.display(), output.display());

        let input = CompileInput {
            path: &item.path,
            text: &text,
            directory: &directory,
        };
        backend.compile(&input, output)?;

        info!("[Done]");
        Ok(CompileOutcome::Succeeded)
    }
}

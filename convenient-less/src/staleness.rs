//! Dependency-aware staleness resolution
//!
//! Decides whether a stylesheet needs recompiling by comparing its own
//! modification time, and the modification times of everything it
//! transitively imports, against the timestamp of the existing output.

use crate::imports::ImportScanner;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::debug;

/// Errors raised while walking a file's import graph
#[derive(Debug, Error)]
pub enum StalenessError {
    #[error("cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("import \"{import}\" in {referrer} does not exist (resolved to {resolved})")]
    MissingImport {
        import: String,
        referrer: PathBuf,
        resolved: PathBuf,
    },

    #[error("cyclic import chain through {path}")]
    CyclicImport { path: PathBuf },
}

/// Memo entry for one path within the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// Evaluation started but has not finished. Seeing this on entry
    /// means the import graph loops back on itself.
    InProgress,
    /// Final answer for the run.
    Resolved(bool),
}

/// Recursive mtime-based staleness check over the transitive import graph.
///
/// One resolver services exactly one build run: answers are memoized per
/// absolute path for the lifetime of the resolver and never recomputed,
/// which keeps diamond-shaped import graphs linear instead of exponential.
/// Drop the resolver when the run ends; reusing it across runs would serve
/// stale answers.
pub struct StalenessResolver {
    scanner: ImportScanner,
    memo: HashMap<PathBuf, VisitState>,
}

impl Default for StalenessResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StalenessResolver {
    pub fn new() -> Self {
        Self {
            scanner: ImportScanner::new(),
            memo: HashMap::new(),
        }
    }

    /// `true` if `path`, or any file it transitively imports, was modified
    /// strictly after `reference`.
    ///
    /// A file whose own timestamp is newer is reported stale without its
    /// text ever being read. Otherwise its imports are resolved against
    /// the file's own directory and evaluated in order, stopping at the
    /// first stale one. Unreadable files and imports naming nonexistent
    /// targets abort the evaluation with an error; errors are not
    /// memoized, so a later evaluation reaching the same path fails the
    /// same way instead of reusing a half-computed answer.
    ///
    /// An import chain that loops back on itself yields
    /// [`StalenessError::CyclicImport`]: the timestamp semantics of a
    /// genuine cycle are undefined, so it is surfaced as an error rather
    /// than recursed into.
    pub fn is_stale(
        &mut self,
        path: &Path,
        reference: SystemTime,
    ) -> Result<bool, StalenessError> {
        match self.memo.get(path) {
            Some(VisitState::Resolved(stale)) => return Ok(*stale),
            Some(VisitState::InProgress) => {
                return Err(StalenessError::CyclicImport {
                    path: path.to_path_buf(),
                });
            }
            None => {}
        }

        self.memo
            .insert(path.to_path_buf(), VisitState::InProgress);

        match self.evaluate(path, reference) {
            Ok(stale) => {
                self.memo
                    .insert(path.to_path_buf(), VisitState::Resolved(stale));
                Ok(stale)
            }
            Err(err) => {
                // Unwind the in-progress mark so a later top-level
                // evaluation does not mistake this path for a cycle.
                self.memo.remove(path);
                Err(err)
            }
        }
    }

    fn evaluate(&mut self, path: &Path, reference: SystemTime) -> Result<bool, StalenessError> {
        let file_access = |source| StalenessError::FileAccess {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(file_access)?;
        let mtime = metadata.modified().map_err(file_access)?;

        if mtime > reference {
            debug!(path = %path.display(), "stale: modified after reference");
            return Ok(true);
        }

        // The file itself is fresh; staleness can only come in through an
        // import. Each import resolves against this file's directory, not
        // the directory of the top-level file that started the walk.
        let text = fs::read_to_string(path).map_err(file_access)?;
        let directory = path.parent().unwrap_or(Path::new("."));
        let imports: Vec<String> = self.scanner.scan(&text).map(str::to_owned).collect();

        for import in imports {
            let resolved = directory.join(&import);
            if !resolved.exists() {
                return Err(StalenessError::MissingImport {
                    import,
                    referrer: path.to_path_buf(),
                    resolved,
                });
            }
            if self.is_stale(&resolved, reference)? {
                debug!(
                    path = %path.display(),
                    import = %resolved.display(),
                    "stale: import is stale"
                );
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use std::fs;

    fn set_mtime(path: &Path, unix_secs: i64) {
        set_file_mtime(path, FileTime::from_unix_time(unix_secs, 0)).unwrap();
    }

    fn reference(unix_secs: i64) -> SystemTime {
        SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(unix_secs as u64)
    }

    #[test]
    fn test_plain_file_older_than_reference() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.less");
        fs::write(&file, "body { color: red; }").unwrap();
        set_mtime(&file, 1_000);

        let mut resolver = StalenessResolver::new();
        assert!(!resolver.is_stale(&file, reference(2_000)).unwrap());
    }

    #[test]
    fn test_plain_file_newer_than_reference() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.less");
        fs::write(&file, "body { color: red; }").unwrap();
        set_mtime(&file, 3_000);

        let mut resolver = StalenessResolver::new();
        assert!(resolver.is_stale(&file, reference(2_000)).unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let mut resolver = StalenessResolver::new();
        let err = resolver
            .is_stale(&dir.path().join("gone.less"), reference(2_000))
            .unwrap_err();

        assert!(matches!(err, StalenessError::FileAccess { .. }));
    }

    #[test]
    fn test_memoized_answer_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.less");
        fs::write(&file, "body {}").unwrap();
        set_mtime(&file, 1_000);

        let mut resolver = StalenessResolver::new();
        assert!(!resolver.is_stale(&file, reference(2_000)).unwrap());

        // Deleting the file is invisible to the same run: the memoized
        // answer is returned without touching the filesystem again.
        fs::remove_file(&file).unwrap();
        assert!(!resolver.is_stale(&file, reference(2_000)).unwrap());
    }
}

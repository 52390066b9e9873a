//! External lessc process backend

use super::{CompileBackend, CompileError, CompileInput};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, error, info};

/// Command-line surface of the external compiler, fixed per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LesscOptions {
    /// Pass `--clean-css`.
    pub minify: bool,
    /// Pass `--line-numbers=comments`, annotating the output with source
    /// file and line references.
    pub debug: bool,
    /// Pass `--verbose`.
    pub verbose: bool,
    /// Pass `--source-map=<output>.map`, emitting a source map next to
    /// each output.
    pub source_map: bool,
    /// Pass `--strict-imports`, compiling every import instead of only
    /// `.less` ones.
    pub strict_imports: bool,
    /// Suppress `--relative-urls`, leaving urls exactly as written.
    pub disable_url_rewriting: bool,
    /// `key=value` pairs passed through verbatim as `--global-var`, in
    /// order.
    pub global_vars: Vec<String>,
    /// `key=value` pairs passed through verbatim as `--modify-var`, in
    /// order.
    pub modify_vars: Vec<String>,
    /// Root of the lessc installation; `<root>/node` and
    /// `<root>/less/bin/lessc` are expected underneath it. Defaults to
    /// the directory of the running executable.
    pub lessc_root: Option<PathBuf>,
}

/// Compile backend spawning one `lessc` process per file.
///
/// Holds no process-wide mutable state, so distinct files could in
/// principle be compiled concurrently; the orchestrator runs them
/// sequentially.
///
/// lessc signals failure by writing to stderr; the exit code is not
/// consulted. A stderr text that was already reported earlier in the run
/// is ignored entirely: not logged again, and not counted as a failure
/// again. One backend instance spans exactly one run, which bounds the
/// lifetime of that dedupe set.
pub struct LesscBackend {
    options: LesscOptions,
    reported_errors: HashSet<String>,
}

impl LesscBackend {
    pub fn new(options: LesscOptions) -> Self {
        Self {
            options,
            reported_errors: HashSet::new(),
        }
    }

    fn install_root(&self) -> Result<PathBuf, CompileError> {
        if let Some(root) = &self.options.lessc_root {
            return Ok(root.clone());
        }
        let exe = env::current_exe().map_err(|source| CompileError::Process {
            program: "node".to_string(),
            source,
        })?;
        Ok(exe.parent().unwrap_or(Path::new(".")).to_path_buf())
    }

    /// Argument vector for one invocation: script path, flags, input,
    /// output, then the variable overrides.
    fn arguments(&self, root: &Path, input: &Path, output: &Path) -> Vec<String> {
        let lessc = root.join("less").join("bin").join("lessc");
        let mut args = vec![lessc.to_string_lossy().into_owned()];

        // Color control sequences would corrupt the captured streams.
        args.push("--no-color".to_string());

        if self.options.verbose {
            args.push("--verbose".to_string());
        }
        if self.options.debug {
            args.push("--line-numbers=comments".to_string());
        }
        if self.options.minify {
            args.push("--clean-css".to_string());
        }
        if self.options.source_map {
            args.push(format!("--source-map={}.map", output.display()));
        }
        if self.options.strict_imports {
            args.push("--strict-imports".to_string());
        }
        if !self.options.disable_url_rewriting {
            args.push("--relative-urls".to_string());
        }

        args.push(input.to_string_lossy().into_owned());
        args.push(output.to_string_lossy().into_owned());

        for var in &self.options.global_vars {
            args.push(format!("--global-var={var}"));
        }
        for var in &self.options.modify_vars {
            args.push(format!("--modify-var={var}"));
        }

        args
    }

    /// Turn the captured streams into a per-file result.
    ///
    /// Non-empty stdout is informational. Non-empty stderr fails the file
    /// unless the identical text was reported earlier in this run.
    fn evaluate_streams(
        &mut self,
        stdout: &str,
        stderr: &str,
        output: &Path,
    ) -> Result<(), CompileError> {
        if !stdout.trim().is_empty() {
            info!("{}", stdout.trim_end());
        }

        if stderr.trim().is_empty() {
            return Ok(());
        }

        if self.reported_errors.contains(stderr) {
            debug!(output = %output.display(), "suppressing repeated compiler error");
            return Ok(());
        }

        self.reported_errors.insert(stderr.to_string());
        error!("{}", stderr.trim_end());

        // The compiler may have written a partial stylesheet before it
        // failed; remove it rather than leave it looking up to date.
        let _ = fs::remove_file(output);

        Err(CompileError::Failed(stderr.to_string()))
    }
}

impl CompileBackend for LesscBackend {
    fn compile(&mut self, input: &CompileInput<'_>, output: &Path) -> Result<(), CompileError> {
        let root = self.install_root()?;
        let node = root.join("node");
        let args = self.arguments(&root, input.path, output);

        debug!(program = %node.display(), ?args, "spawning lessc");

        // Blocks until the process exits with both streams fully drained.
        // TODO: bound the wait once a timeout for slow compiles is agreed.
        let captured = Command::new(&node)
            .args(&args)
            .current_dir(input.directory)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| CompileError::Process {
                program: node.to_string_lossy().into_owned(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&captured.stdout);
        let stderr = String::from_utf8_lossy(&captured.stderr);
        self.evaluate_streams(&stdout, &stderr, output)
    }
}

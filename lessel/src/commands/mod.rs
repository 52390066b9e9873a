//! Lessel command-line interface
//!
//! Two modes of operation:
//! - `compile`: discover stylesheets and recompile the stale ones
//! - `clean`: delete the computed outputs

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod clean;
pub mod compile;

/// Lessel - incremental LESS stylesheet build orchestrator
#[derive(Parser)]
#[command(name = "lessel")]
#[command(about = "Compile LESS stylesheets, skipping files whose output is up to date")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile stale stylesheets
    Compile(CompileArgs),

    /// Delete compiled outputs
    Clean(CleanArgs),
}

/// Input discovery and output naming, shared by both subcommands.
#[derive(Args)]
pub struct InputArgs {
    /// Directory scanned recursively for .less files
    #[arg(short, long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory compiled files are written to
    #[arg(short, long)]
    pub out_dir: PathBuf,

    /// Mirror each input's relative directory under the output directory
    #[arg(long)]
    pub keep_relative_dir: bool,

    /// Extension for compiled files
    #[arg(long, default_value = ".css")]
    pub extension: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BackendKind {
    /// In-process engine
    Embedded,
    /// External lessc process
    Lessc,
}

#[derive(Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Recompile everything regardless of timestamps
    #[arg(short, long)]
    pub force: bool,

    /// Compile backend
    #[arg(long, value_enum, default_value_t = BackendKind::Lessc)]
    pub backend: BackendKind,

    /// Minify the compiled output
    #[arg(long)]
    pub minify: bool,

    /// Annotate output with source file and line comments
    #[arg(long)]
    pub debug: bool,

    /// Verbose compiler output (lessc backend)
    #[arg(long)]
    pub verbose: bool,

    /// Emit a source map next to each output (lessc backend)
    #[arg(long)]
    pub source_map: bool,

    /// Compile every import, not just .less ones
    #[arg(long)]
    pub strict_imports: bool,

    /// Leave urls exactly as written
    #[arg(long)]
    pub disable_url_rewriting: bool,

    /// Embed imported CSS files into the output (embedded backend)
    #[arg(long)]
    pub inline_css_files: bool,

    /// Reject variable redefinition (embedded backend)
    #[arg(long)]
    pub disable_variable_redefines: bool,

    /// Keep the first /*! comment in the output (embedded backend)
    #[arg(long)]
    pub keep_first_special_comment: bool,

    /// lessc installation root containing node and less/bin/lessc
    #[arg(long, env = "LESSEL_LESSC_ROOT")]
    pub lessc_root: Option<PathBuf>,

    /// Global variable as key=value (repeatable, lessc backend)
    #[arg(long = "global-var", value_name = "KEY=VALUE")]
    pub global_vars: Vec<String>,

    /// Modify variable as key=value (repeatable, lessc backend)
    #[arg(long = "modify-var", value_name = "KEY=VALUE")]
    pub modify_vars: Vec<String>,

    /// Write a JSON build report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

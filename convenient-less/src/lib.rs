//! Incremental LESS stylesheet compilation.
//!
//! The crate is a thin build step: given a batch of `.less` inputs, it
//! compiles each one to CSS unless the existing output is already newer
//! than the input and everything the input transitively `@import`s.
//!
//! ## Architecture
//!
//! 1. **Import scanning**: [`ImportScanner`] extracts `@import "...";`
//!    targets from source text (purely textual, no LESS parsing)
//! 2. **Staleness resolution**: [`StalenessResolver`] walks the import
//!    graph recursively, memoizing per-path answers for the run
//! 3. **Compile backends**: [`CompileBackend`] with two implementations,
//!    an in-process [`LessEngine`](backend::embedded::LessEngine) wrapper
//!    and an external `lessc` process
//! 4. **Orchestration**: [`BuildOrchestrator`] drives the batch, isolates
//!    per-file failures and aggregates them into a [`BuildReport`]
//!
//! ## Usage
//!
//! ```no_run
//! use convenient_less::{
//!     discover, BuildOrchestrator, LesscBackend, LesscOptions, OutputNaming,
//! };
//! # fn example() {
//! let items = discover(std::path::Path::new("styles"));
//! let mut backend = LesscBackend::new(LesscOptions::default());
//! let report = BuildOrchestrator::new(OutputNaming::new("out"))
//!     .force(false)
//!     .run(&items, &mut backend);
//! assert!(report.success());
//! # }
//! ```

pub mod backend;
pub mod clean;
pub mod imports;
pub mod item;
pub mod orchestrator;
pub mod output;
pub mod staleness;

pub use backend::embedded::{EmbeddedBackend, EngineOptions, LessEngine};
pub use backend::external::{LesscBackend, LesscOptions};
pub use backend::{CompileBackend, CompileError, CompileInput};
pub use clean::clean_outputs;
pub use imports::ImportScanner;
pub use item::{discover, SourceItem};
pub use orchestrator::{BuildOrchestrator, BuildReport, CompileOutcome, FileOutcome};
pub use output::OutputNaming;
pub use staleness::{StalenessError, StalenessResolver};

//! Compile subcommand

use super::{BackendKind, CompileArgs};
use crate::engine::IdentityEngine;
use convenient_less::{
    discover, BuildOrchestrator, CompileBackend, EmbeddedBackend, EngineOptions, LesscBackend,
    LesscOptions, OutputNaming,
};
use std::fs;
use tracing::info;

pub fn execute(args: CompileArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let root = args.input.input_dir.canonicalize()?;
    let items = discover(&root);
    info!(
        "found {} stylesheets under {}",
        items.len(),
        root.display()
    );

    let naming = OutputNaming {
        output_dir: args.input.out_dir.clone(),
        keep_relative_dir: args.input.keep_relative_dir,
        extension: args.input.extension.clone(),
    };

    // One backend instance per run: the lessc backend's error dedupe set
    // must not outlive the batch.
    let mut backend: Box<dyn CompileBackend> = match args.backend {
        BackendKind::Embedded => {
            let options = EngineOptions {
                minify: args.minify,
                debug: args.debug,
                disable_url_rewriting: args.disable_url_rewriting,
                import_all_files_as_less: args.strict_imports,
                inline_css_files: args.inline_css_files,
                disable_variable_redefines: args.disable_variable_redefines,
                keep_first_special_comment: args.keep_first_special_comment,
            };
            Box::new(EmbeddedBackend::new(Box::new(IdentityEngine::new(options))))
        }
        BackendKind::Lessc => {
            let options = LesscOptions {
                minify: args.minify,
                debug: args.debug,
                verbose: args.verbose,
                source_map: args.source_map,
                strict_imports: args.strict_imports,
                disable_url_rewriting: args.disable_url_rewriting,
                global_vars: args.global_vars.clone(),
                modify_vars: args.modify_vars.clone(),
                lessc_root: args.lessc_root.clone(),
            };
            Box::new(LesscBackend::new(options))
        }
    };

    let report = BuildOrchestrator::new(naming)
        .force(args.force)
        .run(&items, backend.as_mut());

    if let Some(path) = &args.report {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!("report written to {}", path.display());
    }

    Ok(report.success())
}

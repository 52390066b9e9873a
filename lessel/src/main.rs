//! Lessel - incremental LESS build orchestrator
//!
//! Orchestrates:
//! 1. Stylesheet discovery under an input root
//! 2. Output path computation (flat or mirroring the source tree)
//! 3. Dependency-aware staleness checks (using convenient-less)
//! 4. Compilation through an in-process engine or the external lessc
//!    compiler, with per-file failure isolation

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod engine;

use commands::{Cli, Commands};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lessel=info,convenient_less=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Compile(args) => commands::compile::execute(args),
        Commands::Clean(args) => commands::clean::execute(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(2);
        }
    }
}

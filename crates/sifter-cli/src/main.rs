//! Sifter CLI - data-quality checks for CSV files, with an optional LLM assistant.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            json,
            output,
            delimiter,
        } => commands::analyze::run(file, json, output, delimiter, cli.verbose),

        Commands::Suggest { file, llm } => commands::suggest::run(file, llm, cli.verbose),

        Commands::Story { file, llm } => commands::story::run(file, llm, cli.verbose),

        Commands::Serve {
            host,
            port,
            llm,
            max_upload_mb,
            no_open,
        } => commands::serve::run(host, port, llm, max_upload_mb, no_open),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

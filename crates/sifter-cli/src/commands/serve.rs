//! Serve command - start the HTTP API and web UI.

use colored::Colorize;
use sifter::Sifter;

use crate::cli::LlmArgs;
use crate::server::{app, state::AppState, ServeConfig};

pub fn run(
    host: String,
    port: u16,
    llm: LlmArgs,
    max_upload_mb: usize,
    no_open: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServeConfig {
        host,
        port,
        body_limit: max_upload_mb * 1024 * 1024,
    };

    // Built before the runtime starts; blocking clients cannot be created inside it
    let provider = super::build_provider(&llm)?;
    let state = AppState::new(Sifter::new(), provider);

    let url = format!("http://{}:{}", config.host, config.port);
    println!();
    println!(
        "{} {}",
        "Starting Sifter server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    match state.provider_name() {
        Some(name) => println!("  Assistant: {}", name),
        None => println!("  Assistant: {}", "disabled (use --llm)".dimmed()),
    }
    println!("  Max upload: {} MB", max_upload_mb);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(app::run_server(state.clone(), &config));

    // Shut the runtime down before the last state handle is dropped
    drop(runtime);
    drop(state);

    result
}

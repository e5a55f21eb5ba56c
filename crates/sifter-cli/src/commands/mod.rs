//! CLI command implementations.

pub mod analyze;
pub mod serve;
pub mod story;
pub mod suggest;

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use sifter::{HuggingFaceProvider, LlmConfig, LlmProvider, MockProvider, OllamaProvider};

use crate::cli::{LlmArgs, LlmProviderChoice};

/// Build the selected provider, or None when LLM features are off.
///
/// Must be called outside the async runtime: the HTTP providers own a
/// blocking client.
pub fn build_provider(
    args: &LlmArgs,
) -> Result<Option<Arc<dyn LlmProvider>>, Box<dyn std::error::Error>> {
    let provider: Arc<dyn LlmProvider> = match args.llm {
        LlmProviderChoice::None => return Ok(None),
        LlmProviderChoice::HuggingFace => {
            let config = match &args.model {
                Some(model) => LlmConfig::for_model(model),
                None => LlmConfig::default(),
            };
            Arc::new(HuggingFaceProvider::from_env(config)?)
        }
        LlmProviderChoice::Ollama => {
            let model = args
                .model
                .clone()
                .unwrap_or_else(|| sifter::llm::OLLAMA_DEFAULT_MODEL.to_string());
            Arc::new(OllamaProvider::with_model(model)?)
        }
        LlmProviderChoice::Mock => Arc::new(MockProvider::new()),
    };

    tracing::info!(
        provider = provider.name(),
        model = %provider.config().model,
        "language model configured"
    );
    Ok(Some(provider))
}

/// Fail early with a readable message when the input file is missing.
pub fn require_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}

/// Print a warning when an assistant answer came from the fallback text.
pub fn report_fallback(error: Option<&str>) {
    if let Some(e) = error {
        eprintln!(
            "{} model unavailable, showing fallback output ({})",
            "Warning:".yellow(),
            e
        );
    }
}

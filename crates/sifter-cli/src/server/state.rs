//! Application state for the web server.

use std::sync::Arc;

use sifter::{Assistant, LlmProvider, Sifter};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Parser and detector used for uploads.
    pub sifter: Arc<Sifter>,
    /// Assistant over the configured LLM provider.
    /// If None, the assistant routes are disabled.
    pub assistant: Option<Assistant>,
}

impl AppState {
    /// Create new application state.
    pub fn new(sifter: Sifter, provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self {
            sifter: Arc::new(sifter),
            assistant: provider.map(Assistant::new),
        }
    }

    /// Check if LLM features are available.
    pub fn has_llm(&self) -> bool {
        self.assistant.is_some()
    }

    /// Name of the configured LLM provider (for display).
    pub fn provider_name(&self) -> Option<&str> {
        self.assistant.as_ref().map(|a| a.provider().name())
    }
}

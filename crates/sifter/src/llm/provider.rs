//! LLM provider trait and types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single chat-completion request: one system turn and one user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Instructions for the model.
    pub system: String,
    /// The user message.
    pub user: String,
    /// Maximum tokens in the response.
    pub max_tokens: usize,
    /// Sampling temperature (0.0-1.0).
    pub temperature: f64,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens: 1024,
            temperature: 0.3,
        }
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Configuration for LLM providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "meta-llama/Meta-Llama-3-8B-Instruct").
    pub model: String,

    /// Upper bound on response tokens, applied on top of each request.
    pub max_tokens: Option<usize>,

    /// Temperature override for every request.
    pub temperature: Option<f64>,

    /// Endpoint override (None = provider default).
    pub base_url: Option<String>,

    /// HTTP request timeout.
    pub timeout: Duration,
}

impl LlmConfig {
    /// Configuration for the given model with provider defaults elsewhere.
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Token limit to send for a request.
    pub fn effective_max_tokens(&self, request: &ChatRequest) -> usize {
        match self.max_tokens {
            Some(cap) => cap.min(request.max_tokens),
            None => request.max_tokens,
        }
    }

    /// Temperature to send for a request.
    pub fn effective_temperature(&self, request: &ChatRequest) -> f64 {
        self.temperature.unwrap_or(request.temperature)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "meta-llama/Meta-Llama-3-8B-Instruct".to_string(),
            max_tokens: None,
            temperature: None,
            base_url: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Trait for LLM providers.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can be
/// shared across request handlers.
pub trait LlmProvider: Send + Sync {
    /// Send a chat request and return the model's reply text.
    ///
    /// Transport failures, non-success statuses and malformed responses are
    /// all reported as [`SifterError::Llm`](crate::SifterError::Llm).
    fn complete(&self, request: &ChatRequest) -> Result<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = ChatRequest::new("sys", "hi").max_tokens(500).temperature(0.2);
        assert_eq!(req.system, "sys");
        assert_eq!(req.max_tokens, 500);
        assert_eq!(req.temperature, 0.2);
    }

    #[test]
    fn test_effective_limits() {
        let req = ChatRequest::new("s", "u").max_tokens(2500).temperature(0.2);

        let config = LlmConfig::default();
        assert_eq!(config.effective_max_tokens(&req), 2500);
        assert_eq!(config.effective_temperature(&req), 0.2);

        let config = LlmConfig {
            max_tokens: Some(1000),
            temperature: Some(0.0),
            ..LlmConfig::default()
        };
        assert_eq!(config.effective_max_tokens(&req), 1000);
        assert_eq!(config.effective_temperature(&req), 0.0);
    }
}

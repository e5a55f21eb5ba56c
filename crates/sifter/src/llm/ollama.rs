//! Ollama local LLM provider implementation.
//!
//! Ollama allows running LLMs locally without API keys.
//! Install from: https://ollama.ai

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Result, SifterError};

use super::provider::{ChatRequest, LlmConfig, LlmProvider};

/// Default Ollama host.
const DEFAULT_HOST: &str = "http://localhost:11434";

/// Model used when none is given.
pub const DEFAULT_MODEL: &str = "llama3";

const NAME: &str = "ollama";

/// Ollama local LLM provider.
pub struct OllamaProvider {
    client: Client,
    api_url: String,
    config: LlmConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider with default settings.
    ///
    /// Uses llama3 by default. Make sure you've pulled it:
    /// `ollama pull llama3`
    pub fn new() -> Result<Self> {
        Self::with_model(DEFAULT_MODEL)
    }

    /// Create with a specific model.
    pub fn with_model(model: impl Into<String>) -> Result<Self> {
        Self::with_config(LlmConfig::for_model(model))
    }

    /// Create with custom configuration.
    ///
    /// The host comes from `base_url`, then `OLLAMA_HOST`, then localhost.
    pub fn with_config(mut config: LlmConfig) -> Result<Self> {
        // Local models can be slower
        config.timeout = config.timeout.max(Duration::from_secs(120));

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SifterError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let host = config
            .base_url
            .clone()
            .or_else(|| std::env::var("OLLAMA_HOST").ok())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let api_url = format!("{}/api/chat", host.trim_end_matches('/'));

        Ok(Self {
            client,
            api_url,
            config,
        })
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

impl LlmProvider for OllamaProvider {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "stream": false,
            "options": {
                "temperature": self.config.effective_temperature(request),
                "num_predict": self.config.effective_max_tokens(request)
            },
            "messages": [
                {
                    "role": "system",
                    "content": request.system
                },
                {
                    "role": "user",
                    "content": request.user
                }
            ]
        });

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.build_headers())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    SifterError::llm(
                        NAME,
                        "Failed to connect to Ollama. Is it running? Start with: ollama serve",
                    )
                } else {
                    SifterError::llm(NAME, format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            // Check for model not found error
            if error_text.contains("not found") {
                return Err(SifterError::llm(
                    NAME,
                    format!(
                        "Model '{}' not found. Pull it with: ollama pull {}",
                        self.config.model, self.config.model
                    ),
                ));
            }

            return Err(SifterError::llm(
                NAME,
                format!("API error ({}): {}", status, error_text),
            ));
        }

        let api_response: OllamaResponse = response
            .json()
            .map_err(|e| SifterError::llm(NAME, format!("Failed to parse response: {}", e)))?;

        Ok(api_response.message.content.trim().to_string())
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        NAME
    }
}

/// Ollama chat response.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

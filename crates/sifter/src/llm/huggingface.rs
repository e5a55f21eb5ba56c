//! Hugging Face inference router provider.
//!
//! The router speaks the OpenAI chat-completions protocol. An inference
//! sub-provider is selected by suffixing the model id (`model:provider`).

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Result, SifterError};

use super::provider::{ChatRequest, LlmConfig, LlmProvider};

/// Hugging Face router endpoint.
const API_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Inference sub-provider used when none is given.
pub const DEFAULT_SUB_PROVIDER: &str = "novita";

const NAME: &str = "huggingface";

/// Hugging Face hosted model provider.
pub struct HuggingFaceProvider {
    client: Client,
    api_key: String,
    api_url: String,
    sub_provider: Option<String>,
    config: LlmConfig,
}

impl HuggingFaceProvider {
    /// Create a provider with the given token and default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SifterError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_url = config.base_url.clone().unwrap_or_else(|| API_URL.to_string());

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_url,
            sub_provider: Some(DEFAULT_SUB_PROVIDER.to_string()),
            config,
        })
    }

    /// Create from `HF_TOKEN`, falling back to `HF_API_KEY`.
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("HF_TOKEN")
            .or_else(|_| std::env::var("HF_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SifterError::Config(
                    "Hugging Face token not found in HF_TOKEN or HF_API_KEY".to_string(),
                )
            })?;
        Self::with_config(api_key, config)
    }

    /// Route requests through a specific inference sub-provider, or none.
    pub fn with_sub_provider(mut self, sub_provider: Option<String>) -> Self {
        self.sub_provider = sub_provider;
        self
    }

    /// Model id as sent to the router.
    pub fn routed_model(&self) -> String {
        match &self.sub_provider {
            Some(sub) if !sub.is_empty() => format!("{}:{}", self.config.model, sub),
            _ => self.config.model.clone(),
        }
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| SifterError::Config(format!("Invalid API token: {}", e)))?,
        );
        Ok(headers)
    }
}

impl LlmProvider for HuggingFaceProvider {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        let body = json!({
            "model": self.routed_model(),
            "max_tokens": self.config.effective_max_tokens(request),
            "temperature": self.config.effective_temperature(request),
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
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| SifterError::llm(NAME, format!("API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(SifterError::llm(
                NAME,
                format!("API error ({}): {}", status, error_text),
            ));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .map_err(|e| SifterError::llm(NAME, format!("Failed to parse API response: {}", e)))?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| SifterError::llm(NAME, "No response content"))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        NAME
    }
}

/// OpenAI-compatible chat-completions response.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routed_model() {
        let provider = HuggingFaceProvider::new("hf_test").unwrap();
        assert_eq!(
            provider.routed_model(),
            "meta-llama/Meta-Llama-3-8B-Instruct:novita"
        );

        let provider = provider.with_sub_provider(None);
        assert_eq!(provider.routed_model(), "meta-llama/Meta-Llama-3-8B-Instruct");
    }

    #[test]
    fn test_base_url_override() {
        let config = LlmConfig {
            base_url: Some("http://localhost:9999/v1/chat/completions".to_string()),
            ..LlmConfig::default()
        };
        let provider = HuggingFaceProvider::with_config("hf_test", config).unwrap();
        assert_eq!(provider.api_url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(provider.name(), "huggingface");
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  hello  "}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("  hello  "));
    }
}

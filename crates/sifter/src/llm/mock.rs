//! Mock LLM provider for testing and offline use.

use std::sync::Mutex;

use crate::error::{Result, SifterError};

use super::prompts;
use super::provider::{ChatRequest, LlmConfig, LlmProvider};

const NAME: &str = "mock";

#[derive(Debug, Clone)]
enum Behavior {
    /// Canned reply chosen from the task's system prompt.
    Canned,
    /// Always return this text.
    Fixed(String),
    /// Always fail with this message.
    Fail(String),
}

/// Mock LLM provider that returns predictable responses for testing.
///
/// Every request is recorded and can be inspected with [`MockProvider::requests`].
pub struct MockProvider {
    config: LlmConfig,
    behavior: Behavior,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with canned replies.
    pub fn new() -> Self {
        Self::with_config(LlmConfig::for_model("mock"))
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self {
            config,
            behavior: Behavior::Canned,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider that always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fixed(text.into()),
            ..Self::new()
        }
    }

    /// A provider whose every call fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(message.into()),
            ..Self::new()
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn canned(request: &ChatRequest) -> String {
        match request.system.as_str() {
            prompts::CLEANING_SYSTEM => concat!(
                "### Issue 1: Handle Missing Values\n\n",
                "**Why this needs to be fixed:**\nMissing values bias summary statistics.\n\n",
                "**Code:**\n```python\ndf = df.dropna()\n```\n\n",
                "**Result:**\nNo rows with missing values remain.\n\n",
                "### Issue 2: Remove Duplicate Rows\n\n",
                "**Why this needs to be fixed:**\nDuplicates over-weight repeated records.\n\n",
                "**Code:**\n```python\ndf = df.drop_duplicates()\n```\n\n",
                "**Result:**\nEvery row is unique."
            )
            .to_string(),
            prompts::STORY_SYSTEM => {
                "The dataset is small and tidy. A few columns stand out for closer review."
                    .to_string()
            }
            prompts::VISUALIZATION_SYSTEM => concat!(
                "```python\n",
                "import matplotlib.pyplot as plt\n",
                "df.hist()\n",
                "plt.show()\n",
                "```"
            )
            .to_string(),
            _ => {
                let question = request
                    .user
                    .lines()
                    .rev()
                    .find_map(|line| line.strip_prefix("User: "))
                    .unwrap_or("your question");
                format!("Mock answer to: {}", question)
            }
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match &self.behavior {
            Behavior::Canned => Ok(Self::canned(request)),
            Behavior::Fixed(text) => Ok(text.clone()),
            Behavior::Fail(message) => Err(SifterError::llm(NAME, message.clone())),
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        NAME
    }
}

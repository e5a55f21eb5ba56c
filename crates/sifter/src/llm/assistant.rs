//! Assistant tasks built on top of an [`LlmProvider`].
//!
//! Each task sends one chat request and post-processes the reply. When the
//! provider fails or returns nothing, the task answers with a fixed fallback
//! text instead, tagged [`AssistSource::Fallback`] and carrying the error.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::detector::IssueReport;

use super::prompts;
use super::provider::{ChatRequest, LlmProvider};

const FALLBACK_MANUAL: &str = concat!(
    "### Issue 1: Handling Missing Values\n\n",
    "**Why this needs to be fixed:**\nMissing values can affect model accuracy and create bias.\n\n",
    "**Code:**\n```python\nimport pandas as pd\n",
    "df['Age'].fillna(df['Age'].median(), inplace=True)\n",
    "print('Missing values:', df['Age'].isnull().sum())\n```\n\n",
    "**Result:**\nAge column will have no missing values."
);

const FALLBACK_STORY: &str = "Error: Could not generate the data story. Please check the logs.";

const FALLBACK_PLOT: &str = concat!(
    "import matplotlib.pyplot as plt\nimport seaborn as sns\n\n",
    "# Error generating suggestion. Please check logs.\n",
    "plt.figure()\nplt.title('Error Generating Plot')\nplt.show()"
);

const FALLBACK_CHAT: &str =
    "Error: I'm having trouble connecting to my brain right now. Please try again in a moment.";

static EMPTY_PYTHON_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```python\s*```").unwrap());

static ISSUE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^###\s*Issue\b").unwrap());

/// Where an assisted value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistSource {
    Model,
    Fallback,
}

/// Output of an assistant task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assisted<T> {
    pub value: T,
    pub source: AssistSource,
    /// Provider error that forced the fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Assisted<T> {
    fn model(value: T) -> Self {
        Self {
            value,
            source: AssistSource::Model,
            error: None,
        }
    }

    fn fallback(value: T, error: String) -> Self {
        Self {
            value,
            source: AssistSource::Fallback,
            error: Some(error),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == AssistSource::Fallback
    }
}

/// Turns detector output and dataset previews into model-written text.
#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn LlmProvider>,
}

impl Assistant {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Markdown cleaning manual with one `### Issue N:` section per problem.
    pub fn cleaning_suggestions(&self, issues: &IssueReport, columns: &[String]) -> Assisted<String> {
        let issues_json = serde_json::to_string(issues).unwrap_or_default();
        let request = ChatRequest::new(
            prompts::CLEANING_SYSTEM,
            prompts::cleaning_prompt(&issues_json, columns),
        )
        .max_tokens(2500)
        .temperature(0.2);

        self.run("cleaning_suggestions", &request, FALLBACK_MANUAL, |reply| {
            EMPTY_PYTHON_FENCE.replace_all(reply, "").trim().to_string()
        })
    }

    /// Narrative summary of a dataset for a non-technical reader.
    pub fn data_story(&self, head: &str, describe: &str, columns: &[String]) -> Assisted<String> {
        let request = ChatRequest::new(
            prompts::STORY_SYSTEM,
            prompts::story_prompt(head, describe, columns),
        )
        .max_tokens(1500)
        .temperature(0.5);

        self.run("data_story", &request, FALLBACK_STORY, |reply| reply.trim().to_string())
    }

    /// Plotting code for one visualization, without markdown fences.
    pub fn visualization_code(&self, columns: &[String], head: &str) -> Assisted<String> {
        let request = ChatRequest::new(
            prompts::VISUALIZATION_SYSTEM,
            prompts::visualization_prompt(columns, head),
        )
        .max_tokens(500)
        .temperature(0.2);

        self.run("visualization_code", &request, FALLBACK_PLOT, strip_code_fences)
    }

    /// Answer a question about the dataset, given prior (user, assistant) turns.
    pub fn chat(
        &self,
        message: &str,
        history: &[(String, String)],
        columns: &[String],
        head: &str,
    ) -> Assisted<String> {
        let request = ChatRequest::new(
            prompts::CHAT_SYSTEM,
            prompts::chat_prompt(message, history, columns, head),
        )
        .max_tokens(1500)
        .temperature(0.4);

        self.run("chat", &request, FALLBACK_CHAT, |reply| reply.trim().to_string())
    }

    fn run(
        &self,
        task: &str,
        request: &ChatRequest,
        fallback: &str,
        post: impl FnOnce(&str) -> String,
    ) -> Assisted<String> {
        let provider = self.provider.name();
        debug!(task, provider, max_tokens = request.max_tokens, "assistant request");

        match self.provider.complete(request) {
            Ok(reply) => {
                let value = post(&reply);
                if value.is_empty() {
                    warn!(task, provider, "empty model reply, using fallback");
                    Assisted::fallback(fallback.to_string(), "model returned an empty reply".to_string())
                } else {
                    Assisted::model(value)
                }
            }
            Err(e) => {
                warn!(task, provider, error = %e, "assistant request failed, using fallback");
                Assisted::fallback(fallback.to_string(), e.to_string())
            }
        }
    }
}

/// Remove markdown code fences, keeping the code inside.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```python", "").replace("```", "").trim().to_string()
}

/// Split a cleaning manual into its `### Issue` sections.
///
/// Text before the first heading is dropped. A manual with no headings is
/// returned as a single section.
pub fn split_issue_sections(markdown: &str) -> Vec<String> {
    let starts: Vec<usize> = ISSUE_HEADING.find_iter(markdown).map(|m| m.start()).collect();

    if starts.is_empty() {
        let trimmed = markdown.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(markdown.len());
            markdown[start..end].trim().to_string()
        })
        .collect()
}

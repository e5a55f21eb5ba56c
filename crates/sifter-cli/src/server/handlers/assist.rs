//! LLM assistant handlers.
//!
//! Provider calls block, so each one runs on the blocking pool.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sifter::llm::split_issue_sections;
use sifter::{AssistSource, Assisted, Assistant, IssueReport};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request for a cleaning manual.
#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    pub issues: IssueReport,
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Cleaning manual, whole and split per issue.
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub markdown: String,
    pub sections: Vec<String>,
    pub source: AssistSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request for a data story.
#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub head: String,
    pub describe: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub text: String,
    pub source: AssistSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request for plotting code.
#[derive(Debug, Deserialize)]
pub struct VisualizationRequest {
    #[serde(default)]
    pub columns: Vec<String>,
    pub head: String,
}

#[derive(Debug, Serialize)]
pub struct VisualizationResponse {
    pub code: String,
    pub source: AssistSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A chat turn with its prior (user, assistant) history.
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<(String, String)>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub head: String,
}

#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub reply: String,
    pub source: AssistSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/suggestions - Cleaning manual for a report.
pub async fn suggestions(
    State(state): State<AppState>,
    Json(req): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let assisted = run_assistant(&state, move |assistant| {
        assistant.cleaning_suggestions(&req.issues, &req.columns)
    })
    .await?;

    Ok(Json(SuggestionsResponse {
        sections: split_issue_sections(&assisted.value),
        markdown: assisted.value,
        source: assisted.source,
        error: assisted.error,
    }))
}

/// POST /api/story - Narrative summary of a dataset preview.
pub async fn story(
    State(state): State<AppState>,
    Json(req): Json<StoryRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    let assisted = run_assistant(&state, move |assistant| {
        assistant.data_story(&req.head, &req.describe, &req.columns)
    })
    .await?;

    Ok(Json(StoryResponse {
        text: assisted.value,
        source: assisted.source,
        error: assisted.error,
    }))
}

/// POST /api/visualization - Plotting code for a dataset preview.
pub async fn visualization(
    State(state): State<AppState>,
    Json(req): Json<VisualizationRequest>,
) -> Result<Json<VisualizationResponse>, ApiError> {
    let assisted = run_assistant(&state, move |assistant| {
        assistant.visualization_code(&req.columns, &req.head)
    })
    .await?;

    Ok(Json(VisualizationResponse {
        code: assisted.value,
        source: assisted.source,
        error: assisted.error,
    }))
}

/// POST /api/chat - Answer a question about the dataset.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message must not be empty".to_string()));
    }

    let assisted = run_assistant(&state, move |assistant| {
        assistant.chat(&req.message, &req.history, &req.columns, &req.head)
    })
    .await?;

    Ok(Json(ChatMessageResponse {
        reply: assisted.value,
        source: assisted.source,
        error: assisted.error,
    }))
}

async fn run_assistant<F>(state: &AppState, task: F) -> Result<Assisted<String>, ApiError>
where
    F: FnOnce(&Assistant) -> Assisted<String> + Send + 'static,
{
    let assistant = state.assistant.clone().ok_or(ApiError::LlmUnavailable)?;
    Ok(tokio::task::spawn_blocking(move || task(&assistant)).await?)
}

//! Language-model integration for cleaning suggestions, stories, plots and chat.
//!
//! The LLM integration is optional - the detector works fully without it.
//!
//! # Supported Providers
//!
//! - **Hugging Face** - hosted models via the inference router (requires `HF_TOKEN`)
//! - **Ollama** - Local models, no API key needed (requires Ollama installed)
//! - **Mock** - deterministic replies for tests and offline demos
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sifter::{Assistant, IssueReport, OllamaProvider};
//!
//! let assistant = Assistant::new(Arc::new(OllamaProvider::new().unwrap()));
//! let manual = assistant.cleaning_suggestions(&IssueReport::default(), &[]);
//! println!("{}", manual.value);
//! ```

mod assistant;
mod huggingface;
mod mock;
mod ollama;
mod prompts;
mod provider;

pub use assistant::{split_issue_sections, strip_code_fences, AssistSource, Assisted, Assistant};
pub use huggingface::{HuggingFaceProvider, DEFAULT_SUB_PROVIDER};
pub use mock::MockProvider;
pub use ollama::{OllamaProvider, DEFAULT_MODEL as OLLAMA_DEFAULT_MODEL};
pub use provider::{ChatRequest, LlmConfig, LlmProvider};

//! Sifter: data-quality profiling for tabular datasets.
//!
//! Sifter parses delimited text into an in-memory [`Dataset`] and runs a fixed
//! battery of thirteen checks over it, producing an [`IssueReport`]. An
//! optional language-model [`Assistant`] turns reports into cleaning
//! suggestions, narrative summaries, plotting code and chat answers.
//!
//! # Core Principles
//!
//! - **Pure detection**: the detector never modifies data and keeps no state
//! - **Complete reports**: every check is always present in the output
//! - **Isolated failures**: a column that breaks one check is skipped by that check only
//!
//! # Example
//!
//! ```no_run
//! use sifter::Sifter;
//!
//! let sifter = Sifter::new();
//! let result = sifter.analyze("measurements.csv").unwrap();
//!
//! println!("Columns: {}", result.columns.len());
//! println!("Flagged: {:?}", result.issues.flagged_checks());
//! ```

pub mod dataset;
pub mod detector;
pub mod error;
pub mod input;
pub mod llm;
pub mod stats;

mod sifter;

pub use crate::sifter::{AnalysisResult, Preview, Sifter, SifterConfig, PREVIEW_ROWS};
pub use dataset::{Column, Dataset, Describe, StorageType, Value, ValueKind};
pub use detector::{analyze, DetectorConfig, IssueDetector, IssueReport, CHECK_NAMES};
pub use error::{Result, SifterError};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use llm::{
    AssistSource, Assisted, Assistant, ChatRequest, HuggingFaceProvider, LlmConfig, LlmProvider,
    MockProvider, OllamaProvider,
};

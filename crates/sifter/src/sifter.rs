//! Main Sifter struct and public API.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dataset::Dataset;
use crate::detector::{DetectorConfig, IssueDetector, IssueReport};
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::llm::{Assistant, LlmProvider};

/// Rows shown in previews and prompts.
pub const PREVIEW_ROWS: usize = 5;

/// Configuration for Sifter analysis.
#[derive(Debug, Clone, Default)]
pub struct SifterConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Detector thresholds.
    pub detector: DetectorConfig,
}

/// Text previews of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    /// The first rows as a text grid.
    pub head: String,
    /// Descriptive statistics as a text grid.
    pub describe: String,
}

impl Preview {
    pub fn of(dataset: &Dataset) -> Self {
        Self {
            head: dataset.head_text(PREVIEW_ROWS),
            describe: dataset.describe().to_text(),
        }
    }
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Column names in order.
    pub columns: Vec<String>,
    /// Every check's findings.
    pub issues: IssueReport,
    /// Head and describe previews.
    pub preview: Preview,
}

/// The main Sifter analysis engine.
pub struct Sifter {
    parser: Parser,
    detector: IssueDetector,
    llm_provider: Option<Arc<dyn LlmProvider>>,
}

impl Sifter {
    /// Create a new Sifter instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(SifterConfig::default())
    }

    /// Create a Sifter instance with custom configuration.
    pub fn with_config(config: SifterConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            detector: IssueDetector::with_config(config.detector),
            llm_provider: None,
        }
    }

    /// Add an LLM provider for assistant tasks.
    pub fn with_llm(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.llm_provider = Some(Arc::new(provider));
        self
    }

    /// Assistant over the configured provider, if any.
    pub fn assistant(&self) -> Option<Assistant> {
        self.llm_provider.clone().map(Assistant::new)
    }

    /// Analyze a data file.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (dataset, source) = self.parser.parse_file(path)?;
        Ok(self.finish(&dataset, source))
    }

    /// Analyze in-memory file contents.
    pub fn analyze_bytes(&self, contents: &[u8], name: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (dataset, source) = self.parser.parse_bytes(contents, name)?;
        Ok(self.finish(&dataset, source))
    }

    /// Run the detector over an already-built dataset.
    pub fn detect(&self, dataset: &Dataset) -> IssueReport {
        self.detector.analyze(dataset)
    }

    fn finish(&self, dataset: &Dataset, source: SourceMetadata) -> AnalysisResult {
        let issues = self.detect(dataset);

        info!(
            file = %source.file,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            flagged = issues.flagged_checks().len(),
            "analysis complete"
        );

        AnalysisResult {
            source,
            columns: dataset.column_names().into_iter().map(String::from).collect(),
            issues,
            preview: Preview::of(dataset),
        }
    }
}

impl Default for Sifter {
    fn default() -> Self {
        Self::new()
    }
}

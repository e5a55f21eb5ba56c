//! Issue detection over an in-memory dataset.
//!
//! Each check is an independent pass over the dataset writing one field of
//! the [`IssueReport`]. A column that makes a check fail is left out of that
//! check's result and the remaining checks still run.

mod checks;
mod datetime;
mod report;

use indexmap::IndexMap;
use tracing::debug;

use crate::dataset::{Column, Dataset};

use checks::CheckResult;

pub use report::{IssueReport, KindCounts, CHECK_NAMES};

/// Thresholds used by the detector.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// IQR multiplier for outlier fences.
    pub iqr_multiplier: f64,
    /// Minimum distinct count above which a column is high-cardinality.
    pub cardinality_floor: usize,
    /// Share of the row count above which a column is high-cardinality.
    pub cardinality_ratio: f64,
    /// Null fraction above which a column counts as mostly missing.
    pub high_missing_ratio: f64,
    /// Dominant-value share above which a categorical column is imbalanced.
    pub imbalance_ratio: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            cardinality_floor: 50,
            cardinality_ratio: 0.2,
            high_missing_ratio: 0.5,
            imbalance_ratio: 0.95,
        }
    }
}

/// Runs the fixed battery of data-quality checks.
#[derive(Debug, Clone, Default)]
pub struct IssueDetector {
    config: DetectorConfig,
}

impl IssueDetector {
    /// Create a detector with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom thresholds.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Analyze a dataset and return every check's result.
    pub fn analyze(&self, dataset: &Dataset) -> IssueReport {
        let cfg = &self.config;
        let rows = dataset.row_count();

        debug!(
            rows,
            columns = dataset.column_count(),
            "running issue detection"
        );

        IssueReport {
            missing_values: per_column(dataset, "missing_values", checks::missing_count),
            duplicate_rows: rows - dataset.distinct_row_count(),
            type_inconsistencies: per_column(dataset, "type_inconsistencies", checks::kind_mix),
            outliers: per_column(dataset, "outliers", |c| {
                checks::outlier_count(c, cfg.iqr_multiplier)
            }),
            constant_columns: flagged(dataset, "constant_columns", checks::is_constant),
            high_cardinality_columns: flagged(dataset, "high_cardinality_columns", |c| {
                checks::is_high_cardinality(c, rows, cfg.cardinality_floor, cfg.cardinality_ratio)
            }),
            single_unique_columns: flagged(dataset, "single_unique_columns", checks::is_single_unique),
            mixed_type_object_columns: per_column(
                dataset,
                "mixed_type_object_columns",
                checks::object_kind_mix,
            ),
            high_missing_pct_columns: flagged(dataset, "high_missing_pct_columns", |c| {
                checks::is_high_missing(c, cfg.high_missing_ratio)
            }),
            highly_imbalanced_categoricals: per_column(
                dataset,
                "highly_imbalanced_categoricals",
                |c| checks::imbalance(c, cfg.imbalance_ratio),
            ),
            all_zero_columns: flagged(dataset, "all_zero_columns", checks::is_all_zero),
            all_same_string_columns: flagged(
                dataset,
                "all_same_string_columns",
                checks::is_all_same_string,
            ),
            potential_datetime_parse_issues: flagged(
                dataset,
                "potential_datetime_parse_issues",
                checks::has_datetime_parse_issue,
            ),
        }
    }
}

/// Analyze a dataset with default thresholds.
pub fn analyze(dataset: &Dataset) -> IssueReport {
    IssueDetector::new().analyze(dataset)
}

/// Run a column check, keeping columns that produced a value.
fn per_column<T>(
    dataset: &Dataset,
    check: &str,
    f: impl Fn(&Column) -> CheckResult<T>,
) -> IndexMap<String, T> {
    let mut results = IndexMap::new();
    for column in dataset.columns() {
        match f(column) {
            Ok(Some(value)) => {
                results.insert(column.name.clone(), value);
            }
            Ok(None) => {}
            Err(failure) => {
                debug!(check, column = %column.name, %failure, "column skipped");
            }
        }
    }
    results
}

/// Run a flag-style column check, keeping flagged column names.
fn flagged(
    dataset: &Dataset,
    check: &str,
    f: impl Fn(&Column) -> CheckResult<()>,
) -> Vec<String> {
    per_column(dataset, check, f).into_keys().collect()
}

//! Aggregate report of every check for one dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataset::ValueKind;

/// Per-column tally of value kinds.
pub type KindCounts = IndexMap<ValueKind, usize>;

/// Names of every check, in report order.
pub const CHECK_NAMES: [&str; 13] = [
    "missing_values",
    "duplicate_rows",
    "type_inconsistencies",
    "outliers",
    "constant_columns",
    "high_cardinality_columns",
    "single_unique_columns",
    "mixed_type_object_columns",
    "high_missing_pct_columns",
    "highly_imbalanced_categoricals",
    "all_zero_columns",
    "all_same_string_columns",
    "potential_datetime_parse_issues",
];

/// Data-quality issues found in a dataset.
///
/// Every field is always present; a check that found nothing holds an empty
/// collection or zero. Column-keyed results follow dataset column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IssueReport {
    /// Null count per column, for columns with at least one null.
    #[serde(default)]
    pub missing_values: IndexMap<String, usize>,
    /// Total rows minus distinct rows.
    #[serde(default)]
    pub duplicate_rows: usize,
    /// Kind tallies for columns holding more than one value kind.
    #[serde(default)]
    pub type_inconsistencies: IndexMap<String, KindCounts>,
    /// IQR outlier count per numeric column.
    #[serde(default)]
    pub outliers: IndexMap<String, usize>,
    /// Columns with exactly one distinct value, nulls included.
    #[serde(default)]
    pub constant_columns: Vec<String>,
    #[serde(default)]
    pub high_cardinality_columns: Vec<String>,
    /// Columns with exactly one distinct non-null value.
    #[serde(default)]
    pub single_unique_columns: Vec<String>,
    /// Same as `type_inconsistencies`, for text storage only.
    #[serde(default)]
    pub mixed_type_object_columns: IndexMap<String, KindCounts>,
    #[serde(default)]
    pub high_missing_pct_columns: Vec<String>,
    /// Share of the most frequent non-null value.
    #[serde(default)]
    pub highly_imbalanced_categoricals: IndexMap<String, f64>,
    #[serde(default)]
    pub all_zero_columns: Vec<String>,
    #[serde(default)]
    pub all_same_string_columns: Vec<String>,
    #[serde(default)]
    pub potential_datetime_parse_issues: Vec<String>,
}

impl IssueReport {
    /// Names of checks that found something.
    pub fn flagged_checks(&self) -> Vec<&'static str> {
        let flagged = [
            !self.missing_values.is_empty(),
            self.duplicate_rows > 0,
            !self.type_inconsistencies.is_empty(),
            !self.outliers.is_empty(),
            !self.constant_columns.is_empty(),
            !self.high_cardinality_columns.is_empty(),
            !self.single_unique_columns.is_empty(),
            !self.mixed_type_object_columns.is_empty(),
            !self.high_missing_pct_columns.is_empty(),
            !self.highly_imbalanced_categoricals.is_empty(),
            !self.all_zero_columns.is_empty(),
            !self.all_same_string_columns.is_empty(),
            !self.potential_datetime_parse_issues.is_empty(),
        ];

        CHECK_NAMES
            .iter()
            .zip(flagged)
            .filter(|(_, hit)| *hit)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Returns true when no check found anything.
    pub fn is_clean(&self) -> bool {
        self.flagged_checks().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_serializes_every_key() {
        let value = serde_json::to_value(IssueReport::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), CHECK_NAMES.len());
        for name in CHECK_NAMES {
            assert!(object.contains_key(name), "missing key {}", name);
        }
        assert_eq!(object["duplicate_rows"], 0);
    }

    #[test]
    fn test_flagged_checks() {
        let mut report = IssueReport::default();
        assert!(report.is_clean());

        report.duplicate_rows = 2;
        report.all_zero_columns.push("z".to_string());
        assert_eq!(report.flagged_checks(), vec!["duplicate_rows", "all_zero_columns"]);
    }

    #[test]
    fn test_round_trip_with_kind_keys() {
        let mut report = IssueReport::default();
        let mut kinds = KindCounts::new();
        kinds.insert(ValueKind::Text, 3);
        kinds.insert(ValueKind::Null, 1);
        report.type_inconsistencies.insert("city".to_string(), kinds);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""city":{"text":3,"null":1}"#));
        let back: IssueReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}

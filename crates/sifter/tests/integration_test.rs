//! End-to-end tests: file to report, and report to assistant output.

use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use sifter::llm::split_issue_sections;
use sifter::{AssistSource, Assistant, MockProvider, Sifter, SifterConfig};

fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// A small survey export with one planted problem per check where possible.
fn survey_csv() -> String {
    let mut data = String::from("respondent,age,country,signup,score,always_zero,note\n");
    for i in 0..40 {
        let age = if i == 7 { "240".to_string() } else { (20 + i % 15).to_string() };
        let country = if i == 39 { "PE" } else { "NO" };
        let signup = if i == 12 { "last week".to_string() } else { format!("2024-03-{:02}", i % 28 + 1) };
        let score = if i % 2 == 0 { String::new() } else { format!("{}.5", i) };
        let note = if i % 10 == 0 { "follow up" } else { "" };
        data.push_str(&format!(
            "R{:03},{},{},{},{},0,{}\n",
            i, age, country, signup, score, note
        ));
    }
    // exact duplicate of the last row
    data.push_str("R039,29,PE,2024-03-12,39.5,0,\n");
    data
}

// =============================================================================
// Analysis
// =============================================================================

#[test]
fn test_survey_report() {
    let file = create_test_file(&survey_csv());
    let result = Sifter::new().analyze(file.path()).unwrap();
    let issues = &result.issues;

    assert_eq!(result.columns.len(), 7);
    assert_eq!(result.source.row_count, 41);
    assert_eq!(issues.duplicate_rows, 1);

    assert_eq!(issues.missing_values.get("score"), Some(&20));
    assert_eq!(issues.missing_values.get("note"), Some(&37));
    assert!(issues.high_missing_pct_columns.contains(&"note".to_string()));

    assert_eq!(issues.outliers.get("age"), Some(&1));
    assert!(issues.all_zero_columns.contains(&"always_zero".to_string()));
    assert!(issues.constant_columns.contains(&"always_zero".to_string()));
    assert!(issues.potential_datetime_parse_issues.contains(&"signup".to_string()));
    assert!(issues.all_same_string_columns.contains(&"note".to_string()));
    assert!(issues.highly_imbalanced_categoricals.contains_key("country"));
}

#[test]
fn test_report_json_round_trip() {
    let result = Sifter::new()
        .analyze_bytes(survey_csv().as_bytes(), "survey.csv")
        .unwrap();

    let json = serde_json::to_string(&result.issues).unwrap();
    let back: sifter::IssueReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result.issues);
}

#[test]
fn test_preview_text() {
    let result = Sifter::new()
        .analyze_bytes(b"a,b\n1,x\n2,y\n3,z\n", "small.csv")
        .unwrap();

    assert!(result.preview.head.contains('a'));
    assert!(result.preview.head.contains('z'));
    assert!(result.preview.describe.contains("mean"));
}

#[test]
fn test_custom_detector_config() {
    let mut config = SifterConfig::default();
    config.detector.high_missing_ratio = 0.9;

    let result = Sifter::with_config(config)
        .analyze_bytes(survey_csv().as_bytes(), "survey.csv")
        .unwrap();
    assert!(result.issues.high_missing_pct_columns.contains(&"note".to_string()));
    assert!(!result.issues.high_missing_pct_columns.contains(&"score".to_string()));
}

// =============================================================================
// Assistant
// =============================================================================

#[test]
fn test_suggestions_from_report() {
    let sifter = Sifter::new().with_llm(MockProvider::new());
    let result = sifter
        .analyze_bytes(survey_csv().as_bytes(), "survey.csv")
        .unwrap();

    let assistant = sifter.assistant().unwrap();
    let manual = assistant.cleaning_suggestions(&result.issues, &result.columns);

    assert_eq!(manual.source, AssistSource::Model);
    let sections = split_issue_sections(&manual.value);
    assert_eq!(sections.len(), 2);
    assert!(sections[0].starts_with("### Issue 1"));
}

#[test]
fn test_prompts_carry_dataset_context() {
    let mock = Arc::new(MockProvider::new());
    let assistant = Assistant::new(mock.clone());

    let result = Sifter::new()
        .analyze_bytes(survey_csv().as_bytes(), "survey.csv")
        .unwrap();
    assistant.cleaning_suggestions(&result.issues, &result.columns);
    assistant.data_story(&result.preview.head, &result.preview.describe, &result.columns);

    let requests = mock.requests();
    assert!(requests[0].user.contains("'always_zero'"));
    assert!(requests[0].user.contains("\"duplicate_rows\":1"));
    assert!(requests[1].user.contains("R000"));
}

#[test]
fn test_failing_provider_falls_back_everywhere() {
    let assistant = Assistant::new(Arc::new(MockProvider::failing("offline")));
    let cols = vec!["a".to_string()];

    let outputs = [
        assistant.cleaning_suggestions(&Default::default(), &cols),
        assistant.data_story("h", "d", &cols),
        assistant.visualization_code(&cols, "h"),
        assistant.chat("hi", &[], &cols, "h"),
    ];

    for output in &outputs {
        assert!(output.is_fallback());
        assert!(!output.value.is_empty());
        assert!(output.error.as_deref().unwrap().contains("offline"));
    }
}

//! Analyze command - run every check on a data file and report the findings.

use std::path::{Path, PathBuf};

use colored::Colorize;
use sifter::{AnalysisResult, IssueReport, ParserConfig, Sifter, SifterConfig, CHECK_NAMES};

pub fn run(
    file: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    delimiter: Option<char>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    super::require_file(&file)?;

    let delimiter = match delimiter {
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => return Err(format!("Delimiter must be a single ASCII character, got '{}'", c).into()),
        None => None,
    };

    let config = SifterConfig {
        parser: ParserConfig {
            delimiter,
            ..Default::default()
        },
        ..Default::default()
    };

    let result = Sifter::with_config(config).analyze(&file)?;

    if json || output.is_some() {
        let report = serde_json::to_string_pretty(&result.issues)?;
        match output {
            Some(path) => {
                std::fs::write(&path, report)?;
                println!(
                    "{} {}",
                    "Saved report to".green().bold(),
                    path.display().to_string().white()
                );
            }
            None => println!("{}", report),
        }
        return Ok(());
    }

    print_summary(&file, &result, verbose);
    Ok(())
}

fn print_summary(file: &Path, result: &AnalysisResult, verbose: bool) {
    println!(
        "{} {} ({} rows, {} columns, {})",
        "Analyzed".cyan().bold(),
        file.display().to_string().white(),
        result.source.row_count,
        result.source.column_count,
        result.source.format
    );

    if verbose {
        println!();
        println!("{}", "Preview:".yellow().bold());
        println!("{}", result.preview.head);
    }

    let issues = &result.issues;
    println!();

    if issues.is_clean() {
        println!("{}", "No issues found - data looks clean!".green());
        return;
    }

    println!(
        "Found issues in {} of {} checks:",
        issues.flagged_checks().len().to_string().white().bold(),
        CHECK_NAMES.len()
    );
    println!();

    for line in describe_issues(issues) {
        println!("  {} {}", "•".yellow(), line);
    }
}

/// One human-readable line per flagged check.
fn describe_issues(issues: &IssueReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !issues.missing_values.is_empty() {
        lines.push(format!(
            "{}: {}",
            "missing values".bold(),
            join_counts(issues.missing_values.iter().map(|(k, v)| (k, *v)))
        ));
    }
    if issues.duplicate_rows > 0 {
        lines.push(format!(
            "{}: {}",
            "duplicate rows".bold(),
            issues.duplicate_rows
        ));
    }
    for (column, kinds) in &issues.type_inconsistencies {
        let tally = kinds
            .iter()
            .map(|(kind, count)| format!("{} {}", count, kind))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("{} in {}: {}", "mixed types".bold(), column, tally));
    }
    if !issues.outliers.is_empty() {
        lines.push(format!(
            "{}: {}",
            "outliers".bold(),
            join_counts(issues.outliers.iter().map(|(k, v)| (k, *v)))
        ));
    }
    for (column, share) in &issues.highly_imbalanced_categoricals {
        lines.push(format!(
            "{} {}: top value is {:.1}% of rows",
            "imbalanced".bold(),
            column,
            share * 100.0
        ));
    }

    let lists = [
        ("constant", &issues.constant_columns),
        ("high cardinality", &issues.high_cardinality_columns),
        ("single unique value", &issues.single_unique_columns),
        ("mostly missing", &issues.high_missing_pct_columns),
        ("all zero", &issues.all_zero_columns),
        ("same string everywhere", &issues.all_same_string_columns),
        ("unparseable dates", &issues.potential_datetime_parse_issues),
    ];
    for (label, columns) in lists {
        if !columns.is_empty() {
            lines.push(format!("{}: {}", label.bold(), columns.join(", ")));
        }
    }

    lines
}

fn join_counts<'a>(pairs: impl Iterator<Item = (&'a String, usize)>) -> String {
    pairs
        .map(|(k, v)| format!("{} ({})", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_issues() {
        colored::control::set_override(false);

        let mut issues = IssueReport::default();
        issues.duplicate_rows = 3;
        issues.missing_values.insert("age".to_string(), 2);
        issues.all_zero_columns.push("flag".to_string());

        let lines = describe_issues(&issues);
        assert_eq!(
            lines,
            vec![
                "missing values: age (2)",
                "duplicate rows: 3",
                "all zero: flag",
            ]
        );
    }

    #[test]
    fn test_clean_report_has_no_lines() {
        assert!(describe_issues(&IssueReport::default()).is_empty());
    }
}

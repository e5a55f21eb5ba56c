//! Property-based tests for the issue detector.
//!
//! These tests use proptest to generate random datasets and verify that the
//! detector maintains its invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p sifter --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p sifter --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use sifter::{analyze, Column, Dataset, Parser, StorageType, Value, CHECK_NAMES};

// =============================================================================
// Test Strategies
// =============================================================================

/// Any single value, with a bias towards collisions.
fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-3i64..3).prop_map(Value::Int),
        prop_oneof![Just(0.0), Just(-0.0), Just(1.5), Just(f64::NAN), -1e6f64..1e6]
            .prop_map(Value::Float),
        "[a-c]{0,2}".prop_map(Value::Text),
    ]
}

fn storage() -> impl Strategy<Value = StorageType> {
    prop_oneof![
        Just(StorageType::Integer),
        Just(StorageType::Float),
        Just(StorageType::Boolean),
        Just(StorageType::Text),
        Just(StorageType::Categorical),
        Just(StorageType::DateTime),
    ]
}

/// Rectangular datasets of up to 5 columns and 30 rows.
fn dataset() -> impl Strategy<Value = Dataset> {
    (1usize..5, 0usize..30).prop_flat_map(|(cols, rows)| {
        prop::collection::vec((storage(), prop::collection::vec(value(), rows)), cols).prop_map(
            |columns| {
                let columns = columns
                    .into_iter()
                    .enumerate()
                    .map(|(i, (storage, values))| Column::new(format!("c{}", i), storage, values))
                    .collect();
                Dataset::new(columns).expect("generated dataset is rectangular")
            },
        )
    })
}

/// Simple CSV text with a header and random cells.
fn csv_text() -> impl Strategy<Value = String> {
    (1usize..4, 0usize..15).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(
            prop::collection::vec("[0-9]{1,3}|[a-z]{1,4}|NA|", cols),
            rows,
        )
        .prop_map(move |body| {
            let header: Vec<String> = (0..cols).map(|i| format!("h{}", i)).collect();
            let mut text = header.join(",");
            text.push('\n');
            for row in body {
                text.push_str(&row.join(","));
                text.push('\n');
            }
            text
        })
    })
}

// =============================================================================
// Report Invariants
// =============================================================================

proptest! {
    #[test]
    fn report_always_has_every_key(ds in dataset()) {
        let json = serde_json::to_value(analyze(&ds)).unwrap();
        let object = json.as_object().unwrap();
        prop_assert_eq!(object.len(), CHECK_NAMES.len());
        for name in CHECK_NAMES {
            prop_assert!(object.contains_key(name));
        }
    }

    #[test]
    fn analysis_is_deterministic(ds in dataset()) {
        let first = serde_json::to_string(&analyze(&ds)).unwrap();
        let second = serde_json::to_string(&analyze(&ds)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn duplicate_rows_matches_distinct_count(ds in dataset()) {
        let report = analyze(&ds);
        prop_assert_eq!(report.duplicate_rows, ds.row_count() - ds.distinct_row_count());
        prop_assert!(report.duplicate_rows < ds.row_count().max(1));
    }

    #[test]
    fn all_zero_never_has_nulls(ds in dataset()) {
        let report = analyze(&ds);
        for name in &report.all_zero_columns {
            let column = ds.column(name).unwrap();
            prop_assert_eq!(column.null_count(), 0);
            prop_assert!(!column.is_empty());
        }
    }

    #[test]
    fn missing_counts_match_nulls(ds in dataset()) {
        let report = analyze(&ds);
        for column in ds.columns() {
            let nulls = column.null_count();
            prop_assert_eq!(report.missing_values.get(&column.name).copied(), (nulls > 0).then_some(nulls));
        }
    }

    #[test]
    fn keys_follow_column_order(ds in dataset()) {
        let report = analyze(&ds);
        let order: Vec<&str> = ds.column_names();
        let positions: Vec<usize> = report
            .missing_values
            .keys()
            .map(|k| order.iter().position(|n| *n == k.as_str()).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn object_mix_is_subset_of_type_inconsistencies(ds in dataset()) {
        let report = analyze(&ds);
        for (name, kinds) in &report.mixed_type_object_columns {
            prop_assert_eq!(report.type_inconsistencies.get(name), Some(kinds));
        }
        let single: HashSet<&String> = report.single_unique_columns.iter().collect();
        for name in &report.all_same_string_columns {
            prop_assert!(single.contains(name));
        }
    }

    #[test]
    fn parsed_csv_never_panics(text in csv_text()) {
        if let Ok((ds, meta)) = Parser::new().parse_bytes(text.as_bytes(), "prop.csv") {
            prop_assert_eq!(meta.row_count, ds.row_count());
            let report = analyze(&ds);
            prop_assert!(report.duplicate_rows <= ds.row_count());
        }
    }
}

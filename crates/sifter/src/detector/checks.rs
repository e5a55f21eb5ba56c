//! Column-level computations behind each check.

use thiserror::Error;

use crate::dataset::{Column, ValueKind};
use crate::stats::{sorted_values, Quartiles};

use super::datetime::parses_as_dates;
use super::report::KindCounts;

/// Why a check could not be computed for a column.
#[derive(Debug, Error)]
pub(crate) enum CheckFailure {
    #[error("row {row} holds a {kind} value that cannot be read as a number")]
    NotNumeric { row: usize, kind: ValueKind },
}

pub(crate) type CheckResult<T> = std::result::Result<Option<T>, CheckFailure>;

pub(crate) fn missing_count(column: &Column) -> CheckResult<usize> {
    let nulls = column.null_count();
    Ok((nulls > 0).then_some(nulls))
}

/// Kind tally when more than one kind occurs.
pub(crate) fn kind_mix(column: &Column) -> CheckResult<KindCounts> {
    let counts = column.kind_counts();
    Ok((counts.len() > 1).then_some(counts))
}

/// Kind tally restricted to text storage.
pub(crate) fn object_kind_mix(column: &Column) -> CheckResult<KindCounts> {
    if !column.storage.is_text() {
        return Ok(None);
    }
    kind_mix(column)
}

/// Count of values strictly outside the IQR fences.
pub(crate) fn outlier_count(column: &Column, multiplier: f64) -> CheckResult<usize> {
    if !column.storage.is_numeric() {
        return Ok(None);
    }

    let mut numbers = Vec::with_capacity(column.len());
    for (row, value) in column.values.iter().enumerate() {
        if value.is_null() {
            continue;
        }
        match value.as_f64() {
            Some(n) => numbers.push(n),
            None => {
                return Err(CheckFailure::NotNumeric {
                    row,
                    kind: value.kind(),
                });
            }
        }
    }

    let sorted = sorted_values(numbers);
    let Some(quartiles) = Quartiles::from_sorted(&sorted) else {
        return Ok(None);
    };

    let count = sorted
        .iter()
        .filter(|v| quartiles.is_outlier(**v, multiplier))
        .count();
    Ok((count > 0).then_some(count))
}

/// Exactly one distinct value with nulls counted as a value.
pub(crate) fn is_constant(column: &Column) -> CheckResult<()> {
    Ok((column.distinct_count(true) == 1).then_some(()))
}

pub(crate) fn is_high_cardinality(
    column: &Column,
    row_count: usize,
    floor: usize,
    ratio: f64,
) -> CheckResult<()> {
    let threshold = (floor as f64).max(ratio * row_count as f64);
    Ok((column.distinct_count(false) as f64 > threshold).then_some(()))
}

/// Exactly one distinct non-null value.
pub(crate) fn is_single_unique(column: &Column) -> CheckResult<()> {
    Ok((column.distinct_count(false) == 1).then_some(()))
}

pub(crate) fn is_high_missing(column: &Column, ratio: f64) -> CheckResult<()> {
    if column.is_empty() {
        return Ok(None);
    }
    let fraction = column.null_count() as f64 / column.len() as f64;
    Ok((fraction > ratio).then_some(()))
}

/// Share of the dominant value in text or categorical columns above `ratio`.
pub(crate) fn imbalance(column: &Column, ratio: f64) -> CheckResult<f64> {
    if !column.storage.is_categorical_like() {
        return Ok(None);
    }
    let top = column.top_frequency();
    Ok((top > ratio).then_some(top))
}

/// Every value equals zero; `false` counts, nulls never do.
pub(crate) fn is_all_zero(column: &Column) -> CheckResult<()> {
    let all_zero = !column.is_empty() && column.values.iter().all(|v| v.equals_zero());
    Ok(all_zero.then_some(()))
}

/// Text column with exactly one distinct non-null value.
pub(crate) fn is_all_same_string(column: &Column) -> CheckResult<()> {
    if !column.storage.is_text() {
        return Ok(None);
    }
    is_single_unique(column)
}

/// Text column whose values do not all parse as dates.
pub(crate) fn has_datetime_parse_issue(column: &Column) -> CheckResult<()> {
    if !column.storage.is_text() {
        return Ok(None);
    }
    Ok((!parses_as_dates(&column.values)).then_some(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{StorageType, Value};

    fn ints(values: &[i64]) -> Column {
        Column::new(
            "n",
            StorageType::Integer,
            values.iter().map(|v| Value::Int(*v)).collect(),
        )
    }

    #[test]
    fn test_outlier_count() {
        let col = ints(&[1, 2, 3, 4, 5, 100]);
        assert_eq!(outlier_count(&col, 1.5).unwrap(), Some(1));

        let col = ints(&[1, 2, 3, 4, 5]);
        assert_eq!(outlier_count(&col, 1.5).unwrap(), None);
    }

    #[test]
    fn test_outlier_count_rejects_text_in_numeric_column() {
        let col = Column::new(
            "n",
            StorageType::Float,
            vec![Value::Float(1.0), Value::from("oops"), Value::Float(2.0)],
        );
        assert!(matches!(
            outlier_count(&col, 1.5),
            Err(CheckFailure::NotNumeric { row: 1, kind: ValueKind::Text })
        ));
    }

    #[test]
    fn test_outlier_count_skips_non_numeric_storage() {
        let col = Column::new("t", StorageType::Text, vec![Value::Int(1), Value::Int(1000)]);
        assert_eq!(outlier_count(&col, 1.5).unwrap(), None);
    }

    #[test]
    fn test_outlier_count_all_null() {
        let col = Column::new("n", StorageType::Float, vec![Value::Null, Value::Null]);
        assert_eq!(outlier_count(&col, 1.5).unwrap(), None);
    }

    #[test]
    fn test_high_cardinality_threshold() {
        let col = ints(&(0..60).collect::<Vec<_>>());
        assert!(is_high_cardinality(&col, 100, 50, 0.2).unwrap().is_some());

        let col = ints(&(0..40).collect::<Vec<_>>());
        assert!(is_high_cardinality(&col, 100, 50, 0.2).unwrap().is_none());

        // ratio dominates for large datasets
        let col = ints(&(0..150).collect::<Vec<_>>());
        assert!(is_high_cardinality(&col, 1000, 50, 0.2).unwrap().is_none());
    }

    #[test]
    fn test_high_missing_is_strict() {
        let col = Column::new("m", StorageType::Float, vec![Value::Null, Value::Float(1.0)]);
        assert!(is_high_missing(&col, 0.5).unwrap().is_none());

        let col = Column::new(
            "m",
            StorageType::Float,
            vec![Value::Null, Value::Null, Value::Float(1.0)],
        );
        assert!(is_high_missing(&col, 0.5).unwrap().is_some());
    }

    #[test]
    fn test_all_zero_rejects_nulls() {
        assert!(is_all_zero(&ints(&[0, 0, 0])).unwrap().is_some());
        let col = Column::new("z", StorageType::Float, vec![Value::Float(0.0), Value::Null]);
        assert!(is_all_zero(&col).unwrap().is_none());
        assert!(is_all_zero(&ints(&[])).unwrap().is_none());

        let flags = Column::new("f", StorageType::Boolean, vec![Value::Bool(false), Value::Null]);
        assert!(is_all_zero(&flags).unwrap().is_none());
    }

    #[test]
    fn test_imbalance_only_categorical_like() {
        let mut values = vec![Value::Int(1); 99];
        values.push(Value::Int(2));
        let col = Column::new("n", StorageType::Integer, values);
        assert!(imbalance(&col, 0.95).unwrap().is_none());
    }
}

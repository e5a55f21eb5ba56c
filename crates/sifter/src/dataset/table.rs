//! Rectangular collection of named columns.

use std::collections::HashSet;

use crate::error::{Result, SifterError};

use super::column::Column;
use super::value::DistinctKey;

/// An in-memory dataset: ordered, uniquely named columns of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset, rejecting ragged columns and duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        let mut names = HashSet::new();
        for column in &columns {
            if !names.insert(column.name.as_str()) {
                return Err(SifterError::InvalidDataset(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
            if column.len() != row_count {
                return Err(SifterError::InvalidDataset(format!(
                    "column '{}' has {} values, expected {}",
                    column.name,
                    column.len(),
                    row_count
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Hashable identity of a whole row.
    pub(crate) fn row_key(&self, row: usize) -> Vec<DistinctKey<'_>> {
        self.columns
            .iter()
            .map(|c| c.values[row].distinct_key())
            .collect()
    }

    /// Number of distinct rows by value.
    pub fn distinct_row_count(&self) -> usize {
        (0..self.row_count)
            .map(|row| self.row_key(row))
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{StorageType, Value};

    #[test]
    fn test_rejects_ragged_columns() {
        let result = Dataset::new(vec![
            Column::inferred("a", vec![Value::Int(1), Value::Int(2)]),
            Column::inferred("b", vec![Value::Int(1)]),
        ]);
        assert!(matches!(result, Err(SifterError::InvalidDataset(_))));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Dataset::new(vec![
            Column::inferred("a", vec![Value::Int(1)]),
            Column::inferred("a", vec![Value::Int(2)]),
        ]);
        assert!(matches!(result, Err(SifterError::InvalidDataset(_))));
    }

    #[test]
    fn test_distinct_rows() {
        let ds = Dataset::new(vec![
            Column::new("a", StorageType::Integer, vec![1.into(), 1.into(), 2.into(), 1.into()]),
            Column::new("b", StorageType::Text, vec!["x".into(), "x".into(), "x".into(), Value::Null]),
        ])
        .unwrap();
        assert_eq!(ds.row_count(), 4);
        assert_eq!(ds.distinct_row_count(), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::empty();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 0);
        assert_eq!(ds.distinct_row_count(), 0);
    }
}

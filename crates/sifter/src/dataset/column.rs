//! Named columns and their declared storage types.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::{Value, ValueKind};

/// Declared storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values.
    Boolean,
    /// Date and/or time values.
    DateTime,
    /// Generic text/object storage; may hold any value kind.
    #[default]
    Text,
    /// Categorical labels.
    Categorical,
}

impl StorageType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, StorageType::Integer | StorageType::Float)
    }

    /// Returns true for generic text/object storage.
    pub fn is_text(&self) -> bool {
        matches!(self, StorageType::Text)
    }

    /// Returns true for text and categorical storage.
    pub fn is_categorical_like(&self) -> bool {
        matches!(self, StorageType::Text | StorageType::Categorical)
    }

    /// Pick the narrowest storage type able to hold every non-null value.
    pub fn infer(values: &[Value]) -> Self {
        let mut kinds = values.iter().map(Value::kind).filter(|k| *k != ValueKind::Null);
        let Some(first) = kinds.next() else {
            return StorageType::Float;
        };

        let mut storage = match first {
            ValueKind::Integer => StorageType::Integer,
            ValueKind::Float => StorageType::Float,
            ValueKind::Boolean => StorageType::Boolean,
            ValueKind::Other => StorageType::DateTime,
            ValueKind::Text | ValueKind::Null => return StorageType::Text,
        };

        for kind in kinds {
            storage = match (storage, kind) {
                (StorageType::Integer, ValueKind::Integer) => StorageType::Integer,
                (StorageType::Integer | StorageType::Float, ValueKind::Integer | ValueKind::Float) => {
                    StorageType::Float
                }
                (StorageType::Boolean, ValueKind::Boolean) => StorageType::Boolean,
                (StorageType::DateTime, ValueKind::Other) => StorageType::DateTime,
                _ => return StorageType::Text,
            };
        }

        storage
    }
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared storage type.
    pub storage: StorageType,
    /// Cell values in row order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column with an explicit storage type.
    pub fn new(name: impl Into<String>, storage: StorageType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            storage,
            values,
        }
    }

    /// Create a column whose storage type is inferred from its values.
    pub fn inferred(name: impl Into<String>, values: Vec<Value>) -> Self {
        let storage = StorageType::infer(&values);
        Self::new(name, storage, values)
    }

    /// Number of values, nulls included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Iterate over non-null values.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Count distinct values. Nulls form one extra value when `include_nulls` is set.
    pub fn distinct_count(&self, include_nulls: bool) -> usize {
        let mut seen = HashSet::new();
        for value in &self.values {
            if value.is_null() && !include_nulls {
                continue;
            }
            seen.insert(value.distinct_key());
        }
        seen.len()
    }

    /// Tally value kinds, most frequent first.
    pub fn kind_counts(&self) -> IndexMap<ValueKind, usize> {
        let mut counts: IndexMap<ValueKind, usize> = IndexMap::new();
        for value in &self.values {
            *counts.entry(value.kind()).or_insert(0) += 1;
        }
        counts.sort_by(|ka, a, kb, b| b.cmp(a).then(ka.cmp(kb)));
        counts
    }

    /// Largest share of a single non-null value among non-null values.
    ///
    /// Returns 0.0 when the column has no non-null values.
    pub fn top_frequency(&self) -> f64 {
        let mut counts = std::collections::HashMap::new();
        let mut total = 0usize;
        for value in self.non_null() {
            *counts.entry(value.distinct_key()).or_insert(0usize) += 1;
            total += 1;
        }

        match counts.values().max() {
            Some(&top) if total > 0 => top as f64 / total as f64,
            _ => 0.0,
        }
    }
}

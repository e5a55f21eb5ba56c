//! In-memory tabular data model.

mod column;
mod summary;
mod table;
mod value;

pub use column::{Column, StorageType};
pub use summary::{CategoricalSummary, Describe, NumericSummary};
pub use table::Dataset;
pub use value::{Value, ValueKind};

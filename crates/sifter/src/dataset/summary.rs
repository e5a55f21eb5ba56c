//! Text previews and descriptive summaries of a dataset.
//!
//! These feed prompt construction and the browser preview; they are not part
//! of the issue report.

use serde::{Deserialize, Serialize};

use crate::stats::{mean, quantile_sorted, sample_std, sorted_values};

use super::table::Dataset;

/// Summary of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summary of one non-numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

/// Descriptive statistics for a dataset.
///
/// Numeric columns are summarised when there are any; otherwise the
/// remaining columns get categorical summaries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Describe {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numeric: Vec<NumericSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categorical: Vec<CategoricalSummary>,
}

impl Dataset {
    /// Render the first `n` rows as a fixed-width table with a row index.
    pub fn head_text(&self, n: usize) -> String {
        let rows = self.row_count().min(n);

        let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows + 1);
        let mut header = vec![String::new()];
        header.extend(self.columns().iter().map(|c| c.name.clone()));
        grid.push(header);

        for row in 0..rows {
            let mut line = vec![row.to_string()];
            line.extend(self.columns().iter().map(|c| c.values[row].display()));
            grid.push(line);
        }

        render_grid(&grid)
    }

    /// Compute descriptive statistics.
    pub fn describe(&self) -> Describe {
        let numeric: Vec<NumericSummary> = self
            .columns()
            .iter()
            .filter(|c| c.storage.is_numeric())
            .map(|c| {
                let sorted = sorted_values(c.non_null().filter_map(|v| v.as_f64()));
                NumericSummary {
                    column: c.name.clone(),
                    count: sorted.len(),
                    mean: mean(&sorted),
                    std: sample_std(&sorted),
                    min: sorted.first().copied().unwrap_or(f64::NAN),
                    q25: quantile_sorted(&sorted, 0.25),
                    median: quantile_sorted(&sorted, 0.5),
                    q75: quantile_sorted(&sorted, 0.75),
                    max: sorted.last().copied().unwrap_or(f64::NAN),
                }
            })
            .collect();

        if !numeric.is_empty() {
            return Describe {
                numeric,
                categorical: Vec::new(),
            };
        }

        let categorical = self
            .columns()
            .iter()
            .map(|c| {
                let mut counts: indexmap::IndexMap<String, usize> = indexmap::IndexMap::new();
                for value in c.non_null() {
                    *counts.entry(value.display()).or_insert(0) += 1;
                }
                let top = counts
                    .iter()
                    .fold(None, |best: Option<(&String, usize)>, (k, &v)| match best {
                        Some((_, bv)) if bv >= v => best,
                        _ => Some((k, v)),
                    });
                CategoricalSummary {
                    column: c.name.clone(),
                    count: c.len() - c.null_count(),
                    unique: c.distinct_count(false),
                    top: top.map(|(k, _)| k.clone()),
                    freq: top.map(|(_, v)| v).unwrap_or(0),
                }
            })
            .collect();

        Describe {
            numeric: Vec::new(),
            categorical,
        }
    }
}

impl Describe {
    /// Render as a statistics-by-column table.
    pub fn to_text(&self) -> String {
        if !self.numeric.is_empty() {
            let mut grid = vec![header_row(self.numeric.iter().map(|s| s.column.as_str()))];
            let rows: [(&str, fn(&NumericSummary) -> String); 8] = [
                ("count", |s| format!("{:.1}", s.count as f64)),
                ("mean", |s| format_stat(s.mean)),
                ("std", |s| format_stat(s.std)),
                ("min", |s| format_stat(s.min)),
                ("25%", |s| format_stat(s.q25)),
                ("50%", |s| format_stat(s.median)),
                ("75%", |s| format_stat(s.q75)),
                ("max", |s| format_stat(s.max)),
            ];
            for (label, cell) in rows {
                let mut line = vec![label.to_string()];
                line.extend(self.numeric.iter().map(cell));
                grid.push(line);
            }
            return render_grid(&grid);
        }

        if self.categorical.is_empty() {
            return "No columns to describe.".to_string();
        }

        let mut grid = vec![header_row(self.categorical.iter().map(|s| s.column.as_str()))];
        let rows: [(&str, fn(&CategoricalSummary) -> String); 4] = [
            ("count", |s| s.count.to_string()),
            ("unique", |s| s.unique.to_string()),
            ("top", |s| s.top.clone().unwrap_or_else(|| "NaN".to_string())),
            ("freq", |s| s.freq.to_string()),
        ];
        for (label, cell) in rows {
            let mut line = vec![label.to_string()];
            line.extend(self.categorical.iter().map(cell));
            grid.push(line);
        }
        render_grid(&grid)
    }
}

fn header_row<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut header = vec![String::new()];
    header.extend(names.map(str::to_string));
    header
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", value)
    }
}

/// Right-align every cell to its column width.
fn render_grid(grid: &[Vec<String>]) -> String {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..width)
        .map(|i| {
            grid.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    grid.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:>width$}", cell, width = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, StorageType, Value};

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::new("name", StorageType::Text, vec!["Alice".into(), "Bob".into(), Value::Null]),
            Column::new("age", StorageType::Integer, vec![30.into(), 25.into(), 41.into()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_head_text() {
        let text = sample().head_text(2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("name"));
        assert!(lines[0].contains("age"));
        assert!(lines[1].contains("Alice"));
        assert!(lines[2].contains("Bob"));
        assert!(!text.contains("41"));
    }

    #[test]
    fn test_describe_numeric() {
        let describe = sample().describe();
        assert_eq!(describe.numeric.len(), 1);
        let age = &describe.numeric[0];
        assert_eq!(age.count, 3);
        assert_eq!(age.min, 25.0);
        assert_eq!(age.max, 41.0);
        assert_eq!(age.median, 30.0);
        assert!(describe.to_text().contains("mean"));
    }

    #[test]
    fn test_describe_categorical_only() {
        let ds = Dataset::new(vec![Column::new(
            "color",
            StorageType::Text,
            vec!["red".into(), "blue".into(), "red".into()],
        )])
        .unwrap();
        let describe = ds.describe();
        assert!(describe.numeric.is_empty());
        assert_eq!(describe.categorical[0].top.as_deref(), Some("red"));
        assert_eq!(describe.categorical[0].freq, 2);
        assert_eq!(describe.categorical[0].unique, 2);
        assert!(describe.to_text().contains("freq"));
    }
}

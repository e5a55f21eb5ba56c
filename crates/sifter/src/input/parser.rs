//! CSV/TSV parser with delimiter detection and column type inference.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::SourceMetadata;
use crate::dataset::{Column, Dataset, StorageType, Value};
use crate::error::{Result, SifterError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Cell contents read as missing values. Matched exactly, without trimming.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_TOKENS: &[&str] = &["True", "TRUE", "true"];
const FALSE_TOKENS: &[&str] = &["False", "FALSE", "false"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Pad short rows and truncate long ones instead of failing.
    pub flexible: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            flexible: false,
        }
    }
}

/// Parses delimited text into a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| SifterError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_bytes(&contents, path)
    }

    /// Parse in-memory contents, e.g. an uploaded file.
    ///
    /// `name` is recorded in the metadata as the source path.
    pub fn parse_bytes(
        &self,
        contents: &[u8],
        name: impl AsRef<Path>,
    ) -> Result<(Dataset, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(contents)?,
        };

        let dataset = self.read_dataset(contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            format = %format,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "parsed delimited data"
        );

        let metadata = SourceMetadata::new(
            name.as_ref().to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    fn read_dataset(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let mut first_data: Option<csv::StringRecord> = None;
        let headers: Vec<String> = match records.next() {
            Some(record) => {
                let record = record?;
                if self.config.has_header {
                    unique_headers(record.iter())
                } else {
                    let names = (0..record.len()).map(|i| format!("column_{}", i + 1)).collect();
                    first_data = Some(record);
                    names
                }
            }
            None => return Err(SifterError::EmptyData("No header row found".to_string())),
        };

        if headers.is_empty() {
            return Err(SifterError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); expected_cols];

        let rest = records.map(|r| r.map_err(SifterError::from));
        let all = first_data.into_iter().map(Ok).chain(rest);

        for (row_idx, result) in all.enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            if record.len() != expected_cols && !self.config.flexible {
                return Err(SifterError::Parse {
                    row: row_idx + 1,
                    column: record.len(),
                    message: format!("expected {} fields, found {}", expected_cols, record.len()),
                });
            }

            for (col, column_cells) in cells.iter_mut().enumerate() {
                column_cells.push(record.get(col).unwrap_or("").to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, column_cells)| infer_column(name, column_cells))
            .collect();

        Dataset::new(columns)
    }
}

/// Name empty headers `Unnamed: i` and suffix repeats with `.1`, `.2`, ...
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();

    for (i, name) in raw.enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        while let Some(n) = seen.get_mut(&candidate) {
            *n += 1;
            candidate = format!("{}.{}", base, n);
        }
        seen.insert(candidate.clone(), 0);
        headers.push(candidate);
    }

    headers
}

/// Returns true if a raw cell represents a missing value.
pub fn is_null_token(value: &str) -> bool {
    NULL_TOKENS.contains(&value)
}

/// Decide a column's storage type from its non-null cells and convert them.
fn infer_column(name: String, cells: Vec<String>) -> Column {
    let present: Vec<&str> = cells
        .iter()
        .map(String::as_str)
        .filter(|c| !is_null_token(c))
        .collect();

    let storage = if present.is_empty() {
        StorageType::Float
    } else if present.iter().all(|c| c.trim().parse::<i64>().is_ok()) {
        StorageType::Integer
    } else if present.iter().all(|c| c.trim().parse::<f64>().is_ok()) {
        StorageType::Float
    } else if present.iter().all(|c| parse_bool(c).is_some()) {
        StorageType::Boolean
    } else {
        StorageType::Text
    };

    let values = cells
        .into_iter()
        .map(|cell| {
            if is_null_token(&cell) {
                return Value::Null;
            }
            match storage {
                StorageType::Integer => cell.trim().parse().map(Value::Int).unwrap_or(Value::Null),
                StorageType::Float => cell.trim().parse().map(Value::Float).unwrap_or(Value::Null),
                StorageType::Boolean => parse_bool(&cell).map(Value::Bool).unwrap_or(Value::Null),
                _ => Value::Text(cell),
            }
        })
        .collect();

    Column::new(name, storage, values)
}

fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if TRUE_TOKENS.contains(&trimmed) {
        Some(true)
    } else if FALSE_TOKENS.contains(&trimmed) {
        Some(false)
    } else {
        None
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SifterError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab gets a small bonus
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ValueKind;

    fn parse(data: &str) -> Dataset {
        Parser::new()
            .parse_bytes(data.as_bytes(), "test.csv")
            .unwrap()
            .0
    }

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_parse_csv_types() {
        let ds = parse("name,age,score,active\nAlice,30,1.5,true\nBob,25,2,False\n");

        assert_eq!(ds.column_names(), vec!["name", "age", "score", "active"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column("name").unwrap().storage, StorageType::Text);
        assert_eq!(ds.column("age").unwrap().storage, StorageType::Integer);
        assert_eq!(ds.column("score").unwrap().storage, StorageType::Float);
        assert_eq!(ds.column("active").unwrap().storage, StorageType::Boolean);
        assert_eq!(ds.column("score").unwrap().values[1], Value::Float(2.0));
        assert_eq!(ds.column("active").unwrap().values[1], Value::Bool(false));
    }

    #[test]
    fn test_null_tokens() {
        let ds = parse("a,b\n1,x\nNA,\nnan,N/A\n");
        let a = ds.column("a").unwrap();
        assert_eq!(a.storage, StorageType::Integer);
        assert_eq!(a.null_count(), 2);

        let b = ds.column("b").unwrap();
        assert_eq!(b.storage, StorageType::Text);
        assert_eq!(b.values[1].kind(), ValueKind::Null);
        assert_eq!(b.null_count(), 2);
    }

    #[test]
    fn test_is_null_token() {
        assert!(is_null_token(""));
        assert!(is_null_token("NA"));
        assert!(is_null_token("n/a"));
        assert!(is_null_token("NULL"));
        assert!(is_null_token("None"));
        assert!(!is_null_token("na"));
        assert!(!is_null_token("value"));
        assert!(!is_null_token("0"));
    }

    #[test]
    fn test_all_null_column_is_float() {
        let ds = parse("a,b\n1,\n2,\n");
        assert_eq!(ds.column("b").unwrap().storage, StorageType::Float);
    }

    #[test]
    fn test_header_only_file() {
        let ds = parse("a,b,c\n");
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.row_count(), 0);
    }

    #[test]
    fn test_duplicate_and_empty_headers() {
        let ds = parse("a,a,,a\n1,2,3,4\n");
        assert_eq!(ds.column_names(), vec!["a", "a.1", "Unnamed: 2", "a.2"]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Parser::new().parse_bytes(b"a,b\n1,2\n3\n", "ragged.csv");
        assert!(matches!(result, Err(SifterError::Parse { row: 2, .. })));
    }

    #[test]
    fn test_ragged_rows_flexible() {
        let parser = Parser::with_config(ParserConfig {
            flexible: true,
            ..Default::default()
        });
        let (ds, _) = parser.parse_bytes(b"a,b\n1,2\n3\n", "ragged.csv").unwrap();
        assert_eq!(ds.column("b").unwrap().values[1], Value::Null);
    }

    #[test]
    fn test_no_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..Default::default()
        });
        let (ds, _) = parser.parse_bytes(b"1,2\n3,4\n", "raw.csv").unwrap();
        assert_eq!(ds.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let result = Parser::new().parse_bytes(b"", "empty.csv");
        assert!(matches!(result, Err(SifterError::EmptyData(_))));
    }

    #[test]
    fn test_metadata() {
        let (_, meta) = Parser::new()
            .parse_bytes(b"a\tb\n1\t2\n", "upload.tsv")
            .unwrap();
        assert_eq!(meta.file, "upload.tsv");
        assert_eq!(meta.format, "tsv");
        assert!(meta.hash.starts_with("sha256:"));
        assert_eq!(meta.row_count, 1);
    }
}

//! CSV/TSV/JSON/workbook decoding with delimiter detection.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use indexmap::IndexSet;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::{DataSenseError, Result};
use crate::value::{CellValue, Row};

use super::source::{DecodedTable, SourceMetadata};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Container format of an input file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// CSV, TSV or another single-byte delimited text file.
    Delimited,
    /// A JSON array of records.
    Json,
    /// A spreadsheet workbook (xlsx, xlsm, xls, xlsb, ods); the first sheet is read.
    Workbook,
}

impl InputFormat {
    /// Pick the format for a path, rejecting anything we cannot decode.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" | "tsv" | "txt" => Ok(InputFormat::Delimited),
            "json" => Ok(InputFormat::Json),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => {
                if cfg!(feature = "excel") {
                    Ok(InputFormat::Workbook)
                } else {
                    Err(DataSenseError::UnsupportedFormat(format!(
                        "spreadsheet workbooks (.{}) need the `excel` feature",
                        extension
                    )))
                }
            }
            "" => Err(DataSenseError::UnsupportedFormat(
                "file has no extension; use .csv, .tsv, .txt, .json or .xlsx".to_string(),
            )),
            other => Err(DataSenseError::UnsupportedFormat(format!(
                ".{} files are not supported; use .csv, .tsv, .txt, .json or .xlsx",
                other
            ))),
        }
    }
}

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
    /// Turn numeric and boolean literals in delimited files into typed cells.
    pub dynamic_typing: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            dynamic_typing: true,
        }
    }
}

/// Decodes tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the decoded table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DecodedTable, SourceMetadata)> {
        let path = path.as_ref();
        let input_format = InputFormat::from_path(path)?;

        let io_err = |source| DataSenseError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (table, format) = self.decode(&contents, input_format)?;
        tracing::debug!(path = %path.display(), format = %format, "decoded file");

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Decode in-memory contents, picking the format from `file_name`.
    pub fn parse_bytes(&self, bytes: &[u8], file_name: &str) -> Result<DecodedTable> {
        let input_format = InputFormat::from_path(Path::new(file_name))?;
        Ok(self.decode(bytes, input_format)?.0)
    }

    fn decode(&self, bytes: &[u8], input_format: InputFormat) -> Result<(DecodedTable, String)> {
        match input_format {
            InputFormat::Json => Ok((self.parse_json(bytes)?, "json".to_string())),
            #[cfg(feature = "excel")]
            InputFormat::Workbook => {
                let (table, format) = super::workbook::parse_workbook(bytes, self.config.max_rows)?;
                Ok((table, format.to_string()))
            }
            #[cfg(not(feature = "excel"))]
            InputFormat::Workbook => Err(DataSenseError::UnsupportedFormat(
                "spreadsheet workbooks need the `excel` feature".to_string(),
            )),
            InputFormat::Delimited => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(bytes)?,
                };
                let table = self.parse_delimited(bytes, delimiter)?;
                Ok((table, delimited_format_name(delimiter)))
            }
        }
    }

    /// Decode delimited text with a known delimiter.
    pub fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<DecodedTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }
            records.push(result?);
        }

        let columns = if self.config.has_header {
            unique_headers(reader.headers()?.iter())
        } else {
            match records.first() {
                Some(record) => (0..record.len()).map(|i| format!("column_{}", i + 1)).collect(),
                None => Vec::new(),
            }
        };

        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            return Err(DataSenseError::EmptySource("No columns found".to_string()));
        }
        if records.is_empty() {
            return Err(DataSenseError::EmptySource("No data rows found".to_string()));
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| {
                        // Short records are padded, extra fields dropped.
                        let raw = record.get(idx).unwrap_or("");
                        (column.clone(), self.decode_field(raw))
                    })
                    .collect::<Row>()
            })
            .collect();

        Ok(DecodedTable::new(columns, rows))
    }

    /// Decode a JSON array of records.
    ///
    /// Columns follow the order keys first appear across records; a record
    /// missing a key gets an absent cell for it.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<DecodedTable> {
        let records: Vec<Map<String, Value>> = serde_json::from_slice(bytes)?;
        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let records: Vec<_> = records.into_iter().take(limit).collect();

        if records.is_empty() {
            return Err(DataSenseError::EmptySource("The spreadsheet is empty".to_string()));
        }

        let columns: IndexSet<String> = records
            .iter()
            .flat_map(|record| record.keys().cloned())
            .collect();
        if columns.is_empty() {
            return Err(DataSenseError::EmptySource("No columns found".to_string()));
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| {
                        let cell = record
                            .remove(column)
                            .map(CellValue::from)
                            .unwrap_or(CellValue::Absent);
                        (column.clone(), cell)
                    })
                    .collect::<Row>()
            })
            .collect();

        Ok(DecodedTable::new(columns.into_iter().collect(), rows))
    }

    fn decode_field(&self, raw: &str) -> CellValue {
        if self.config.dynamic_typing {
            CellValue::parse_typed(raw)
        } else {
            CellValue::Text(raw.to_string())
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn delimited_format_name(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
    .to_string()
}

/// Make header names unique by suffixing repeats with `_1`, `_2`, ...
pub(super) fn unique_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();

    for header in headers {
        let mut name = header.to_string();
        let mut suffix = 1;
        while !seen.insert(name.clone()) {
            name = format!("{}_{}", header, suffix);
            suffix += 1;
        }
        columns.push(name);
    }

    columns
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(DataSenseError::EmptySource("No lines to analyze".to_string()));
    }

    let mut best = (b',', 0usize);

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / counts.len() as f64;

        // Consistent counts win; tab breaks ties since it rarely appears in values.
        let score = if counts.iter().all(|&c| c == first) {
            first * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first * 100
        } else {
            first
        };

        if score > best.1 {
            best = (delim, score);
        }
    }

    Ok(best.0)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut in_quotes = false;

    line.chars()
        .filter(|&ch| {
            if ch == '"' {
                in_quotes = !in_quotes;
                false
            } else {
                ch == delim_char && !in_quotes
            }
        })
        .count()
}

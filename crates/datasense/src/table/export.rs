//! Writing table rows out as CSV, TSV or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataSenseError, Result};
use crate::value::CellValue;

use super::DataResult;

/// Output format for exported rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

impl DataResult {
    /// Write the rows to `path` in the given format.
    pub fn export(&self, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| DataSenseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        self.write_rows(&mut writer, format)?;
        writer.flush().map_err(|source| DataSenseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            id = %self.id,
            rows = self.row_count(),
            format = format.extension(),
            "exported table"
        );
        Ok(())
    }

    /// Write the rows to any writer in the given format.
    ///
    /// Delimited output has a header row in column order; null and absent
    /// cells become empty fields.
    pub fn write_rows<W: Write>(&self, writer: W, format: ExportFormat) -> Result<()> {
        let delimiter = match format {
            ExportFormat::Json => {
                serde_json::to_writer_pretty(writer, &self.rows)?;
                return Ok(());
            }
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            let record = self.columns.iter().map(|column| match row.get(column) {
                None | Some(CellValue::Absent) | Some(CellValue::Null) => String::new(),
                Some(cell) => cell.to_string(),
            });
            csv_writer.write_record(record)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::input::DecodedTable;
    use crate::ingest::ingest;
    use crate::value::{CellValue, Row};

    use super::*;

    fn sample_table() -> DataResult {
        let mut first = Row::new();
        first.insert("id".to_string(), CellValue::from(1i64));
        first.insert("city".to_string(), CellValue::from("Lyon, FR"));
        let mut second = Row::new();
        second.insert("id".to_string(), CellValue::from(2.5));
        second.insert("city".to_string(), CellValue::Null);

        let decoded = DecodedTable::new(vec!["id".to_string(), "city".to_string()], vec![first, second]);
        ingest(decoded, "cities.csv").unwrap()
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        sample_table().write_rows(&mut out, ExportFormat::Csv).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "id,city\n1,\"Lyon, FR\"\n2.5,\n");
    }

    #[test]
    fn test_write_tsv() {
        let mut out = Vec::new();
        sample_table().write_rows(&mut out, ExportFormat::Tsv).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "id\tcity\n1\tLyon, FR\n2.5\t\n");
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        sample_table().write_rows(&mut out, ExportFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["city"], "Lyon, FR");
        assert!(value[1]["city"].is_null());
    }
}

//! Turning a decoded table into a [`DataResult`].

use indexmap::IndexMap;

use crate::error::{DataSenseError, Result};
use crate::input::{DecodedTable, SourceMetadata};
use crate::quality::QualityAnalyzer;
use crate::table::{generate_table_id, DataResult, TableSummary};
use crate::value::{Row, ValueKind};

/// Builds [`DataResult`]s from decoded tables.
pub struct TableIngestor {
    analyzer: QualityAnalyzer,
}

impl TableIngestor {
    /// Create an ingestor with the default quality checks.
    pub fn new() -> Self {
        Self::with_analyzer(QualityAnalyzer::new())
    }

    /// Create an ingestor with a custom analyzer.
    pub fn with_analyzer(analyzer: QualityAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Ingest a decoded table under the given file name.
    ///
    /// Fails with [`DataSenseError::EmptySource`] when the table has no
    /// columns, so an empty file never reads as a perfectly healthy one.
    pub fn ingest(&self, decoded: DecodedTable, file_name: impl Into<String>) -> Result<DataResult> {
        let file_name = file_name.into();
        let DecodedTable { columns, rows } = decoded;

        if columns.is_empty() {
            return Err(DataSenseError::EmptySource(format!(
                "'{}' has no columns",
                file_name
            )));
        }

        let column_types = infer_column_types(&columns, &rows);
        let health = self.analyzer.analyze(&columns, &rows);

        let data = DataResult {
            id: generate_table_id("table"),
            file_name,
            summary: TableSummary {
                total_rows: rows.len(),
                column_types,
            },
            columns,
            rows,
            health: Some(health),
            source: None,
        };

        tracing::debug!(
            id = %data.id,
            file = %data.file_name,
            rows = data.row_count(),
            columns = data.column_count(),
            score = data.score(),
            "ingested table"
        );

        Ok(data)
    }

    /// Ingest a decoded file, naming the table after it and keeping its metadata.
    pub fn ingest_source(&self, decoded: DecodedTable, source: SourceMetadata) -> Result<DataResult> {
        let mut data = self.ingest(decoded, source.file.clone())?;
        data.source = Some(source);
        Ok(data)
    }
}

impl Default for TableIngestor {
    fn default() -> Self {
        Self::new()
    }
}

/// Ingest a decoded table with the default quality checks.
pub fn ingest(decoded: DecodedTable, file_name: impl Into<String>) -> Result<DataResult> {
    TableIngestor::new().ingest(decoded, file_name)
}

/// Kind of the first non-null, non-absent value per column.
///
/// Columns without any such value get [`ValueKind::Undefined`].
pub fn infer_column_types(columns: &[String], rows: &[Row]) -> IndexMap<String, ValueKind> {
    columns
        .iter()
        .map(|column| {
            let kind = rows
                .iter()
                .filter_map(|row| row.get(column))
                .find_map(|cell| cell.kind())
                .unwrap_or(ValueKind::Undefined);
            (column.clone(), kind)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::IssueType;
    use crate::value::CellValue;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ingest_basic() {
        let decoded = DecodedTable::new(
            columns(&["id", "name"]),
            vec![
                row(&[("id", CellValue::from(1i64)), ("name", CellValue::from("A"))]),
                row(&[("id", CellValue::from(2i64)), ("name", CellValue::from("B"))]),
            ],
        );

        let data = ingest(decoded, "people.csv").unwrap();

        assert!(data.id.starts_with("table_"));
        assert_eq!(data.file_name, "people.csv");
        assert_eq!(data.columns, vec!["id", "name"]);
        assert_eq!(data.summary.total_rows, 2);
        assert_eq!(data.summary.column_types.len(), data.columns.len());
        assert_eq!(data.column_type("id"), ValueKind::Number);
        assert_eq!(data.column_type("name"), ValueKind::String);
        assert_eq!(data.score(), Some(100));
    }

    #[test]
    fn test_column_type_skips_nulls() {
        let decoded = DecodedTable::new(
            columns(&["flag", "empty"]),
            vec![
                row(&[("flag", CellValue::Null), ("empty", CellValue::Null)]),
                row(&[("flag", CellValue::Absent), ("empty", CellValue::Absent)]),
                row(&[("flag", CellValue::from(true)), ("empty", CellValue::Null)]),
            ],
        );

        let data = ingest(decoded, "flags.json").unwrap();

        assert_eq!(data.column_type("flag"), ValueKind::Boolean);
        assert_eq!(data.column_type("empty"), ValueKind::Undefined);
    }

    #[test]
    fn test_empty_string_is_a_string_sample() {
        let decoded = DecodedTable::new(
            columns(&["qty"]),
            vec![
                row(&[("qty", CellValue::from(""))]),
                row(&[("qty", CellValue::from(3i64))]),
            ],
        );

        let data = ingest(decoded, "qty.csv").unwrap();
        assert_eq!(data.column_type("qty"), ValueKind::String);
    }

    #[test]
    fn test_no_columns_is_an_error() {
        let err = ingest(DecodedTable::default(), "empty.csv").unwrap_err();
        assert!(matches!(err, DataSenseError::EmptySource(_)));
    }

    #[test]
    fn test_no_rows_is_healthy_with_undefined_types() {
        let decoded = DecodedTable::new(columns(&["a", "b"]), Vec::new());
        let data = ingest(decoded, "blank.csv").unwrap();

        assert_eq!(data.summary.total_rows, 0);
        assert_eq!(data.column_type("a"), ValueKind::Undefined);
        assert_eq!(data.summary.column_types.len(), 2);
        assert_eq!(data.score(), Some(100));
    }

    #[test]
    fn test_ingest_attaches_health() {
        let rows = (0..10)
            .map(|i| row(&[("id", CellValue::from(i as i64)), ("status", CellValue::from("active"))]))
            .collect();
        let decoded = DecodedTable::new(columns(&["id", "status"]), rows);

        let data = ingest(decoded, "accounts.csv").unwrap();
        let health = data.health.as_ref().unwrap();

        assert_eq!(health.columns_with(IssueType::Constant), vec!["status"]);
        assert_eq!(health.score, 95);
    }

    #[test]
    fn test_each_ingest_gets_a_fresh_id() {
        let make = || DecodedTable::new(columns(&["a"]), vec![row(&[("a", CellValue::from(1i64))])]);
        let first = ingest(make(), "a.csv").unwrap();
        let second = ingest(make(), "a.csv").unwrap();

        assert_ne!(first.id, second.id);
    }
}

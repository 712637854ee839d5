//! Persistence for tables - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{DataSenseError, Result};

use super::DataResult;

impl DataResult {
    /// Save the table, health report included, to a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use datasense::DataResult;
    /// # fn example(table: &DataResult) -> datasense::Result<()> {
    /// table.save("sales.datasense.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    DataSenseError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            DataSenseError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| {
            DataSenseError::Persistence(format!("Failed to serialize table '{}': {}", self.id, e))
        })?;

        tracing::debug!(id = %self.id, path = %path.display(), "saved table");
        Ok(())
    }

    /// Load a table previously written by [`DataResult::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            DataSenseError::Persistence(format!(
                "Failed to open file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            DataSenseError::Persistence(format!(
                "Failed to parse table '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::input::DecodedTable;
    use crate::ingest::ingest;
    use crate::value::{CellValue, Row};

    use super::*;

    fn sample_table() -> DataResult {
        let rows: Vec<Row> = (0..3)
            .map(|i| {
                let mut row = Row::new();
                row.insert("id".to_string(), CellValue::from(i as i64));
                row.insert(
                    "note".to_string(),
                    if i == 0 { CellValue::Null } else { CellValue::from("ok") },
                );
                row
            })
            .collect();
        let decoded = DecodedTable::new(vec!["id".to_string(), "note".to_string()], rows);
        ingest(decoded, "notes.csv").unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("notes.json");
        let table = sample_table();

        table.save(&path).unwrap();
        let loaded = DataResult::load(&path).unwrap();

        assert_eq!(loaded.id, table.id);
        assert_eq!(loaded.columns, table.columns);
        assert_eq!(loaded.health, table.health);
        assert_eq!(loaded.rows[0]["note"], CellValue::Null);
        assert_eq!(loaded.rows[1]["id"], CellValue::Number(1.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DataResult::load("/nonexistent/table.json").unwrap_err();
        assert!(matches!(err, DataSenseError::Persistence(_)));
    }
}

//! Transformation engine that applies corrective fixes to tables.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::quality::{IssueType, QualityAnalyzer};
use crate::table::DataResult;
use crate::value::{CellValue, ValueKind};

use super::operations::{RowAudit, TransformChange, TransformOperation, TransformResult};

/// Engine for applying corrective operations to tables.
///
/// Every operation returns a new table and leaves its input untouched.
pub struct TransformEngine {
    analyzer: QualityAnalyzer,
}

impl TransformEngine {
    /// Create a new transform engine.
    pub fn new() -> Self {
        Self {
            analyzer: QualityAnalyzer::new(),
        }
    }

    /// Replace missing cells with `0` in number columns and `""` elsewhere,
    /// then recompute health.
    pub fn clean_missing_values(&self, data: &DataResult) -> DataResult {
        self.fill_missing(data).0
    }

    /// Drop the columns `data.health` flags as constant and recompute health.
    ///
    /// Without a health report, or without flagged columns, the input is
    /// returned as is.
    pub fn remove_constant_columns<'a>(&self, data: &'a DataResult) -> Cow<'a, DataResult> {
        match self.drop_constant(data) {
            Some((next, _)) => Cow::Owned(next),
            None => Cow::Borrowed(data),
        }
    }

    /// Apply operations in order and report what changed.
    pub fn apply(
        &self,
        data: &DataResult,
        operations: &[TransformOperation],
    ) -> (DataResult, TransformResult) {
        let mut current = data.clone();
        let mut result = TransformResult::new();

        for operation in operations {
            match operation {
                TransformOperation::CleanMissing => {
                    let (next, changes) = self.fill_missing(&current);
                    changes.into_iter().for_each(|c| result.add_change(c));
                    current = next;
                }
                TransformOperation::RemoveConstantColumns => {
                    if let Some((next, removed)) = self.drop_constant(&current) {
                        for column in &removed {
                            result.add_change(TransformChange {
                                description: operation.description().to_string(),
                                column: column.clone(),
                                values_changed: 0,
                                row_audits: Vec::new(),
                            });
                        }
                        result.columns_removed.extend(removed);
                        current = next;
                    }
                }
            }
            result.operations_applied += 1;
        }

        tracing::debug!(
            id = %data.id,
            operations = result.operations_applied,
            values_changed = result.values_changed,
            columns_removed = result.columns_removed.len(),
            "applied transforms"
        );

        (current, result)
    }

    fn fill_missing(&self, data: &DataResult) -> (DataResult, Vec<TransformChange>) {
        let mut rows = data.rows.clone();
        let mut changes = Vec::new();

        for column in &data.columns {
            let replacement = match data.column_type(column) {
                ValueKind::Number => CellValue::Number(0.0),
                _ => CellValue::Text(String::new()),
            };

            let mut audits = Vec::new();
            for (idx, row) in rows.iter_mut().enumerate() {
                let cell = row.entry(column.clone()).or_insert(CellValue::Absent);
                if cell.is_missing() && *cell != replacement {
                    audits.push(RowAudit {
                        row: idx,
                        original_value: cell.to_string(),
                        new_value: replacement.to_string(),
                    });
                    *cell = replacement.clone();
                }
            }

            if !audits.is_empty() {
                changes.push(TransformChange {
                    description: TransformOperation::CleanMissing.description().to_string(),
                    column: column.clone(),
                    values_changed: audits.len(),
                    row_audits: audits,
                });
            }
        }

        let health = self.analyzer.analyze(&data.columns, &rows);
        let next = DataResult {
            rows,
            health: Some(health),
            ..data.clone_without_rows()
        };

        (next, changes)
    }

    fn drop_constant(&self, data: &DataResult) -> Option<(DataResult, Vec<String>)> {
        let health = data.health.as_ref()?;
        let constant: HashSet<&str> = health
            .columns_with(IssueType::Constant)
            .into_iter()
            .collect();
        if constant.is_empty() {
            return None;
        }

        let columns: Vec<String> = data
            .columns
            .iter()
            .filter(|c| !constant.contains(c.as_str()))
            .cloned()
            .collect();
        let removed: Vec<String> = data
            .columns
            .iter()
            .filter(|c| constant.contains(c.as_str()))
            .cloned()
            .collect();

        let rows: Vec<_> = data
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.retain(|key, _| !constant.contains(key.as_str()));
                row
            })
            .collect();

        let mut summary = data.summary.clone();
        summary
            .column_types
            .retain(|key, _| !constant.contains(key.as_str()));

        let health = self.analyzer.analyze(&columns, &rows);

        let next = DataResult {
            columns,
            rows,
            summary,
            health: Some(health),
            ..data.clone_without_rows()
        };

        Some((next, removed))
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DataResult {
    /// Copy of every field except the rows, which are left empty.
    fn clone_without_rows(&self) -> DataResult {
        DataResult {
            id: self.id.clone(),
            file_name: self.file_name.clone(),
            columns: self.columns.clone(),
            rows: Vec::new(),
            summary: self.summary.clone(),
            health: self.health.clone(),
            source: self.source.clone(),
        }
    }
}

/// Fill missing cells with the default engine.
pub fn clean_missing_values(data: &DataResult) -> DataResult {
    TransformEngine::new().clean_missing_values(data)
}

/// Drop constant-flagged columns with the default engine.
pub fn remove_constant_columns(data: &DataResult) -> Cow<'_, DataResult> {
    TransformEngine::new().remove_constant_columns(data)
}

//! The ingested-table value object.

mod export;
mod persistence;

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::SourceMetadata;
use crate::quality::DataHealthReport;
use crate::value::{Row, ValueKind};

pub use export::ExportFormat;

/// Row count and best-effort column kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Number of rows.
    pub total_rows: usize,
    /// Kind of the first non-null sample per column.
    pub column_types: IndexMap<String, ValueKind>,
}

/// A table produced by ingestion, a transform or a join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResult {
    /// Process-unique identifier, used to select tables, never a data key.
    pub id: String,
    /// Source name used for display and for naming joined tables.
    pub file_name: String,
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Records keyed by column name.
    pub rows: Vec<Row>,
    /// Row count and column kinds.
    pub summary: TableSummary,
    /// Quality report, attached by the ingestor and the transformer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<DataHealthReport>,
    /// Metadata of the decoded file, if the table came from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
}

impl DataResult {
    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the column is part of this table.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Recorded kind for a column, `Undefined` when unknown.
    pub fn column_type(&self, name: &str) -> ValueKind {
        self.summary
            .column_types
            .get(name)
            .copied()
            .unwrap_or_default()
    }

    /// File name up to its first `.`, used to prefix joined columns.
    pub fn base_name(&self) -> &str {
        base_name(&self.file_name)
    }

    /// Health score, if a report is attached.
    pub fn score(&self) -> Option<u32> {
        self.health.as_ref().map(|h| h.score)
    }
}

/// File name up to its first `.`.
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Generate a table ID with the given prefix.
///
/// IDs combine the creation time, the process ID and an in-process counter,
/// so tables saved by an earlier run never share an ID with fresh ones.
pub(crate) fn generate_table_id(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!(
        "{}_{}_{}_{:03}",
        prefix,
        Utc::now().timestamp_millis(),
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// Prefix of a generated ID (`table`, `joined`, ...).
pub(crate) fn id_prefix(id: &str) -> &str {
    id.split('_').next().unwrap_or(id)
}

//! Corrective operations and the record of what they changed.

use serde::{Deserialize, Serialize};

/// A corrective operation the user can trigger on a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOperation {
    /// Fill missing cells with `0` in number columns and `""` elsewhere.
    CleanMissing,
    /// Drop every column the health report flags as constant.
    RemoveConstantColumns,
}

impl TransformOperation {
    /// Get a human-readable description of the operation.
    pub fn description(&self) -> &'static str {
        match self {
            TransformOperation::CleanMissing => "Fill missing values with defaults",
            TransformOperation::RemoveConstantColumns => "Remove constant columns",
        }
    }
}

/// Result of applying a sequence of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Number of operations run.
    pub operations_applied: usize,

    /// Number of cells whose value changed.
    pub values_changed: usize,

    /// Columns dropped from the table.
    pub columns_removed: Vec<String>,

    /// Detailed changes, one per affected column.
    pub changes: Vec<TransformChange>,
}

/// A change made to a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformChange {
    /// Description of the change.
    pub description: String,

    /// Column affected.
    pub column: String,

    /// Number of values changed.
    pub values_changed: usize,

    /// Per-row audit information.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_audits: Vec<RowAudit>,
}

/// Audit information for a single filled cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAudit {
    /// Row index (0-based).
    pub row: usize,

    /// Original value before transformation.
    pub original_value: String,

    /// New value after transformation.
    pub new_value: String,
}

impl TransformResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change to the result.
    pub fn add_change(&mut self, change: TransformChange) {
        self.values_changed += change.values_changed;
        self.changes.push(change);
    }

    /// Returns true if nothing in the table changed.
    pub fn is_noop(&self) -> bool {
        self.values_changed == 0 && self.columns_removed.is_empty()
    }
}

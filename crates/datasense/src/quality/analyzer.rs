//! Column checks and the analyzer that scores a table.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::value::{CellValue, Row, ValueKind};

use super::report::{DataHealthReport, Issue, IssueType, Severity};

/// Suggestions attached to any report with at least one issue.
pub const GENERIC_SUGGESTIONS: [&str; 2] = [
    "Consider cleaning null values or assigning default values.",
    "Make sure numeric columns do not contain text symbols.",
];

/// Minimum row count (exclusive) before a single-valued column counts as constant.
const CONSTANT_MIN_ROWS: usize = 5;

static ABSENT: CellValue = CellValue::Absent;

/// Trait for per-column quality checks.
pub trait ColumnCheck {
    /// Inspect every value of one column and report at most one issue.
    fn check(&self, column: &str, values: &[&CellValue]) -> Option<Issue>;
}

/// Flags columns with null, absent or empty-string cells.
pub struct MissingCheck;

impl ColumnCheck for MissingCheck {
    fn check(&self, column: &str, values: &[&CellValue]) -> Option<Issue> {
        if values.is_empty() {
            return None;
        }

        let null_count = values.iter().filter(|v| v.is_missing()).count();
        let pct = (null_count as f64 / values.len() as f64) * 100.0;
        if pct <= 0.0 {
            return None;
        }

        let severity = if pct > 30.0 {
            Severity::High
        } else if pct > 10.0 {
            Severity::Medium
        } else {
            Severity::Low
        };

        Some(Issue::new(
            column,
            IssueType::Missing,
            severity,
            format!("Column has {:.1}% missing values.", pct),
        ))
    }
}

/// Flags columns whose non-null, non-empty values have more than one runtime kind.
pub struct MixedKindCheck;

impl ColumnCheck for MixedKindCheck {
    fn check(&self, column: &str, values: &[&CellValue]) -> Option<Issue> {
        // Null and "" are skipped; an absent cell counts as its own kind.
        let kinds: IndexSet<ValueKind> = values
            .iter()
            .filter_map(|v| match v {
                CellValue::Null => None,
                CellValue::Text(s) if s.is_empty() => None,
                CellValue::Absent => Some(ValueKind::Undefined),
                _ => v.kind(),
            })
            .collect();

        if kinds.len() <= 1 {
            return None;
        }

        let labels: Vec<&str> = kinds.iter().map(|k| k.label()).collect();
        Some(Issue::new(
            column,
            IssueType::InconsistentType,
            Severity::Medium,
            format!("Mixed data types detected ({}).", labels.join(", ")),
        ))
    }
}

/// Flags columns holding one distinct value across more than a handful of rows.
pub struct ConstantCheck;

impl ColumnCheck for ConstantCheck {
    fn check(&self, column: &str, values: &[&CellValue]) -> Option<Issue> {
        if values.len() <= CONSTANT_MIN_ROWS {
            return None;
        }

        let distinct: HashSet<_> = values.iter().map(|v| v.distinct_key()).collect();
        if distinct.len() != 1 {
            return None;
        }

        Some(Issue::new(
            column,
            IssueType::Constant,
            Severity::Low,
            "This column has the same value in every row.",
        ))
    }
}

/// Scores a table by running every check over every column.
pub struct QualityAnalyzer {
    checks: Vec<Box<dyn ColumnCheck>>,
}

impl QualityAnalyzer {
    /// Create an analyzer with the missing, mixed-kind and constant checks.
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(MissingCheck),
                Box::new(MixedKindCheck),
                Box::new(ConstantCheck),
            ],
        }
    }

    /// Analyze `rows` against the authoritative `columns` list.
    pub fn analyze(&self, columns: &[String], rows: &[Row]) -> DataHealthReport {
        let mut issues = Vec::new();

        for column in columns {
            let values: Vec<&CellValue> = rows
                .iter()
                .map(|row| row.get(column).unwrap_or(&ABSENT))
                .collect();

            for check in &self.checks {
                if let Some(issue) = check.check(column, &values) {
                    issues.push(issue);
                }
            }
        }

        let penalty: u32 = issues.iter().map(Issue::penalty).sum();
        let suggestions = if penalty > 0 {
            GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };
        let score = 100u32.saturating_sub(penalty);

        tracing::debug!(
            columns = columns.len(),
            rows = rows.len(),
            issues = issues.len(),
            score,
            "analyzed table quality"
        );

        DataHealthReport {
            score,
            issues,
            suggestions,
        }
    }
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze a table with the default checks.
pub fn analyze(columns: &[String], rows: &[Row]) -> DataHealthReport {
    QualityAnalyzer::new().analyze(columns, rows)
}

//! Health report types for data quality issues.

use serde::{Deserialize, Serialize};

/// Type of quality issue detected in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Null, absent or empty-string cells.
    Missing,
    /// More than one runtime kind among present values.
    InconsistentType,
    /// A single distinct value across every row.
    Constant,
}

impl IssueType {
    /// Get a human-readable label for the issue type.
    pub fn label(&self) -> &'static str {
        match self {
            IssueType::Missing => "Missing Values",
            IssueType::InconsistentType => "Inconsistent Type",
            IssueType::Constant => "Constant Column",
        }
    }
}

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

/// A single quality defect tied to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Affected column name.
    pub column: String,
    /// Kind of defect.
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    /// Create a new issue.
    pub fn new(
        column: impl Into<String>,
        issue_type: IssueType,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            issue_type,
            severity,
            message: message.into(),
        }
    }

    /// Points this issue subtracts from the health score.
    pub fn penalty(&self) -> u32 {
        match self.issue_type {
            IssueType::Missing => match self.severity {
                Severity::High => 20,
                Severity::Medium => 10,
                Severity::Low => 5,
            },
            IssueType::InconsistentType => 15,
            IssueType::Constant => 5,
        }
    }
}

/// Quality assessment for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataHealthReport {
    /// Score from 0 to 100.
    pub score: u32,
    /// Issues in column order, then check order.
    pub issues: Vec<Issue>,
    /// Generic remediation hints, present iff any issue exists.
    pub suggestions: Vec<String>,
}

impl DataHealthReport {
    /// A report with no issues.
    pub fn healthy() -> Self {
        Self {
            score: 100,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Returns true when no issue was found.
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues recorded for a column.
    pub fn issues_for<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Issue> {
        self.issues.iter().filter(move |i| i.column == column)
    }

    /// Returns true if the column carries an issue of this type.
    pub fn has_issue(&self, column: &str, issue_type: IssueType) -> bool {
        self.issues_for(column).any(|i| i.issue_type == issue_type)
    }

    /// Columns flagged with the given issue type, in report order.
    pub fn columns_with(&self, issue_type: IssueType) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|i| i.issue_type == issue_type)
            .map(|i| i.column.as_str())
            .collect()
    }
}

impl Default for DataHealthReport {
    fn default() -> Self {
        Self::healthy()
    }
}

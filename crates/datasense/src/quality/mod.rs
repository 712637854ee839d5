//! Data quality scoring.

mod analyzer;
mod report;

pub use analyzer::{
    analyze, ColumnCheck, ConstantCheck, MissingCheck, MixedKindCheck, QualityAnalyzer,
    GENERIC_SUGGESTIONS,
};
pub use report::{DataHealthReport, Issue, IssueType, Severity};

//! DataSense: the tabular data pipeline behind an upload-to-dashboard tool.
//!
//! A decoded spreadsheet becomes a [`DataResult`] with inferred column kinds
//! and a [`DataHealthReport`]. Tables can then be fixed with corrective
//! transforms and joined with each other before being handed to the
//! presentation and chart-recommendation layers.
//!
//! # Core Principles
//!
//! - **Non-destructive**: every transform and join returns a new table
//! - **Explicit state**: tables and relationships live in a [`Workspace`]
//!   passed between stages
//! - **Best effort**: quality checks and joins never fail on odd data
//!
//! # Example
//!
//! ```no_run
//! use datasense::{DataSense, TransformOperation};
//!
//! let datasense = DataSense::new();
//! let sales = datasense.load("sales.csv").unwrap();
//! println!("Health: {:?}", sales.score());
//!
//! let (cleaned, report) = datasense.clean(&sales, &[TransformOperation::CleanMissing]);
//! println!("Filled {} cells, new score {:?}", report.values_changed, cleaned.score());
//! ```

pub mod error;
pub mod ingest;
pub mod input;
pub mod join;
pub mod quality;
pub mod table;
pub mod transform;
pub mod value;

mod datasense;
mod workspace;

pub use crate::datasense::{DataSense, DataSenseConfig};
pub use crate::workspace::Workspace;
pub use error::{DataSenseError, Result};
pub use ingest::{ingest, TableIngestor};
pub use input::{DecodedTable, InputFormat, Parser, ParserConfig, SourceMetadata};
pub use join::{
    join, join_tables, JoinedTable, RelationalData, RelationalTable, Relationship,
    RelationshipType,
};
pub use quality::{analyze, DataHealthReport, Issue, IssueType, QualityAnalyzer, Severity};
pub use table::{DataResult, ExportFormat, TableSummary};
pub use transform::{
    clean_missing_values, remove_constant_columns, TransformEngine, TransformOperation,
    TransformResult,
};
pub use value::{CellValue, Row, ValueKind};

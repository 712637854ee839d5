//! Corrective transforms for ingested tables.

mod engine;
mod operations;

pub use engine::{clean_missing_values, remove_constant_columns, TransformEngine};
pub use operations::{RowAudit, TransformChange, TransformOperation, TransformResult};

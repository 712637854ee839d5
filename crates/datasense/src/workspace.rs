//! A set of loaded tables and the relationships declared between them.
//!
//! The workspace is the state threaded between pipeline stages: callers
//! hand it tables, ask it to fix or join them by ID, and read the result
//! back. Nothing in the pipeline keeps a "current table" of its own.

use serde::{Deserialize, Serialize};

use crate::error::{DataSenseError, Result};
use crate::join::{join_tables, RelationalData, Relationship, RelationshipType};
use crate::table::{generate_table_id, id_prefix, DataResult};
use crate::transform::{TransformEngine, TransformOperation, TransformResult};

/// Loaded tables plus declared relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    tables: Vec<DataResult>,
    relationships: Vec<Relationship>,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table and return its ID.
    ///
    /// A table whose ID is already taken, such as a second copy loaded
    /// from disk, gets a fresh ID before it is stored.
    pub fn add_table(&mut self, mut data: DataResult) -> String {
        while self.table(&data.id).is_some() {
            let fresh = generate_table_id(id_prefix(&data.id));
            tracing::debug!(old = %data.id, new = %fresh, "table ID already in use, reassigned");
            data.id = fresh;
        }

        let id = data.id.clone();
        self.tables.push(data);
        id
    }

    /// Get a table by ID.
    pub fn table(&self, id: &str) -> Option<&DataResult> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// All tables in insertion order.
    pub fn tables(&self) -> &[DataResult] {
        &self.tables
    }

    /// All declared relationships.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Remove a table and every relationship that mentions it.
    pub fn remove_table(&mut self, id: &str) -> Option<DataResult> {
        let position = self.tables.iter().position(|t| t.id == id)?;
        self.relationships
            .retain(|r| r.from_table != id && r.to_table != id);
        Some(self.tables.remove(position))
    }

    /// Apply corrective operations to a table, replacing it in place.
    pub fn transform(
        &mut self,
        id: &str,
        operations: &[TransformOperation],
    ) -> Result<TransformResult> {
        let slot = self
            .tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DataSenseError::UnknownTable(id.to_string()))?;

        let (next, result) = TransformEngine::new().apply(slot, operations);
        *slot = next;
        Ok(result)
    }

    /// Join two tables by ID, add the joined table and record the relationship.
    pub fn join(
        &mut self,
        left_id: &str,
        right_id: &str,
        left_field: &str,
        right_field: &str,
        relationship_type: RelationshipType,
    ) -> Result<&DataResult> {
        let left = self
            .table(left_id)
            .ok_or_else(|| DataSenseError::UnknownTable(left_id.to_string()))?;
        let right = self
            .table(right_id)
            .ok_or_else(|| DataSenseError::UnknownTable(right_id.to_string()))?;

        let joined = join_tables(left, right, left_field, right_field, relationship_type);
        self.relationships.push(joined.relationship);
        self.add_table(joined.data);

        Ok(&self.tables[self.tables.len() - 1])
    }

    /// Snapshot of tables and relationships for downstream context builders.
    pub fn relational_data(&self) -> RelationalData {
        RelationalData::new(&self.tables, self.relationships.iter().cloned())
    }
}

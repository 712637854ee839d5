//! Relationships between tables and the relational snapshot built from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::table::DataResult;
use crate::value::Row;

/// Declared cardinality of a relationship.
///
/// The joiner records it but does not enforce it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    OneToOne,
    #[default]
    OneToMany,
    ManyToOne,
}

impl RelationshipType {
    /// Get the kebab-case label.
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipType::OneToOne => "one-to-one",
            RelationshipType::OneToMany => "one-to-many",
            RelationshipType::ManyToOne => "many-to-one",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-to-one" => Ok(RelationshipType::OneToOne),
            "one-to-many" => Ok(RelationshipType::OneToMany),
            "many-to-one" => Ok(RelationshipType::ManyToOne),
            other => Err(format!("unknown relationship type '{}'", other)),
        }
    }
}

/// A key link from one table to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// ID of the left table.
    pub from_table: String,
    /// Join column in the left table.
    pub from_field: String,
    /// ID of the right table.
    pub to_table: String,
    /// Join column in the right table.
    pub to_field: String,
    /// Declared cardinality.
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
}

/// One table inside a [`RelationalData`] snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationalTable {
    pub id: String,
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl From<&DataResult> for RelationalTable {
    fn from(data: &DataResult) -> Self {
        Self {
            id: data.id.clone(),
            name: data.file_name.clone(),
            columns: data.columns.clone(),
            rows: data.rows.clone(),
        }
    }
}

/// Tables plus the relationships declared between them, as handed to
/// context builders downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationalData {
    pub tables: Vec<RelationalTable>,
    pub relationships: Vec<Relationship>,
}

impl RelationalData {
    /// Snapshot the given tables and relationships.
    pub fn new<'a>(
        tables: impl IntoIterator<Item = &'a DataResult>,
        relationships: impl IntoIterator<Item = Relationship>,
    ) -> Self {
        Self {
            tables: tables.into_iter().map(RelationalTable::from).collect(),
            relationships: relationships.into_iter().collect(),
        }
    }
}

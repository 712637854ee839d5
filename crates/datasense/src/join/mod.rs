//! Relational joins across ingested tables.

mod joiner;
mod relationship;

pub use joiner::{join, join_tables, JoinedTable};
pub use relationship::{RelationalData, RelationalTable, Relationship, RelationshipType};

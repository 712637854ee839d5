//! Inner join of two tables on a key pair.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::table::{base_name, generate_table_id, DataResult, TableSummary};
use crate::value::{CellValue, Row};

use super::relationship::{Relationship, RelationshipType};

static ABSENT: CellValue = CellValue::Absent;

/// A joined table together with the relationship that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedTable {
    pub data: DataResult,
    pub relationship: Relationship,
}

/// Inner-join `left` and `right` where the string forms of
/// `left[left_field]` and `right[right_field]` are equal.
///
/// Each match yields the left row's fields as they are plus the right
/// row's fields, except `right_field`, renamed `<right base name>_<column>`.
/// Left rows without a match are dropped. `relationship_type` is not
/// enforced: a left row appears once per matching right row. A join field
/// missing from its table's columns yields no rows.
pub fn join(
    left: &DataResult,
    right: &DataResult,
    left_field: &str,
    right_field: &str,
    relationship_type: RelationshipType,
) -> Vec<Row> {
    if !left.has_column(left_field) || !right.has_column(right_field) {
        tracing::debug!(
            left = %left.file_name,
            right = %right.file_name,
            left_field,
            right_field,
            "join field not found, no rows joined"
        );
        return Vec::new();
    }

    let mut index: HashMap<String, Vec<&Row>> = HashMap::new();
    for row in &right.rows {
        let key = row.get(right_field).unwrap_or(&ABSENT).to_string();
        index.entry(key).or_default().push(row);
    }

    let prefix = right.base_name();
    let mut joined = Vec::new();

    for left_row in &left.rows {
        let key = left_row.get(left_field).unwrap_or(&ABSENT).to_string();
        let Some(matches) = index.get(&key) else {
            continue;
        };

        for right_row in matches {
            let mut merged = left_row.clone();
            for (column, cell) in right_row.iter() {
                if column == right_field {
                    continue;
                }
                merged.insert(format!("{}_{}", prefix, column), cell.clone());
            }
            joined.push(merged);
        }
    }

    tracing::debug!(
        left_rows = left.row_count(),
        right_rows = right.row_count(),
        joined_rows = joined.len(),
        relationship = %relationship_type,
        "joined tables"
    );

    joined
}

/// Join two tables and assemble the result as a new table.
///
/// The joined table gets a fresh ID and is named `<left>_X_<right>` from
/// the base names. Its column types and health report are copied from the
/// left table as they are, not recomputed against the joined rows.
pub fn join_tables(
    left: &DataResult,
    right: &DataResult,
    left_field: &str,
    right_field: &str,
    relationship_type: RelationshipType,
) -> JoinedTable {
    let rows = join(left, right, left_field, right_field, relationship_type);

    let prefix = right.base_name();
    let columns: IndexSet<String> = left
        .columns
        .iter()
        .cloned()
        .chain(
            right
                .columns
                .iter()
                .filter(|c| c.as_str() != right_field)
                .map(|c| format!("{}_{}", prefix, c)),
        )
        .collect();

    let data = DataResult {
        id: generate_table_id("joined"),
        file_name: format!("{}_X_{}", base_name(&left.file_name), prefix),
        columns: columns.into_iter().collect(),
        summary: TableSummary {
            total_rows: rows.len(),
            column_types: left.summary.column_types.clone(),
        },
        rows,
        health: left.health.clone(),
        source: None,
    };

    let relationship = Relationship {
        from_table: left.id.clone(),
        from_field: left_field.to_string(),
        to_table: right.id.clone(),
        to_field: right_field.to_string(),
        relationship_type,
    };

    JoinedTable { data, relationship }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest;
    use crate::input::DecodedTable;

    fn table(file_name: &str, columns: &[&str], rows: Vec<Vec<CellValue>>) -> DataResult {
        let names: Vec<String> = columns.iter().map(|s| s.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|cells| names.iter().cloned().zip(cells).collect::<Row>())
            .collect();
        ingest(DecodedTable::new(names, rows), file_name).unwrap()
    }

    fn people() -> DataResult {
        table(
            "people.csv",
            &["id", "name"],
            vec![
                vec![CellValue::from(1i64), CellValue::from("A")],
                vec![CellValue::from(2i64), CellValue::from("B")],
            ],
        )
    }

    fn cities() -> DataResult {
        table(
            "cities.xlsx",
            &["uid", "city"],
            vec![
                vec![CellValue::from(1i64), CellValue::from("X")],
                vec![CellValue::from(1i64), CellValue::from("Y")],
            ],
        )
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let rows = join(&people(), &cities(), "id", "uid", RelationshipType::OneToOne);

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row["id"], CellValue::Number(1.0));
            assert_eq!(row["name"], CellValue::from("A"));
            assert!(!row.contains_key("uid"));
            assert!(!row.contains_key("cities_uid"));
        }
        assert_eq!(rows[0]["cities_city"], CellValue::from("X"));
        assert_eq!(rows[1]["cities_city"], CellValue::from("Y"));
        assert!(rows.iter().all(|r| r["name"] != CellValue::from("B")));
    }

    #[test]
    fn test_keys_match_across_kinds() {
        let left = table("l.csv", &["k"], vec![vec![CellValue::from(5i64)]]);
        let right = table("r.csv", &["k", "v"], vec![vec![CellValue::from("5"), CellValue::from("hit")]]);

        let rows = join(&left, &right, "k", "k", RelationshipType::OneToMany);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["r_v"], CellValue::from("hit"));
    }

    #[test]
    fn test_no_matches_is_empty() {
        let left = table("l.csv", &["k"], vec![vec![CellValue::from("a")]]);
        let right = table("r.csv", &["k"], vec![vec![CellValue::from("b")]]);

        assert!(join(&left, &right, "k", "k", RelationshipType::OneToOne).is_empty());
    }

    #[test]
    fn test_unknown_field_is_empty() {
        assert!(join(&people(), &cities(), "missing", "uid", RelationshipType::OneToMany).is_empty());
        assert!(join(&people(), &cities(), "id", "missing", RelationshipType::OneToMany).is_empty());
    }

    #[test]
    fn test_right_fields_overwrite_same_named_left_fields() {
        let left = table(
            "a.csv",
            &["id", "b_x"],
            vec![vec![CellValue::from(1i64), CellValue::from("left")]],
        );
        let right = table(
            "b.csv",
            &["id", "x"],
            vec![vec![CellValue::from(1i64), CellValue::from("right")]],
        );

        let joined = join_tables(&left, &right, "id", "id", RelationshipType::OneToOne);
        assert_eq!(joined.data.rows[0]["b_x"], CellValue::from("right"));
        assert_eq!(joined.data.columns, vec!["id", "b_x"]);
    }

    #[test]
    fn test_join_tables_assembles_result() {
        let left = people();
        let right = cities();
        let joined = join_tables(&left, &right, "id", "uid", RelationshipType::OneToOne);
        let data = &joined.data;

        assert!(data.id.starts_with("joined_"));
        assert_ne!(data.id, left.id);
        assert_ne!(data.id, right.id);
        assert_eq!(data.file_name, "people_X_cities");
        assert_eq!(data.columns, vec!["id", "name", "cities_city"]);
        assert_eq!(data.summary.total_rows, 2);
        assert_eq!(data.summary.column_types, left.summary.column_types);
        assert_eq!(data.health, left.health);

        assert_eq!(joined.relationship.from_table, left.id);
        assert_eq!(joined.relationship.to_table, right.id);
        assert_eq!(joined.relationship.from_field, "id");
        assert_eq!(joined.relationship.to_field, "uid");
        assert_eq!(joined.relationship.relationship_type, RelationshipType::OneToOne);
    }

    #[test]
    fn test_null_keys_match_each_other() {
        let left = table("l.csv", &["k", "a"], vec![vec![CellValue::Null, CellValue::from(1i64)]]);
        let right = table("r.csv", &["k", "b"], vec![vec![CellValue::Null, CellValue::from(2i64)]]);

        let rows = join(&left, &right, "k", "k", RelationshipType::OneToOne);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["r_b"], CellValue::Number(2.0));
    }
}

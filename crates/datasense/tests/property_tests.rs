//! Property-based tests for the quality analyzer, transforms and joiner.
//!
//! These tests use proptest to generate random tables and verify that the
//! pipeline keeps its invariants under all inputs.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p datasense --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p datasense --test property_tests
//! ```

use proptest::prelude::*;

use datasense::{
    analyze, clean_missing_values, ingest, join, remove_constant_columns, CellValue,
    DecodedTable, IssueType, RelationshipType, Row,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Any cell, with missing values well represented.
fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Null),
        Just(CellValue::Absent),
        Just(CellValue::from("")),
        any::<bool>().prop_map(CellValue::from),
        (-50i64..50).prop_map(CellValue::from),
        "[a-c]{1,2}".prop_map(CellValue::from),
    ]
}

/// A table with 1-4 columns and 0-15 rows.
fn decoded_table() -> impl Strategy<Value = DecodedTable> {
    (1usize..=4, 0usize..=15).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(prop::collection::vec(cell(), cols), rows).prop_map(move |cells| {
            let columns: Vec<String> = (0..cols).map(|i| format!("col{}", i)).collect();
            let rows = cells
                .into_iter()
                .map(|row| columns.iter().cloned().zip(row).collect::<Row>())
                .collect();
            DecodedTable::new(columns, rows)
        })
    })
}

/// A table where every column holds at least two distinct present values.
fn clean_table() -> impl Strategy<Value = DecodedTable> {
    (1usize..=4, 6usize..=20).prop_map(|(cols, rows)| {
        let columns: Vec<String> = (0..cols).map(|i| format!("col{}", i)).collect();
        let rows = (0..rows)
            .map(|r| {
                columns
                    .iter()
                    .map(|c| (c.clone(), CellValue::from(r as i64)))
                    .collect::<Row>()
            })
            .collect();
        DecodedTable::new(columns, rows)
    })
}

// =============================================================================
// Quality Analyzer Properties
// =============================================================================

proptest! {
    #[test]
    fn score_stays_in_range(table in decoded_table()) {
        let report = analyze(&table.columns, &table.rows);
        prop_assert!(report.score <= 100);
        let penalty: u32 = report.issues.iter().map(|i| i.penalty()).sum();
        prop_assert_eq!(report.score, 100u32.saturating_sub(penalty));
    }

    #[test]
    fn suggestions_iff_issues(table in decoded_table()) {
        let report = analyze(&table.columns, &table.rows);
        prop_assert_eq!(report.suggestions.is_empty(), report.issues.is_empty());
    }

    #[test]
    fn analysis_is_deterministic(table in decoded_table()) {
        let first = analyze(&table.columns, &table.rows);
        let second = analyze(&table.columns, &table.rows);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn complete_varied_tables_score_100(table in clean_table()) {
        let report = analyze(&table.columns, &table.rows);
        prop_assert_eq!(report.score, 100);
        prop_assert!(report.issues.is_empty());
    }

    #[test]
    fn adding_an_issue_never_raises_score(table in clean_table(), col in 0usize..4) {
        let column = table.columns[col % table.columns.len()].clone();
        let before = analyze(&table.columns, &table.rows).score;

        let mut rows = table.rows.clone();
        rows[0].insert(column.clone(), CellValue::Null);
        let with_missing = analyze(&table.columns, &rows).score;

        rows[1].insert(column, CellValue::from("text"));
        let with_mixed = analyze(&table.columns, &rows).score;

        prop_assert!(with_missing <= before);
        prop_assert!(with_mixed <= with_missing);
    }
}

// =============================================================================
// Transform Properties
// =============================================================================

proptest! {
    #[test]
    fn clean_missing_is_idempotent(table in decoded_table()) {
        let data = ingest(table, "t.csv").unwrap();
        let once = clean_missing_values(&data);
        let twice = clean_missing_values(&once);

        prop_assert_eq!(&once.rows, &twice.rows);
        prop_assert_eq!(&once.health, &twice.health);
        prop_assert_eq!(once.summary.total_rows, data.summary.total_rows);
    }

    #[test]
    fn remove_constant_is_stable(table in decoded_table()) {
        let data = ingest(table, "t.csv").unwrap();
        let reduced = remove_constant_columns(&data).into_owned();
        let health = reduced.health.as_ref().unwrap();

        prop_assert!(health.columns_with(IssueType::Constant).is_empty());
        prop_assert_eq!(reduced.columns.len(), reduced.summary.column_types.len());
        prop_assert_eq!(&*remove_constant_columns(&reduced), &reduced);
    }
}

// =============================================================================
// Join Properties
// =============================================================================

proptest! {
    #[test]
    fn join_size_matches_key_counts(
        left_keys in prop::collection::vec(0i64..5, 0..12),
        right_keys in prop::collection::vec(0i64..5, 0..12),
    ) {
        let make = |name: &str, keys: &[i64]| {
            let columns = vec!["k".to_string(), "v".to_string()];
            let rows = keys
                .iter()
                .enumerate()
                .map(|(i, k)| {
                    let mut row = Row::new();
                    row.insert("k".to_string(), CellValue::from(*k));
                    row.insert("v".to_string(), CellValue::from(i as i64));
                    row
                })
                .collect();
            ingest(DecodedTable::new(columns, rows), name).unwrap()
        };

        let left = make("left.csv", &left_keys);
        let right = make("right.csv", &right_keys);
        let rows = join(&left, &right, "k", "k", RelationshipType::OneToOne);

        let expected: usize = left_keys
            .iter()
            .map(|k| right_keys.iter().filter(|r| *r == k).count())
            .sum();
        prop_assert_eq!(rows.len(), expected);
        prop_assert!(rows.iter().all(|r| r.contains_key("right_v") && !r.contains_key("right_k")));
    }
}

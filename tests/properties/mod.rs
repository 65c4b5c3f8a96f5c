//! Property tests for the tokenizer and table operations

use std::collections::{HashMap, HashSet};

use colframe::tokenizer::parse;
use colframe::{join, AggSpec, Aggregator, JoinOptions, JoinType, Table, Value};
use proptest::prelude::*;

/// Quote a field the way a CSV writer would
fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn key_table(keys: &[u8], column: &str) -> Table {
    let ids: Vec<Value> = keys.iter().map(|&k| Value::Integer(k as i64)).collect();
    let rows: Vec<Value> = (0..keys.len() as i64).map(Value::Integer).collect();
    Table::from_columns(vec![("id".to_string(), ids), (column.to_string(), rows)]).unwrap()
}

fn key_counts(keys: &[u8]) -> HashMap<u8, usize> {
    let mut counts = HashMap::new();
    for &k in keys {
        *counts.entry(k).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #[test]
    fn prop_quoted_fields_round_trip(
        rows in prop::collection::vec(
            prop::collection::vec("[a-z,\"\n ]{0,8}", 2..5),
            1..6,
        )
    ) {
        let text: String = rows
            .iter()
            .map(|row| row.iter().map(|f| quote_field(f)).collect::<Vec<_>>().join(",") + "\n")
            .collect();
        prop_assert_eq!(parse(&text).unwrap(), rows);
    }

    #[test]
    fn prop_filter_counts_matching_rows(values in prop::collection::vec(0i64..100, 0..40), cut in 0i64..100) {
        let table = Table::from_columns(vec![("n", values.iter().map(|&v| Value::Integer(v)).collect())]).unwrap();
        let kept = table.filter(|row| matches!(row.value(0), Value::Integer(n) if *n < cut));
        prop_assert_eq!(kept.row_count(), values.iter().filter(|&&v| v < cut).count());
        prop_assert_eq!(kept.columns(), table.columns());
    }

    #[test]
    fn prop_project_is_idempotent(values in prop::collection::vec(0i64..10, 1..20)) {
        let column: Vec<Value> = values.iter().map(|&v| Value::Integer(v)).collect();
        let table = Table::from_columns(vec![
            ("a", column.clone()),
            ("b", column.clone()),
            ("c", column),
        ])
        .unwrap();
        let nested = table.project(&["c", "a", "b"]).unwrap().project(&["a", "c"]).unwrap();
        prop_assert_eq!(nested, table.project(&["a", "c"]).unwrap());
    }

    #[test]
    fn prop_group_count_matches_distinct_keys(keys in prop::collection::vec(0u8..6, 0..40)) {
        let table = key_table(&keys, "row");
        let spec = AggSpec::new().add("row", &[Aggregator::Count]);
        let counts = table.group_by(&["id"]).unwrap().agg(&spec).unwrap();

        let distinct: HashSet<u8> = keys.iter().copied().collect();
        prop_assert_eq!(counts.row_count(), distinct.len());
        let total: i64 = counts
            .column("row")
            .unwrap()
            .iter()
            .map(|v| if let Value::Integer(n) = v { *n } else { 0 })
            .sum();
        prop_assert_eq!(total as usize, keys.len());
    }

    #[test]
    fn prop_join_row_counts(
        left_keys in prop::collection::vec(0u8..5, 0..12),
        right_keys in prop::collection::vec(0u8..5, 0..12),
    ) {
        let left = key_table(&left_keys, "l");
        let right = key_table(&right_keys, "r");
        let left_counts = key_counts(&left_keys);
        let right_counts = key_counts(&right_keys);

        let expected_inner: usize = left_counts
            .iter()
            .map(|(k, n)| n * right_counts.get(k).copied().unwrap_or(0))
            .sum();
        let unmatched_left = left_keys.iter().filter(|k| !right_counts.contains_key(*k)).count();
        let unmatched_right = right_keys.iter().filter(|k| !left_counts.contains_key(*k)).count();

        let run = |how| join(&left, &right, &JoinOptions::on(&["id"]).how(how)).unwrap().row_count();
        let inner = run(JoinType::Inner);
        prop_assert_eq!(inner, expected_inner);
        prop_assert_eq!(run(JoinType::Left), inner + unmatched_left);
        prop_assert_eq!(run(JoinType::Right), inner + unmatched_right);
        prop_assert_eq!(run(JoinType::Outer), inner + unmatched_left + unmatched_right);
    }
}

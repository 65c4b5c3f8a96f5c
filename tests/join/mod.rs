//! Tests for the join engine

use colframe::{join, ColframeError, JoinOptions, JoinType, Table, Value};

use crate::helpers::{ints, load_data, text};

fn athletes_and_regions(how: JoinType) -> Table {
    let athletes = load_data("athletes.csv", false)
        .project(&["Name", "NOC"])
        .unwrap();
    let regions = load_data("noc_regions.csv", false);
    athletes
        .join(&regions, &JoinOptions::on(&["NOC"]).how(how))
        .unwrap()
}

#[test]
fn test_join_example_left() {
    let left = Table::from_columns(vec![("id", ints(&[1, 2, 3]))]).unwrap();
    let right = Table::from_columns(vec![
        ("id", ints(&[2, 3, 4])),
        ("v", text(&["x", "y", "z"])),
    ])
    .unwrap();
    let joined = join(&left, &right, &JoinOptions::on(&["id"]).how(JoinType::Left)).unwrap();
    assert_eq!(joined.row_count(), 3);
    let rows: Vec<Vec<Value>> = joined.rows().map(|r| r.values().cloned().collect()).collect();
    assert_eq!(
        rows,
        vec![
            vec![Value::Integer(1), Value::Null],
            vec![Value::Integer(2), Value::from("x")],
            vec![Value::Integer(3), Value::from("y")],
        ]
    );
}

#[test]
fn test_inner_join_files() {
    let joined = athletes_and_regions(JoinType::Inner);
    assert_eq!(joined.columns(), &["NOC", "Name", "region", "notes"]);
    assert_eq!(joined.row_count(), 6);
    assert!(joined.column("NOC").unwrap().iter().all(|v| v != &Value::from("XYZ")));
}

#[test]
fn test_left_join_files() {
    let joined = athletes_and_regions(JoinType::Left);
    assert_eq!(joined.row_count(), 7);
    assert!(joined.column("region").unwrap()[6].is_null());
}

#[test]
fn test_right_join_files() {
    let joined = athletes_and_regions(JoinType::Right);
    // USA x3, FRA x2, GER x1, SGP unmatched
    assert_eq!(joined.row_count(), 7);
    let last = joined.row(6).unwrap();
    assert_eq!(last.get("NOC"), Some(&Value::from("SGP")));
    assert!(last.get("Name").unwrap().is_null());
}

#[test]
fn test_outer_join_files() {
    let joined = athletes_and_regions(JoinType::Outer);
    assert_eq!(joined.row_count(), 6 + 1 + 1);
    assert_eq!(
        joined.column("NOC").unwrap()[6..],
        [Value::from("XYZ"), Value::from("SGP")]
    );
}

#[test]
fn test_outer_multi_multi_rows_appear_once() {
    let left = Table::from_columns(vec![
        ("k", text(&["a", "a", "b"])),
        ("side", text(&["l1", "l2", "l3"])),
    ])
    .unwrap();
    let right = Table::from_columns(vec![
        ("k", text(&["a", "c", "a"])),
        ("side", text(&["r1", "r2", "r3"])),
    ])
    .unwrap();
    let joined = join(&left, &right, &JoinOptions::on(&["k"]).how(JoinType::Outer)).unwrap();
    assert_eq!(joined.columns(), &["k", "side_x", "side_y"]);

    let pairs: Vec<(String, String)> = joined
        .rows()
        .map(|r| (r.value(1).to_string(), r.value(2).to_string()))
        .collect();
    let expected: Vec<(String, String)> = [
        ("l1", "r1"),
        ("l1", "r3"),
        ("l2", "r1"),
        ("l2", "r3"),
        ("l3", "NA"),
        ("NA", "r2"),
    ]
    .iter()
    .map(|(l, r)| (l.to_string(), r.to_string()))
    .collect();
    assert_eq!(pairs, expected);
}

#[test]
fn test_key_missing_on_one_side() {
    let left = Table::from_columns(vec![("id", ints(&[1]))]).unwrap();
    let right = Table::from_columns(vec![("ID", ints(&[1]))]).unwrap();
    assert!(matches!(
        join(&left, &right, &JoinOptions::on(&["id"])),
        Err(ColframeError::ColumnNotFound(_))
    ));
}

#[test]
fn test_suffix_collision_is_schema_error() {
    let left = Table::from_columns(vec![
        ("id", ints(&[1])),
        ("v", ints(&[1])),
        ("v_x", ints(&[2])),
    ])
    .unwrap();
    let right = Table::from_columns(vec![("id", ints(&[1])), ("v", ints(&[3]))]).unwrap();
    assert!(matches!(
        join(&left, &right, &JoinOptions::on(&["id"])),
        Err(ColframeError::SchemaError(_))
    ));
}

#[test]
fn test_right_join_fan_out_keeps_left_order() {
    let left = Table::from_columns(vec![
        ("k", text(&["a", "b", "a", "a"])),
        ("l", ints(&[1, 2, 3, 4])),
    ])
    .unwrap();
    let right = Table::from_columns(vec![
        ("k", text(&["b", "a", "c"])),
        ("r", ints(&[10, 20, 30])),
    ])
    .unwrap();
    let joined = join(&left, &right, &JoinOptions::on(&["k"]).how(JoinType::Right)).unwrap();

    assert_eq!(
        joined.column("k").unwrap(),
        text(&["b", "a", "a", "a", "c"]).as_slice()
    );
    assert_eq!(
        joined.column("l").unwrap(),
        &[
            Value::Integer(2),
            Value::Integer(1),
            Value::Integer(3),
            Value::Integer(4),
            Value::Null
        ]
    );
    assert_eq!(joined.column("r").unwrap(), ints(&[10, 20, 20, 20, 30]).as_slice());
}

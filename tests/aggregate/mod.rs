//! Tests for grouping and aggregation

use colframe::{AggSpec, Aggregator, ColframeError, Table, Value};

use crate::helpers::{ints, load_data, text};

#[test]
fn test_medal_count_example() {
    let table = Table::from_columns(vec![
        ("NOC", text(&["A", "A", "B"])),
        ("Medal", text(&["Gold", "Silver", "Gold"])),
    ])
    .unwrap();
    let spec = AggSpec::new().add_named("Medal", &["count"]).unwrap();
    let counts = table.group_by(&["NOC"]).unwrap().agg(&spec).unwrap();

    let pairs: Vec<(Value, Value)> = counts
        .rows()
        .map(|row| (row.value(0).clone(), row.value(1).clone()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (Value::from("A"), Value::Integer(2)),
            (Value::from("B"), Value::Integer(1)),
        ]
    );
}

#[test]
fn test_group_counts_sum_to_rows() {
    let table = load_data("athletes.csv", false);
    let spec = AggSpec::new().add("ID", &[Aggregator::Count]);
    let counts = table.group_by(&["NOC"]).unwrap().agg(&spec).unwrap();
    assert_eq!(counts.column("NOC").unwrap(), text(&["USA", "FRA", "GER", "XYZ"]).as_slice());
    let total: i64 = counts
        .column("ID")
        .unwrap()
        .iter()
        .map(|v| match v {
            Value::Integer(n) => *n,
            other => panic!("count should be an integer, got {:?}", other),
        })
        .sum();
    assert_eq!(total, 7);
}

#[test]
fn test_medals_only_mean_age() {
    let table = load_data("athletes.csv", true);
    let medalists = table.filter(|row| {
        !row.try_get("Medal").unwrap().is_null() && !row.try_get("Age").unwrap().is_null()
    });
    let spec = AggSpec::new().add("Age", &[Aggregator::Mean, Aggregator::Count]);
    let stats = medalists.group_by(&["Sex"]).unwrap().agg(&spec).unwrap();
    assert_eq!(stats.columns(), &["Sex", "Age_mean", "Age_count"]);
    // F: 24, 19, 22; M: 27
    assert_eq!(stats.column("Sex").unwrap(), text(&["F", "M"]).as_slice());
    assert_eq!(stats.column("Age_mean").unwrap()[1], Value::Float(27.0));
    assert_eq!(stats.column("Age_count").unwrap(), ints(&[3, 1]).as_slice());
}

#[test]
fn test_whole_table_aggregation() {
    let table = Table::from_columns(vec![
        ("Year", ints(&[2000, 2004, 2008])),
        ("Score", text(&["1.5", "2.5", "5"])),
    ])
    .unwrap();
    let spec = AggSpec::new()
        .add("Year", &[Aggregator::Min, Aggregator::Max])
        .add("Score", &[Aggregator::Sum]);
    let result = table.agg(&spec).unwrap();
    assert_eq!(result.shape(), (1, 3));
    assert_eq!(result.column("Year_min").unwrap(), &[Value::Integer(2000)]);
    assert_eq!(result.column("Year_max").unwrap(), &[Value::Integer(2008)]);
    assert_eq!(result.column("Score").unwrap(), &[Value::Float(9.0)]);
}

#[test]
fn test_std_and_var_are_population() {
    let table = Table::from_columns(vec![("x", ints(&[1, 3]))]).unwrap();
    let spec = AggSpec::new().add("x", &[Aggregator::Var, Aggregator::Std]);
    let result = table.agg(&spec).unwrap();
    assert_eq!(result.column("x_var").unwrap(), &[Value::Float(1.0)]);
    assert_eq!(result.column("x_std").unwrap(), &[Value::Float(1.0)]);
}

#[test]
fn test_mean_of_empty_table_is_zero() {
    let table = Table::from_columns(vec![("x", Vec::new())]).unwrap();
    let spec = AggSpec::new().add("x", &[Aggregator::Mean, Aggregator::Count]);
    let result = table.agg(&spec).unwrap();
    assert_eq!(result.column("x_mean").unwrap(), &[Value::Float(0.0)]);
    assert_eq!(result.column("x_count").unwrap(), &[Value::Integer(0)]);
}

#[test]
fn test_unknown_aggregator_name() {
    let err = AggSpec::new().add_named("Age", &["mean", "mode"]).unwrap_err();
    assert!(matches!(err, ColframeError::UnknownAggregator(name) if name == "mode"));
}

#[test]
fn test_text_values_fail_numeric_aggregators() {
    let table = load_data("athletes.csv", false);
    let spec = AggSpec::new().add("Sport", &[Aggregator::Max]);
    assert!(matches!(
        table.agg(&spec),
        Err(ColframeError::TypeConversionError(_))
    ));

    // Age has an NA cell, which is not skipped
    let spec = AggSpec::new().add("Age", &[Aggregator::Sum]);
    assert!(matches!(
        table.group_by(&["Sex"]).unwrap().agg(&spec),
        Err(ColframeError::TypeConversionError(_))
    ));
}

#[test]
fn test_count_ignores_missing_sentinels() {
    let table = load_data("athletes.csv", false);
    let spec = AggSpec::new().add("Medal", &[Aggregator::Count]);
    let result = table.agg(&spec).unwrap();
    assert_eq!(result.column("Medal").unwrap(), &[Value::Integer(7)]);
}

//! Tests for the CSV tokenizer and header handling

use colframe::csv_handler::with_header;
use colframe::tokenizer::{parse, Tokenizer};
use colframe::{ColframeError, CsvHandler, Value};

use crate::helpers::{data_file, load_data};

#[test]
fn test_quoted_example() {
    let rows = parse("Name,Age\n\"Smith, John\",30\n\"Doe, \"\"Jay\"\"\",25\n").unwrap();
    let (header, records) = with_header(rows.clone());
    assert_eq!(header, vec!["Name", "Age"]);
    assert_eq!(rows[1..], [vec!["Smith, John", "30"], vec!["Doe, \"Jay\"", "25"]]);
    assert_eq!(records[1]["Name"], "Doe, \"Jay\"");
}

#[test]
fn test_quoted_file_with_crlf() {
    let text = std::fs::read_to_string(data_file("quoted.csv")).unwrap();
    let rows = parse(&text).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1], vec!["1", "He said \"hi\"", "multi\r\nline"]);
    assert_eq!(rows[2], vec!["2", "a,b", "plain"]);
}

#[test]
fn test_malformed_file_is_rejected() {
    let err = CsvHandler::default()
        .load_file(data_file("malformed.csv"))
        .unwrap_err();
    assert!(matches!(err, ColframeError::MalformedField { line: 3 }));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = CsvHandler::default()
        .load_file(data_file("does_not_exist.csv"))
        .unwrap_err();
    assert!(matches!(err, ColframeError::IoError(_)));
}

#[test]
fn test_tab_separated() {
    let rows = Tokenizer::new().delimiter('\t').parse("a\tb\n\"x\ty\"\tz\n").unwrap();
    assert_eq!(rows[1], vec!["x\ty", "z"]);
}

#[test]
fn test_athletes_file_loads() {
    let table = load_data("athletes.csv", false);
    assert_eq!(table.shape(), (7, 8));
    assert_eq!(table.column("Name").unwrap()[4], Value::from("Smith, John"));
    assert!(table.column("Age").unwrap()[2].is_null());
    assert_eq!(table.column("Age").unwrap()[0], Value::from("24"));
}

#[test]
fn test_header_padding_keeps_forgiving_rule() {
    let rows = parse("a,b,c\n1,2\n1,2,3,4,5\n").unwrap();
    let (_, records) = with_header(rows);
    assert_eq!(records[0]["c"], "");
    assert_eq!(records[1].values().cloned().collect::<Vec<_>>(), vec!["1", "2", "3"]);
}

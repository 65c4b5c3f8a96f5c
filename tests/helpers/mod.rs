//! Test helpers for colframe integration tests
//!
//! Shared builders for small tables and paths to the static data files.

use std::path::PathBuf;

use colframe::{CsvHandler, LoadOptions, Table, Value};

/// Path to a file under tests/data
pub fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Text values from string literals
pub fn text(values: &[&str]) -> Vec<Value> {
    values.iter().map(|&v| Value::from(v)).collect()
}

/// Integer values
pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Integer(v)).collect()
}

/// Load one of the static data files, optionally inferring numeric columns
pub fn load_data(name: &str, infer_types: bool) -> Table {
    let options = LoadOptions {
        infer_types,
        ..LoadOptions::default()
    };
    CsvHandler::new(options)
        .load_file(data_file(name))
        .expect("test data file should load")
}

//! Table module for colframe
//!
//! This module provides the in-memory, column-oriented table at the center of
//! the engine. It handles:
//!
//! - Construction with validation of column lengths and names
//! - Column access by name and row access through [`RowView`]
//! - Row selection with a predicate (`filter`) and column subsetting (`project`)
//! - A short textual preview through `Display`
//!
//! Tables are immutable once built. Every operation returns a new table and
//! leaves its input untouched.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ColframeError, ColframeResult};
use crate::value::Value;

/// Number of rows shown by the `Display` preview
const PREVIEW_ROWS: usize = 10;

/// The kind of data a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every present value is an integer or a float
    Numeric,
    /// Anything else, including columns with no present values
    Text,
}

/// Represents an in-memory table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names in insertion order
    columns: Vec<String>,

    /// Map of column names to their indices
    column_map: HashMap<String, usize>,

    /// Column-major cell storage, parallel to `columns`
    data: Vec<Vec<Value>>,

    /// Shared length of every column
    row_count: usize,
}

/// Read-only view of a single table row
///
/// The view addresses cells by column index into the table's storage; no row
/// is materialized.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowView<'a> {
    /// Position of this row in its table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value in the named column, or `None` if there is no such column
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.table
            .column_index(column)
            .map(|col| &self.table.data[col][self.index])
    }

    /// Value in the named column, failing for unknown columns
    pub fn try_get(&self, column: &str) -> ColframeResult<&'a Value> {
        self.get(column)
            .ok_or_else(|| ColframeError::ColumnNotFound(column.to_string()))
    }

    /// Value at a column position
    ///
    /// # Panics
    /// Panics if `col` is not smaller than the table's column count.
    pub fn value(&self, col: usize) -> &'a Value {
        &self.table.data[col][self.index]
    }

    /// Values of this row in column order
    pub fn values(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let index = self.index;
        self.table.data.iter().map(move |column| &column[index])
    }
}

impl Table {
    /// Create a table with no columns and no rows
    pub fn empty() -> Self {
        Table {
            columns: Vec::new(),
            column_map: HashMap::new(),
            data: Vec::new(),
            row_count: 0,
        }
    }

    /// Create a table from `(name, values)` pairs, keeping their order
    ///
    /// # Returns
    /// * `Ok(Table)` when every column has the same length and names are unique
    /// * `Err(SchemaError)` otherwise
    ///
    /// # Example
    /// ```
    /// # use colframe::table::Table;
    /// # use colframe::value::Value;
    /// let table = Table::from_columns(vec![
    ///     ("NOC", vec![Value::from("USA"), Value::from("FRA")]),
    ///     ("Year", vec![Value::Integer(1996), Value::Integer(2000)]),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.shape(), (2, 2));
    /// ```
    pub fn from_columns<I, S>(columns: I) -> ColframeResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let (names, data) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();
        Self::from_parts(names, data)
    }

    /// Validate and assemble parallel name and column vectors
    pub(crate) fn from_parts(columns: Vec<String>, data: Vec<Vec<Value>>) -> ColframeResult<Self> {
        let row_count = data.first().map_or(0, Vec::len);
        if let Some((i, column)) = data.iter().enumerate().find(|(_, c)| c.len() != row_count) {
            return Err(ColframeError::SchemaError(format!(
                "column '{}' has {} values but column '{}' has {}",
                columns[i],
                column.len(),
                columns[0],
                row_count
            )));
        }

        let mut column_map = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if column_map.insert(name.clone(), i).is_some() {
                return Err(ColframeError::SchemaError(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        Ok(Table {
            columns,
            column_map,
            data,
            row_count,
        })
    }

    /// Get the column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the column count
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the row count
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// `(row_count, column_count)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    /// Returns true when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Get the index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_map.get(name).copied()
    }

    /// Returns true if the table has a column with this name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_map.contains_key(name)
    }

    /// Get the values of a column by name
    ///
    /// # Returns
    /// * `Ok(&[Value])` - the column's values in row order
    /// * `Err(ColumnNotFound)` - if the table has no such column
    pub fn column(&self, name: &str) -> ColframeResult<&[Value]> {
        self.column_index(name)
            .map(|i| self.data[i].as_slice())
            .ok_or_else(|| ColframeError::ColumnNotFound(name.to_string()))
    }

    /// Classify a column by the values it holds
    pub fn column_kind(&self, name: &str) -> ColframeResult<ColumnKind> {
        let values = self.column(name)?;
        let mut present = values.iter().filter(|v| !v.is_null()).peekable();
        if present.peek().is_none() {
            return Ok(ColumnKind::Text);
        }
        if present.all(|v| matches!(v, Value::Integer(_) | Value::Float(_))) {
            Ok(ColumnKind::Numeric)
        } else {
            Ok(ColumnKind::Text)
        }
    }

    /// Values of the column at a position
    pub(crate) fn column_at(&self, col: usize) -> &[Value] {
        &self.data[col]
    }

    /// View of the row at `index`, if it exists
    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        (index < self.row_count).then_some(RowView { table: self, index })
    }

    /// Iterate over all rows in order
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.row_count).map(move |index| RowView { table: self, index })
    }

    /// Look up every name, reporting all missing ones in a single error
    pub(crate) fn resolve_columns<S: AsRef<str>>(&self, names: &[S]) -> ColframeResult<Vec<usize>> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name.as_ref()) {
                Some(i) => indices.push(i),
                None => missing.push(name.as_ref().to_string()),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(ColframeError::ColumnNotFound(missing.join(", ")))
        }
    }

    /// Build a table holding the given rows of this one, in the given order
    pub(crate) fn take_rows(&self, indices: &[usize]) -> Self {
        let data = self
            .data
            .iter()
            .map(|column| indices.iter().map(|&i| column[i].clone()).collect())
            .collect();
        Table {
            columns: self.columns.clone(),
            column_map: self.column_map.clone(),
            data,
            row_count: if self.columns.is_empty() { 0 } else { indices.len() },
        }
    }

    /// Create a new table with only the specified columns, in the given order
    ///
    /// # Returns
    /// * `Ok(Table)` with exactly the requested columns
    /// * `Err(ColumnNotFound)` naming every requested column that doesn't exist
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> ColframeResult<Self> {
        let indices = self.resolve_columns(names)?;
        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let data = indices.iter().map(|&i| self.data[i].clone()).collect();
        let projected = Self::from_parts(columns, data)?;
        debug!(columns = projected.column_count(), "projected table");
        Ok(projected)
    }

    /// Create a new table with the rows for which `predicate` returns true
    ///
    /// The predicate is called exactly once per row, in row order. The result
    /// keeps every column and the relative order of the kept rows.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&RowView<'_>) -> bool,
    {
        let kept: Vec<usize> = self.rows().filter(|row| predicate(row)).map(|row| row.index).collect();
        debug!(input = self.row_count, kept = kept.len(), "filtered rows");
        self.take_rows(&kept)
    }

    /// Create a new table with at most the first `n` rows
    pub fn head(&self, n: usize) -> Self {
        let indices: Vec<usize> = (0..self.row_count.min(n)).collect();
        self.take_rows(&indices)
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::empty()
    }
}

/// Aligned preview of the first rows of a table
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "Table(empty)");
        }

        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&self.data)
            .map(|(name, column)| {
                column
                    .iter()
                    .map(|v| v.to_string().chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        writeln!(f, "Table ({} rows)", self.row_count)?;
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, &w)| format!("{:<w$}", name, w = w))
            .collect();
        writeln!(f, "{}", header.join(" | "))?;
        let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        write!(f, "{}", separator.join("-+-"))?;

        for row in self.rows().take(PREVIEW_ROWS) {
            let cells: Vec<String> = row
                .values()
                .zip(&widths)
                .map(|(v, &w)| format!("{:<w$}", v.to_string(), w = w))
                .collect();
            write!(f, "\n{}", cells.join(" | "))?;
        }

        if self.row_count > PREVIEW_ROWS {
            write!(f, "\n... ({} more rows)", self.row_count - PREVIEW_ROWS)?;
        }
        Ok(())
    }
}

//! Join module for colframe
//!
//! This module implements hash-based equi-joins between two tables. One side
//! is indexed by its join-key tuple, then the other side probes the index row
//! by row. A probe row matching several indexed rows fans out into one output
//! row per match.
//!
//! Output columns are laid out as the join keys (in `on` order), then the left
//! table's other columns, then the right table's other columns. Non-key
//! columns present on both sides are renamed with the configured suffixes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ColframeError, ColframeResult};
use crate::table::Table;
use crate::value::Value;

/// Join types supported by colframe
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum JoinType {
    /// Only rows whose key appears on both sides
    #[default]
    Inner,
    /// Every left row, with missing right columns when unmatched
    Left,
    /// Every right row, with missing left columns when unmatched
    Right,
    /// Matched rows, then unmatched left rows, then unmatched right rows
    Outer,
}

impl JoinType {
    /// Lowercase name of the join type
    pub fn name(&self) -> &'static str {
        match self {
            JoinType::Inner => "inner",
            JoinType::Left => "left",
            JoinType::Right => "right",
            JoinType::Outer => "outer",
        }
    }
}

impl FromStr for JoinType {
    type Err = ColframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inner" => Ok(JoinType::Inner),
            "left" => Ok(JoinType::Left),
            "right" => Ok(JoinType::Right),
            "outer" | "full" => Ok(JoinType::Outer),
            _ => Err(ColframeError::UnknownJoinType(s.to_string())),
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of a join: key columns, join type and overlap suffixes
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOptions {
    /// Key columns, which must exist in both tables
    pub on: Vec<String>,
    /// Join type
    pub how: JoinType,
    /// Suffixes for overlapping non-key columns, `(left, right)`
    pub suffixes: (String, String),
}

impl JoinOptions {
    /// Inner join on the given key columns with `_x`/`_y` suffixes
    pub fn on<S: AsRef<str>>(columns: &[S]) -> Self {
        JoinOptions {
            on: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            how: JoinType::Inner,
            suffixes: ("_x".to_string(), "_y".to_string()),
        }
    }

    /// Set the join type
    pub fn how(mut self, how: JoinType) -> Self {
        self.how = how;
        self
    }

    /// Set the overlap suffixes
    pub fn suffixes(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.suffixes = (left.into(), right.into());
        self
    }
}

/// Hash index from a key tuple to the rows holding it, in row order
type KeyIndex<'a> = HashMap<Vec<&'a Value>, Vec<usize>>;

/// Resolved column layout shared by every output row of one join
struct JoinPlan<'a> {
    left: &'a Table,
    right: &'a Table,
    left_keys: Vec<usize>,
    right_keys: Vec<usize>,
    left_rest: Vec<usize>,
    right_rest: Vec<usize>,
    names: Vec<String>,
    data: Vec<Vec<Value>>,
}

impl<'a> JoinPlan<'a> {
    fn new(left: &'a Table, right: &'a Table, options: &JoinOptions) -> ColframeResult<Self> {
        let left_keys = left.resolve_columns(options.on.as_slice()).map_err(|e| side_error(e, "left"))?;
        let right_keys = right.resolve_columns(options.on.as_slice()).map_err(|e| side_error(e, "right"))?;

        let is_key = |name: &String| options.on.contains(name);
        let left_rest: Vec<usize> = (0..left.column_count())
            .filter(|&i| !is_key(&left.columns()[i]))
            .collect();
        let right_rest: Vec<usize> = (0..right.column_count())
            .filter(|&i| !is_key(&right.columns()[i]))
            .collect();

        let overlaps = |name: &String, other: &Table| !is_key(name) && other.has_column(name);
        let (left_suffix, right_suffix) = &options.suffixes;
        let mut names = options.on.clone();
        for &i in &left_rest {
            let name = &left.columns()[i];
            names.push(if overlaps(name, right) {
                format!("{}{}", name, left_suffix)
            } else {
                name.clone()
            });
        }
        for &i in &right_rest {
            let name = &right.columns()[i];
            names.push(if overlaps(name, left) {
                format!("{}{}", name, right_suffix)
            } else {
                name.clone()
            });
        }

        let data = vec![Vec::new(); names.len()];
        Ok(JoinPlan {
            left,
            right,
            left_keys,
            right_keys,
            left_rest,
            right_rest,
            names,
            data,
        })
    }

    fn key_of(table: &'a Table, keys: &[usize], row: usize) -> Vec<&'a Value> {
        keys.iter()
            .map(|&col| &table.column_at(col)[row])
            .collect()
    }

    fn index(table: &'a Table, keys: &[usize]) -> KeyIndex<'a> {
        let mut index: KeyIndex<'a> = HashMap::new();
        for row in 0..table.row_count() {
            index.entry(Self::key_of(table, keys, row)).or_default().push(row);
        }
        index
    }

    /// Append one output row; a `None` side contributes missing values
    fn emit(&mut self, left_row: Option<usize>, right_row: Option<usize>) {
        let mut out = self.data.iter_mut();
        let (key_table, key_cols, key_row) = match (left_row, right_row) {
            (Some(l), _) => (self.left, &self.left_keys, l),
            (None, Some(r)) => (self.right, &self.right_keys, r),
            (None, None) => return,
        };
        for &col in key_cols {
            if let Some(column) = out.next() {
                column.push(key_table.column_at(col)[key_row].clone());
            }
        }
        for (table, rest, row) in [
            (self.left, &self.left_rest, left_row),
            (self.right, &self.right_rest, right_row),
        ] {
            for &col in rest {
                if let Some(column) = out.next() {
                    column.push(row.map_or(Value::Null, |r| table.column_at(col)[r].clone()));
                }
            }
        }
    }

    fn finish(self) -> ColframeResult<Table> {
        Table::from_parts(self.names, self.data)
    }
}

/// Say which side of the join lacks the columns
fn side_error(err: ColframeError, side: &str) -> ColframeError {
    match err {
        ColframeError::ColumnNotFound(names) => {
            ColframeError::ColumnNotFound(format!("{} (in {} table)", names, side))
        }
        other => other,
    }
}

/// Join two tables on equal key values
///
/// Keys match only when every key value is exactly equal, variant included:
/// `Text("1")` does not match `Integer(1)`. Missing values match each other.
///
/// # Returns
/// * `Ok(Table)` with the joined rows
/// * `Err(ColumnNotFound)` if a key column is absent from either table
/// * `Err(SchemaError)` if suffixing produces a duplicate column name
pub fn join(left: &Table, right: &Table, options: &JoinOptions) -> ColframeResult<Table> {
    let mut plan = JoinPlan::new(left, right, options)?;

    match options.how {
        JoinType::Inner | JoinType::Left => {
            let index = JoinPlan::index(right, &plan.right_keys);
            for l in 0..left.row_count() {
                match index.get(&JoinPlan::key_of(left, &plan.left_keys, l)) {
                    Some(matches) => {
                        for &r in matches {
                            plan.emit(Some(l), Some(r));
                        }
                    }
                    None if options.how == JoinType::Left => plan.emit(Some(l), None),
                    None => {}
                }
            }
        }
        JoinType::Right => {
            let index = JoinPlan::index(left, &plan.left_keys);
            for r in 0..right.row_count() {
                match index.get(&JoinPlan::key_of(right, &plan.right_keys, r)) {
                    Some(matches) => {
                        for &l in matches {
                            plan.emit(Some(l), Some(r));
                        }
                    }
                    None => plan.emit(None, Some(r)),
                }
            }
        }
        JoinType::Outer => {
            let index = JoinPlan::index(right, &plan.right_keys);
            let mut matched_left = vec![false; left.row_count()];
            let mut matched_right = vec![false; right.row_count()];
            for l in 0..left.row_count() {
                if let Some(matches) = index.get(&JoinPlan::key_of(left, &plan.left_keys, l)) {
                    matched_left[l] = true;
                    for &r in matches {
                        matched_right[r] = true;
                        plan.emit(Some(l), Some(r));
                    }
                }
            }
            for l in (0..left.row_count()).filter(|&l| !matched_left[l]) {
                plan.emit(Some(l), None);
            }
            for r in (0..right.row_count()).filter(|&r| !matched_right[r]) {
                plan.emit(None, Some(r));
            }
        }
    }

    let result = plan.finish()?;
    debug!(
        how = %options.how,
        left = left.row_count(),
        right = right.row_count(),
        output = result.row_count(),
        "joined tables"
    );
    Ok(result)
}

impl Table {
    /// Join this table (left) with `right`; see [`join`]
    pub fn join(&self, right: &Table, options: &JoinOptions) -> ColframeResult<Table> {
        join(self, right, options)
    }
}

//! Command execution for the colframe binary
//!
//! Each [`Command`] loads its input files with the configured options, runs
//! one table operation and writes the result. Tabular results are written as
//! CSV; `show` and `describe` write human-readable text.

use std::io::Write;
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::aggregate::AggSpec;
use crate::cli::Command;
use crate::config::AppConfig;
use crate::csv_handler::CsvHandler;
use crate::error::{ColframeError, ColframeResult};
use crate::join::{JoinOptions, JoinType};
use crate::summary::summarize;
use crate::table::{RowView, Table};

/// A single row condition from the command line
#[derive(Debug)]
pub enum RowCondition {
    /// The cell, as written to CSV, equals the text
    Equals { column: String, value: String },
    /// The cell, as written to CSV, matches the pattern
    Matches { column: String, pattern: Regex },
}

impl RowCondition {
    /// Parse `COLUMN=VALUE`
    pub fn equals(spec: &str) -> ColframeResult<Self> {
        let (column, value) = split_assignment(spec)?;
        Ok(RowCondition::Equals {
            column,
            value: value.to_string(),
        })
    }

    /// Parse `COLUMN=REGEX`
    pub fn matches(spec: &str) -> ColframeResult<Self> {
        let (column, pattern) = split_assignment(spec)?;
        Ok(RowCondition::Matches {
            column,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Column the condition reads
    pub fn column(&self) -> &str {
        match self {
            RowCondition::Equals { column, .. } | RowCondition::Matches { column, .. } => column,
        }
    }

    /// Evaluate against a row; rows without the column never match
    pub fn test(&self, row: &RowView<'_>) -> bool {
        let Some(cell) = row.get(self.column()) else {
            return false;
        };
        let field = cell.to_field();
        match self {
            RowCondition::Equals { value, .. } => field == *value,
            RowCondition::Matches { pattern, .. } => pattern.is_match(&field),
        }
    }
}

fn split_assignment(spec: &str) -> ColframeResult<(String, &str)> {
    match spec.split_once('=') {
        Some((column, value)) if !column.is_empty() => Ok((column.to_string(), value)),
        _ => Err(ColframeError::InvalidSpec(format!(
            "condition '{}' must look like COLUMN=VALUE",
            spec
        ))),
    }
}

/// Split a comma-separated list, dropping empty entries
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_suffixes(spec: &str) -> ColframeResult<(String, String)> {
    spec.split_once(',')
        .map(|(left, right)| (left.to_string(), right.to_string()))
        .ok_or_else(|| {
            ColframeError::InvalidSpec(format!("suffixes '{}' must look like LEFT,RIGHT", spec))
        })
}

/// Runs commands against files using one configuration
pub struct CommandRunner<'a> {
    config: &'a AppConfig,
    handler: CsvHandler,
}

impl<'a> CommandRunner<'a> {
    /// Create a runner for the given configuration
    pub fn new(config: &'a AppConfig) -> Self {
        CommandRunner {
            config,
            handler: CsvHandler::new(config.load_options()),
        }
    }

    fn load(&self, path: &Path) -> ColframeResult<Table> {
        self.handler.load_file(path)
    }

    /// Execute a command, writing its output to `out`
    pub fn execute<W: Write>(&self, command: &Command, mut out: W) -> ColframeResult<()> {
        let table = match command {
            Command::Show { file, limit } => {
                let mut table = self.load(file)?;
                if let Some(n) = limit {
                    table = table.head(*n);
                }
                writeln!(out, "{}", table)?;
                return Ok(());
            }
            Command::Describe { file } => {
                let table = self.load(file)?;
                let (rows, columns) = table.shape();
                writeln!(out, "Rows: {}", rows)?;
                writeln!(out, "Columns: {}", columns)?;
                for summary in summarize(&table) {
                    writeln!(out, "\n{}", summary)?;
                }
                return Ok(());
            }
            Command::Select {
                file,
                columns,
                conditions,
                matches,
            } => {
                let table = self.load(file)?;
                let mut filters = conditions
                    .iter()
                    .map(|spec| RowCondition::equals(spec))
                    .collect::<ColframeResult<Vec<_>>>()?;
                for spec in matches {
                    filters.push(RowCondition::matches(spec)?);
                }
                select(&table, columns.as_deref(), &filters)?
            }
            Command::Aggregate { file, by, agg } => {
                let table = self.load(file)?;
                let spec = agg
                    .iter()
                    .map(|entry| AggSpec::parse_entry(entry))
                    .collect::<ColframeResult<AggSpec>>()?;
                match by {
                    Some(by) => table.group_by(&split_list(by))?.agg(&spec)?,
                    None => table.agg(&spec)?,
                }
            }
            Command::Join {
                left,
                right,
                on,
                how,
                suffixes,
            } => {
                let left = self.load(left)?;
                let right = self.load(right)?;
                let (left_suffix, right_suffix) = parse_suffixes(suffixes)?;
                let options = JoinOptions::on(&split_list(on))
                    .how(how.parse::<JoinType>()?)
                    .suffixes(left_suffix, right_suffix);
                left.join(&right, &options)?
            }
        };

        info!(rows = table.row_count(), columns = table.column_count(), "writing result");
        self.handler.write_csv(&table, out)
    }
}

/// Filter with every condition, then project if columns were given
pub fn select(table: &Table, columns: Option<&str>, filters: &[RowCondition]) -> ColframeResult<Table> {
    let referenced: Vec<&str> = filters.iter().map(RowCondition::column).collect();
    table.resolve_columns(&referenced)?;

    let filtered = table.filter(|row| filters.iter().all(|f| f.test(row)));
    match columns {
        Some(list) => filtered.project(&split_list(list)),
        None => Ok(filtered),
    }
}

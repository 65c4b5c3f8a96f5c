//! Per-column statistics for a table
//!
//! [`summarize`] classifies each column as numeric or categorical and collects
//! the figures a quick look at a dataset needs: missing counts, range, mean
//! and median for numeric columns, and distinct and most frequent values for
//! categorical ones.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::table::{ColumnKind, Table};
use crate::value::Value;

/// Share of present values that must be numeric for a numeric column
const NUMERIC_THRESHOLD: f64 = 0.8;

/// Categorical columns with more distinct values than this get no top list
const MAX_UNIQUE_FOR_TOP: usize = 20;

const TOP_VALUES: usize = 5;

/// Range and center of a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    pub rows: usize,
    pub present: usize,
    pub missing: usize,
    /// Set for numeric columns with at least one numeric value
    pub numeric: Option<NumericStats>,
    /// Distinct present values, for categorical columns
    pub unique: Option<usize>,
    /// Most frequent values with their counts, most frequent first
    pub top_values: Vec<(String, usize)>,
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn numeric_stats(present: &[&Value]) -> Option<NumericStats> {
    let mut numbers: Vec<f64> = present.iter().filter_map(|v| v.as_f64().ok()).collect();
    if numbers.is_empty() {
        return None;
    }
    numbers.sort_by(|a, b| a.total_cmp(b));
    Some(NumericStats {
        min: numbers[0],
        max: numbers[numbers.len() - 1],
        mean: numbers.iter().sum::<f64>() / numbers.len() as f64,
        median: median(&numbers),
    })
}

/// Summarize one column of values
pub fn summarize_column(name: &str, values: &[Value]) -> ColumnSummary {
    let present: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();
    let numeric_count = present.iter().filter(|v| v.is_numeric()).count();
    let is_numeric = numeric_count as f64 > present.len() as f64 * NUMERIC_THRESHOLD;

    let mut summary = ColumnSummary {
        name: name.to_string(),
        kind: if is_numeric { ColumnKind::Numeric } else { ColumnKind::Text },
        rows: values.len(),
        present: present.len(),
        missing: values.len() - present.len(),
        numeric: None,
        unique: None,
        top_values: Vec::new(),
    };

    if is_numeric {
        summary.numeric = numeric_stats(&present);
    } else {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for value in &present {
            *counts.entry(value.to_string()).or_default() += 1;
        }
        summary.unique = Some(counts.len());
        if counts.len() <= MAX_UNIQUE_FOR_TOP {
            let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
            // stable: ties stay in first-seen order
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked.truncate(TOP_VALUES);
            summary.top_values = ranked;
        }
    }
    summary
}

/// Summarize every column of a table, in column order
pub fn summarize(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| summarize_column(name, table.column_at(i)))
        .collect()
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        let kind = match self.kind {
            ColumnKind::Numeric => "Numeric",
            ColumnKind::Text => "Categorical/Text",
        };
        writeln!(f, "   Type: {}", kind)?;
        writeln!(
            f,
            "   Non-null: {} ({:.1}%)",
            self.present,
            percent(self.present, self.rows)
        )?;
        write!(
            f,
            "   Missing: {} ({:.1}%)",
            self.missing,
            percent(self.missing, self.rows)
        )?;
        if let Some(stats) = &self.numeric {
            write!(f, "\n   Min: {:.2}", stats.min)?;
            write!(f, "\n   Max: {:.2}", stats.max)?;
            write!(f, "\n   Mean: {:.2}", stats.mean)?;
            write!(f, "\n   Median: {:.2}", stats.median)?;
        }
        if let Some(unique) = self.unique {
            write!(f, "\n   Unique values: {}", unique)?;
        }
        if !self.top_values.is_empty() {
            write!(f, "\n   Top values:")?;
            for (value, count) in &self.top_values {
                write!(
                    f,
                    "\n      '{}': {} ({:.1}%)",
                    shorten(value, 30),
                    count,
                    percent(*count, self.present)
                )?;
            }
        }
        Ok(())
    }
}

//! Aggregate function module for colframe
//!
//! This module contains the aggregators (`sum`, `mean`, `min`, `max`,
//! `count`, `std`, `var`), the [`AggSpec`] describing which aggregators to run
//! on which columns, and whole-table aggregation. Grouped aggregation lives in
//! [`crate::group`] and shares the same machinery.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ColframeError, ColframeResult};
use crate::table::Table;
use crate::value::Value;

/// Supported aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregator {
    /// Sum of the values
    Sum,
    /// Arithmetic mean, `0` for an empty set
    Mean,
    /// Smallest value
    Min,
    /// Largest value
    Max,
    /// Number of rows, missing values included
    Count,
    /// Population standard deviation
    Std,
    /// Population variance
    Var,
}

impl Aggregator {
    /// All aggregators, in the order they are documented
    pub const ALL: [Aggregator; 7] = [
        Aggregator::Sum,
        Aggregator::Mean,
        Aggregator::Min,
        Aggregator::Max,
        Aggregator::Count,
        Aggregator::Std,
        Aggregator::Var,
    ];

    /// Lowercase identifier, also used as the output column suffix
    pub fn name(&self) -> &'static str {
        match self {
            Aggregator::Sum => "sum",
            Aggregator::Mean => "mean",
            Aggregator::Min => "min",
            Aggregator::Max => "max",
            Aggregator::Count => "count",
            Aggregator::Std => "std",
            Aggregator::Var => "var",
        }
    }

    /// Reduce a sequence of values to a single value
    ///
    /// Every aggregator except `count` interprets values as numbers and fails
    /// with `TypeConversionError` on the first value that isn't one, missing
    /// values included.
    pub fn apply<'a, I>(&self, values: I) -> ColframeResult<Value>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        match self {
            Aggregator::Count => Ok(Value::Integer(values.into_iter().count() as i64)),
            Aggregator::Sum => sum(&numbers(values)?),
            Aggregator::Mean => {
                let numbers = as_floats(values)?;
                Ok(Value::Float(mean(&numbers)))
            }
            Aggregator::Min => Ok(extreme(numbers(values)?, |candidate, best| candidate < best)),
            Aggregator::Max => Ok(extreme(numbers(values)?, |candidate, best| candidate > best)),
            Aggregator::Var => Ok(Value::Float(variance(&as_floats(values)?))),
            Aggregator::Std => Ok(Value::Float(variance(&as_floats(values)?).sqrt())),
        }
    }
}

impl FromStr for Aggregator {
    type Err = ColframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aggregator::ALL
            .iter()
            .copied()
            .find(|agg| agg.name() == s)
            .ok_or_else(|| ColframeError::UnknownAggregator(s.to_string()))
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert every value to an `Integer` or `Float`
fn numbers<'a, I>(values: I) -> ColframeResult<Vec<Value>>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(Value::to_numeric).collect()
}

fn as_floats<'a, I>(values: I) -> ColframeResult<Vec<f64>>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(Value::as_f64).collect()
}

fn to_f64(number: &Value) -> f64 {
    match number {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        _ => f64::NAN,
    }
}

/// Integer sum while every input is an integer and no overflow occurs
fn sum(numbers: &[Value]) -> ColframeResult<Value> {
    let mut int_sum: Option<i64> = Some(0);
    let mut float_sum = 0.0;
    for number in numbers {
        float_sum += to_f64(number);
        int_sum = match (int_sum, number) {
            (Some(acc), Value::Integer(i)) => acc.checked_add(*i),
            _ => None,
        };
    }
    Ok(int_sum.map_or(Value::Float(float_sum), Value::Integer))
}

fn mean(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

fn variance(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    let m = mean(numbers);
    numbers.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / numbers.len() as f64
}

/// Pick the first value that wins every comparison, `Null` if there are none
fn extreme<F>(numbers: Vec<Value>, better: F) -> Value
where
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<Value> = None;
    for number in numbers {
        best = match best {
            Some(current) if !better(to_f64(&number), to_f64(&current)) => Some(current),
            _ => Some(number),
        };
    }
    best.unwrap_or(Value::Null)
}

/// Which aggregators to apply to which columns
///
/// Entries keep their insertion order, which is also the order of the output
/// columns. Adding a column twice replaces its aggregators in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggSpec {
    entries: IndexMap<String, Vec<Aggregator>>,
}

impl AggSpec {
    /// Create an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Add aggregators for a column
    pub fn add(mut self, column: impl Into<String>, aggregators: &[Aggregator]) -> Self {
        self.entries.insert(column.into(), aggregators.to_vec());
        self
    }

    /// Add aggregators for a column by name
    ///
    /// # Returns
    /// * `Err(UnknownAggregator)` for the first name that isn't a supported aggregator
    pub fn add_named(self, column: impl Into<String>, names: &[&str]) -> ColframeResult<Self> {
        let aggregators = names
            .iter()
            .map(|name| name.parse())
            .collect::<ColframeResult<Vec<Aggregator>>>()?;
        Ok(self.add(column, &aggregators))
    }

    /// Parse a `column:agg1,agg2` entry
    ///
    /// # Example
    /// ```
    /// # use colframe::aggregate::{AggSpec, Aggregator};
    /// let (column, aggs) = AggSpec::parse_entry("Age:mean,max").unwrap();
    /// assert_eq!(column, "Age");
    /// assert_eq!(aggs, vec![Aggregator::Mean, Aggregator::Max]);
    /// ```
    pub fn parse_entry(entry: &str) -> ColframeResult<(String, Vec<Aggregator>)> {
        let (column, names) = entry.rsplit_once(':').ok_or_else(|| {
            ColframeError::InvalidSpec(format!(
                "aggregation '{}' must look like column:agg1,agg2",
                entry
            ))
        })?;
        if column.is_empty() {
            return Err(ColframeError::InvalidSpec(format!(
                "aggregation '{}' has no column",
                entry
            )));
        }
        let aggregators = names
            .split(',')
            .map(str::parse)
            .collect::<ColframeResult<Vec<Aggregator>>>()?;
        Ok((column.to_string(), aggregators))
    }

    /// Iterate over `(column, aggregators)` entries in order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[Aggregator])> {
        self.entries
            .iter()
            .map(|(column, aggs)| (column.as_str(), aggs.as_slice()))
    }

    /// Returns true when no column has been added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output columns in order, as `(source column, aggregator, output name)`
    ///
    /// A column with several aggregators yields `<column>_<aggregator>` names;
    /// a column with one aggregator keeps its own name.
    pub(crate) fn outputs(&self) -> Vec<(&str, Aggregator, String)> {
        let mut outputs = Vec::new();
        for (column, aggs) in self.entries() {
            for &agg in aggs {
                let name = if aggs.len() > 1 {
                    format!("{}_{}", column, agg.name())
                } else {
                    column.to_string()
                };
                outputs.push((column, agg, name));
            }
        }
        outputs
    }

    /// Check that every aggregated column exists in `table`
    pub(crate) fn validate(&self, table: &Table) -> ColframeResult<()> {
        let columns: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        table.resolve_columns(&columns).map(|_| ())
    }
}

impl FromIterator<(String, Vec<Aggregator>)> for AggSpec {
    fn from_iter<T: IntoIterator<Item = (String, Vec<Aggregator>)>>(iter: T) -> Self {
        AggSpec {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Table {
    /// Aggregate whole columns into a single-row table
    ///
    /// # Returns
    /// * `Ok(Table)` with one row and one column per (column, aggregator) pair
    /// * `Err(ColumnNotFound)` if the spec names a column the table lacks
    /// * `Err(TypeConversionError)` if a numeric aggregator meets a non-number
    pub fn agg(&self, spec: &AggSpec) -> ColframeResult<Table> {
        spec.validate(self)?;
        let mut names = Vec::new();
        let mut data = Vec::new();
        for (column, agg, name) in spec.outputs() {
            let value = agg.apply(self.column(column)?)?;
            names.push(name);
            data.push(vec![value]);
        }
        debug!(outputs = names.len(), rows = self.row_count(), "aggregated table");
        Table::from_parts(names, data)
    }
}

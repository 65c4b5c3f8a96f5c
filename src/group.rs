//! Grouping for colframe tables
//!
//! [`Table::group_by`] indexes rows by the ordered tuple of values found in
//! the grouping columns. The index remembers groups in the order their key
//! was first seen, so grouped aggregation emits groups deterministically in
//! that order.

use indexmap::IndexMap;
use tracing::debug;

use crate::aggregate::AggSpec;
use crate::error::ColframeResult;
use crate::table::Table;
use crate::value::Value;

/// Composite key identifying one group: the row's values in the grouping columns
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(pub Vec<Value>);

impl GroupKey {
    /// Key values in grouping-column order
    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

/// A table together with its rows grouped by key
///
/// Produced by [`Table::group_by`] and consumed by [`GroupedTable::agg`].
#[derive(Debug)]
pub struct GroupedTable<'a> {
    table: &'a Table,
    by: Vec<String>,
    groups: IndexMap<GroupKey, Vec<usize>>,
}

impl Table {
    /// Group rows by the values of one or more columns
    ///
    /// # Returns
    /// * `Ok(GroupedTable)` indexing every row under its group key
    /// * `Err(ColumnNotFound)` naming every grouping column the table lacks
    pub fn group_by<S: AsRef<str>>(&self, columns: &[S]) -> ColframeResult<GroupedTable<'_>> {
        let indices = self.resolve_columns(columns)?;
        let mut groups: IndexMap<GroupKey, Vec<usize>> = IndexMap::new();
        for row in self.rows() {
            let key = GroupKey(indices.iter().map(|&col| row.value(col).clone()).collect());
            groups.entry(key).or_default().push(row.index());
        }
        debug!(rows = self.row_count(), groups = groups.len(), "grouped table");
        Ok(GroupedTable {
            table: self,
            by: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            groups,
        })
    }
}

impl<'a> GroupedTable<'a> {
    /// Grouping column names
    pub fn by(&self) -> &[String] {
        &self.by
    }

    /// Number of distinct group keys
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Groups in first-seen order, each with its row indices in table order
    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &[usize])> {
        self.groups.iter().map(|(key, rows)| (key, rows.as_slice()))
    }

    /// Aggregate every group into one output row
    ///
    /// The result holds the grouping columns followed by one column per
    /// (column, aggregator) pair, named as in [`Table::agg`].
    ///
    /// # Example
    /// ```
    /// # use colframe::aggregate::AggSpec;
    /// # use colframe::table::Table;
    /// # use colframe::value::Value;
    /// let medals = Table::from_columns(vec![
    ///     ("NOC", vec![Value::from("A"), Value::from("A"), Value::from("B")]),
    ///     ("Medal", vec![Value::from("Gold"), Value::from("Silver"), Value::from("Gold")]),
    /// ])
    /// .unwrap();
    /// let spec = AggSpec::new().add_named("Medal", &["count"]).unwrap();
    /// let counts = medals.group_by(&["NOC"]).unwrap().agg(&spec).unwrap();
    /// assert_eq!(counts.column("Medal").unwrap(), &[Value::Integer(2), Value::Integer(1)]);
    /// ```
    pub fn agg(&self, spec: &AggSpec) -> ColframeResult<Table> {
        spec.validate(self.table)?;
        let outputs = spec.outputs();

        let mut names = self.by.clone();
        let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(self.groups.len()); self.by.len()];
        for key in self.groups.keys() {
            for (column, value) in data.iter_mut().zip(key.values()) {
                column.push(value.clone());
            }
        }

        for (column, agg, name) in outputs {
            let values = self.table.column(column)?;
            let aggregated = self
                .groups
                .values()
                .map(|rows| agg.apply(rows.iter().map(|&i| &values[i])))
                .collect::<ColframeResult<Vec<Value>>>()?;
            names.push(name);
            data.push(aggregated);
        }

        debug!(groups = self.groups.len(), columns = names.len(), "aggregated groups");
        Table::from_parts(names, data)
    }
}

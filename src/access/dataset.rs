//! Read-only tabular data consumed by the evaluator.

use super::value::Value;
use anyhow::{bail, Result};
use std::collections::HashMap;

/// Read-only view of a materialized table.
///
/// Columns are addressed by index once resolved; the evaluator looks each
/// referenced name up a single time with [`Dataset::column_index`] and then
/// reads cells with [`Dataset::value`] for every row.
pub trait Dataset {
    /// Column names in schema order
    fn column_names(&self) -> Vec<&str>;

    /// Number of rows
    fn row_count(&self) -> usize;

    /// Position of a column, if present
    fn column_index(&self, name: &str) -> Option<usize>;

    /// Cell at `row` in column `column`; out-of-range lookups yield `Missing`
    fn value(&self, row: usize, column: usize) -> &Value;

    fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

static MISSING: Value = Value::Missing;

/// Row-major in-memory dataset
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryDataset {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl InMemoryDataset {
    /// Build a dataset from column names and rows of values.
    ///
    /// Every row must hold exactly one value per column and column names
    /// must be unique.
    pub fn new<S: Into<String>>(columns: Vec<S>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                bail!("Duplicate column name: {}", name);
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                bail!(
                    "Row {} has {} values but the dataset has {} columns",
                    i,
                    row.len(),
                    columns.len()
                );
            }
        }

        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Build a dataset from named columns of equal length
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> Result<Self> {
        let row_count = columns.first().map_or(0, |(_, values)| values.len());
        let mut names = Vec::with_capacity(columns.len());
        let mut rows: Vec<Vec<Value>> = (0..row_count)
            .map(|_| Vec::with_capacity(columns.len()))
            .collect();

        for (name, values) in columns {
            let name = name.into();
            if values.len() != row_count {
                bail!(
                    "Column {} has {} values, expected {}",
                    name,
                    values.len(),
                    row_count
                );
            }
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
            names.push(name);
        }

        Self::new(names, rows)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Look up a cell by column name
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let column = *self.index.get(column)?;
        self.rows.get(row).map(|values| &values[column])
    }
}

impl Dataset for InMemoryDataset {
    fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    fn value(&self, row: usize, column: usize) -> &Value {
        self.rows
            .get(row)
            .and_then(|values| values.get(column))
            .unwrap_or(&MISSING)
    }
}

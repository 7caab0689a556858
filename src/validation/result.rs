//! Result table produced by a validation run.

use crate::expression::Cell;
use serde::{Deserialize, Serialize};

/// Cells of one validation, one per dataset row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultColumn {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl ResultColumn {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Count passing, failing and errored rows
    pub fn summary(&self) -> ValidationSummary {
        let mut summary = ValidationSummary {
            name: self.name.clone(),
            passed: 0,
            failed: 0,
            errors: 0,
        };
        for cell in &self.cells {
            match cell {
                Cell::Bool(true) => summary.passed += 1,
                Cell::Bool(false) => summary.failed += 1,
                Cell::Error(_) => summary.errors += 1,
            }
        }
        summary
    }
}

/// Per-validation row counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub name: String,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl ValidationSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    /// Share of rows that evaluated to true, in `[0, 1]`; 0 for no rows
    pub fn pass_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.passed as f64 / total as f64,
        }
    }
}

/// Table with one row per dataset row and one column per validation.
///
/// Columns keep the order the validations were given in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    row_count: usize,
    columns: Vec<ResultColumn>,
}

impl EvaluationResult {
    pub(crate) fn new(row_count: usize, columns: Vec<ResultColumn>) -> Self {
        debug_assert!(columns.iter().all(|c| c.cells.len() == row_count));
        Self { row_count, columns }
    }

    /// Number of dataset rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of validations
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Validation names in column order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    /// Cells of the named validation
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.cells.as_slice())
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        self.column(name)?.get(row)
    }

    /// Cells of one dataset row, in column order
    pub fn row(&self, row: usize) -> Option<Vec<&Cell>> {
        if row >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[row]).collect())
    }

    /// Iterate over dataset rows
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.row_count).filter_map(move |row| self.row(row))
    }

    pub fn summary(&self) -> Vec<ValidationSummary> {
        self.columns.iter().map(ResultColumn::summary).collect()
    }
}

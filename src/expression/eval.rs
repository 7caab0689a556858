//! Expression evaluation implementation.

use crate::access::{DataType, Dataset, Value};
use crate::error::ValidationError;
use crate::expression::{ComparisonOperator, EvalError, ExpressionResult};
use crate::syntax::{ColumnRef, ColumnSelector, Expr, Literal, Operand};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of an expression for a single row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Bool(bool),
    Error(ValidationError),
}

impl Cell {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            Cell::Error(_) => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Cell::Bool(true))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Cell::Bool(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Cell::Error(_))
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Cell::Bool(_) => None,
            Cell::Error(err) => Some(err),
        }
    }
}

impl From<ExpressionResult<bool>> for Cell {
    fn from(result: ExpressionResult<bool>) -> Self {
        match result {
            Ok(b) => Cell::Bool(b),
            Err(err) => Cell::Error(err.into()),
        }
    }
}

/// Evaluator for expressions, bound to one dataset
pub struct ExpressionEvaluator<'a, D: ?Sized> {
    /// The dataset to evaluate against
    dataset: &'a D,
    /// Resolved column positions, by name
    columns: HashMap<String, usize>,
    /// Positions of the columns each `prefix*` pattern selects, in schema order
    prefixes: HashMap<String, Vec<usize>>,
}

impl<'a, D: Dataset + ?Sized> ExpressionEvaluator<'a, D> {
    /// Resolve every column `expr` references.
    ///
    /// Fails with [`EvalError::UnknownColumn`] before any row is looked at.
    pub fn new(expr: &Expr, dataset: &'a D) -> ExpressionResult<Self> {
        let mut columns = HashMap::new();
        for name in expr.column_names() {
            let index = dataset
                .column_index(name)
                .ok_or_else(|| EvalError::UnknownColumn {
                    name: name.to_string(),
                })?;
            columns.insert(name.to_string(), index);
        }

        let mut prefixes = HashMap::new();
        for prefix in expr.column_prefixes() {
            let indices: Vec<usize> = dataset
                .column_names()
                .into_iter()
                .filter(|name| name.starts_with(prefix))
                .filter_map(|name| dataset.column_index(name))
                .collect();
            if indices.is_empty() {
                return Err(EvalError::UnknownColumn {
                    name: format!("{}*", prefix),
                });
            }
            prefixes.insert(prefix.to_string(), indices);
        }

        Ok(Self {
            dataset,
            columns,
            prefixes,
        })
    }

    /// Evaluate `expr` for every row, in row order
    pub fn evaluate(&self, expr: &Expr) -> Vec<Cell> {
        (0..self.dataset.row_count())
            .map(|row| Cell::from(self.evaluate_row(expr, row)))
            .collect()
    }

    /// Evaluate `expr` for a single row
    pub fn evaluate_row(&self, expr: &Expr, row: usize) -> ExpressionResult<bool> {
        match expr {
            Expr::Comparison { op, left, right } => {
                let left_val = self.resolve_operand(left, row)?;
                let right_val = self.resolve_operand(right, row)?;
                compare_values(*op, left_val, right_val)
            }

            Expr::Between { column, low, high } => {
                let value = self.column_value(column, row)?;
                evaluate_between(value, *low, *high)
            }

            Expr::MissingCheck { column, negated } => {
                let value = self.column_value(column, row)?;
                Ok(value.is_missing() != *negated)
            }

            Expr::InList {
                column,
                list,
                negated,
            } => {
                let value = self.column_value(column, row)?;
                evaluate_in_list(value, list, *negated)
            }

            Expr::Aggregate {
                aggregator,
                columns,
                op,
                operand,
            } => {
                let indices = self.selected_columns(columns)?;
                let target = self.resolve_operand(operand, row)?;
                if aggregator.is_logical() {
                    let mut matches = Vec::with_capacity(indices.len());
                    for index in indices {
                        matches.push(compare_values(*op, self.dataset.value(row, index), target)?);
                    }
                    Ok(aggregator.reduce_matches(matches))
                } else {
                    let reduced = aggregator
                        .reduce_values(indices.iter().map(|&index| self.dataset.value(row, index)))?;
                    compare_values(*op, &reduced, target)
                }
            }

            // Both sides are always evaluated so an error on either one surfaces
            Expr::And(left, right) => {
                let left_val = self.evaluate_row(left, row);
                let right_val = self.evaluate_row(right, row);
                Ok(left_val? & right_val?)
            }

            Expr::Or(left, right) => {
                let left_val = self.evaluate_row(left, row);
                let right_val = self.evaluate_row(right, row);
                Ok(left_val? | right_val?)
            }
        }
    }

    fn column_index(&self, column: &ColumnRef) -> ExpressionResult<&usize> {
        self.columns
            .get(&column.name)
            .ok_or_else(|| EvalError::UnknownColumn {
                name: column.name.clone(),
            })
    }

    fn column_value(&self, column: &ColumnRef, row: usize) -> ExpressionResult<&'a Value> {
        let index = self.column_index(column)?;
        Ok(self.dataset.value(row, *index))
    }

    /// Positions selected by an aggregate's column list, without repeats
    fn selected_columns(&self, selectors: &[ColumnSelector]) -> ExpressionResult<Vec<usize>> {
        let mut indices = Vec::new();
        for selector in selectors {
            let selected: &[usize] = match selector {
                ColumnSelector::Column(column) => std::slice::from_ref(self.column_index(column)?),
                ColumnSelector::Prefix(prefix) => self
                    .prefixes
                    .get(prefix)
                    .map(Vec::as_slice)
                    .ok_or_else(|| EvalError::UnknownColumn {
                        name: format!("{}*", prefix),
                    })?,
            };
            for &index in selected {
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
        }
        Ok(indices)
    }

    fn resolve_operand<'b>(&self, operand: &'b Operand, row: usize) -> ExpressionResult<&'b Value>
    where
        'a: 'b,
    {
        match operand {
            Operand::Column(column) => self.column_value(column, row),
            Operand::Literal(lit) => Ok(&lit.value),
        }
    }
}

/// Compare two values with `op`.
///
/// A missing operand never compares true. Booleans compare as 0 and 1 against
/// numbers; any other pairing of different types is a type mismatch.
pub fn compare_values(
    op: ComparisonOperator,
    left: &Value,
    right: &Value,
) -> ExpressionResult<bool> {
    let (left_type, right_type) = match (left.data_type(), right.data_type()) {
        (Some(l), Some(r)) => (l, r),
        _ => return Ok(false),
    };

    let ordering = match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => {
                return Err(EvalError::TypeMismatch {
                    operator: op.as_str().to_string(),
                    left: left_type,
                    right: right_type,
                })
            }
        },
    };

    Ok(op.matches(ordering))
}

fn evaluate_between(value: &Value, low: f64, high: f64) -> ExpressionResult<bool> {
    let value_type = match value.data_type() {
        Some(t) => t,
        None => return Ok(false),
    };
    let n = value.as_number().ok_or(EvalError::TypeMismatch {
        operator: "between".to_string(),
        left: value_type,
        right: DataType::Number,
    })?;

    // An inverted range is empty
    Ok(low <= high && low <= n && n <= high)
}

/// Literals of another type never match; the row is a type mismatch only
/// when no literal in the list is comparable with the value.
fn evaluate_in_list(value: &Value, list: &[Literal], negated: bool) -> ExpressionResult<bool> {
    let value_type = match value.data_type() {
        Some(t) => t,
        None => return Ok(false),
    };

    let mut found = false;
    let mut comparable = false;
    for lit in list {
        if let Ok(eq) = compare_values(ComparisonOperator::Eq, value, &lit.value) {
            comparable = true;
            found |= eq;
        }
    }

    if !comparable {
        if let Some(right) = list.first().and_then(|lit| lit.value.data_type()) {
            return Err(EvalError::TypeMismatch {
                operator: if negated { "not in" } else { "in" }.to_string(),
                left: value_type,
                right,
            });
        }
    }

    Ok(found != negated)
}

/// Evaluate a parsed expression against every row of `dataset`
pub fn evaluate_expression<D: Dataset + ?Sized>(
    expr: &Expr,
    dataset: &D,
) -> ExpressionResult<Vec<Cell>> {
    Ok(ExpressionEvaluator::new(expr, dataset)?.evaluate(expr))
}

/// Like [`evaluate_expression`], but fails on the first row-level error
pub fn evaluate_to_bools<D: Dataset + ?Sized>(
    expr: &Expr,
    dataset: &D,
) -> ExpressionResult<Vec<bool>> {
    let evaluator = ExpressionEvaluator::new(expr, dataset)?;
    (0..dataset.row_count())
        .map(|row| evaluator.evaluate_row(expr, row))
        .collect()
}

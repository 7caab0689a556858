//! Expression evaluation against datasets.
//!
//! This module provides:
//! - Comparison operators and their ordering semantics
//! - Aggregators that reduce a set of columns to one outcome
//! - Row-wise evaluation of parsed expressions
//! - Structural (whole-expression) and row-local evaluation errors

pub mod aggregate;
pub mod error;
pub mod eval;
pub mod operator;

pub use aggregate::Aggregator;
pub use error::{EvalError, ExpressionResult};
pub use eval::{
    compare_values, evaluate_expression, evaluate_to_bools, Cell, ExpressionEvaluator,
};
pub use operator::ComparisonOperator;

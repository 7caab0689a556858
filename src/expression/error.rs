//! Error types for expression evaluation.

use crate::access::DataType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during expression evaluation
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvalError {
    /// Referenced column is absent from the dataset; fails the whole evaluation
    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    /// Operands cannot be compared; affects a single row
    #[error("Type mismatch for operator {operator}: left={left}, right={right}")]
    TypeMismatch {
        operator: String,
        left: DataType,
        right: DataType,
    },
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, EvalError>;

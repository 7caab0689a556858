//! Crate-level error type.

use crate::expression::EvalError;
use crate::syntax::{LexError, ParseError};
use crate::validation::RunnerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Any failure of the expression pipeline
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),
}

//! Batch run error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a whole run before any validation is evaluated
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunnerError {
    #[error("Duplicate validation name: {name}")]
    DuplicateName { name: String },
}

/// Result type for runner operations
pub type RunnerResult<T> = Result<T, RunnerError>;

//! Batch validation.
//!
//! - **NamedValidation**: Expression text paired with the name of its result column
//! - **ValidationRunner**: Evaluates many validations, isolating failures per validation
//! - **ExpressionCache**: Parsed expressions shared across runs
//! - **EvaluationResult**: Rows x validations table of cells

pub mod cache;
pub mod definition;
pub mod error;
pub mod result;
pub mod runner;

pub use cache::ExpressionCache;
pub use definition::NamedValidation;
pub use error::{RunnerError, RunnerResult};
pub use result::{EvaluationResult, ResultColumn, ValidationSummary};
pub use runner::{RunnerConfig, ValidationRunner};

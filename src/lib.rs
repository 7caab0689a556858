pub mod access;
pub mod error;
pub mod expression;
pub mod syntax;
pub mod validation;

pub use access::{DataType, Dataset, InMemoryDataset, Value};
pub use error::ValidationError;
pub use expression::{Aggregator, Cell, EvalError};
pub use syntax::{Expr, LexError, ParseError};
pub use validation::{
    EvaluationResult, NamedValidation, RunnerConfig, RunnerError, ValidationRunner,
};

/// Tokenize and parse one expression
pub fn parse(expression: &str) -> Result<Expr, ValidationError> {
    let tokens = syntax::tokenize(expression)?;
    Ok(syntax::parse(tokens)?)
}

/// Parse `expression` and evaluate it for every row of `dataset`.
///
/// Lex, parse and unknown-column errors fail the call. Row-level type
/// mismatches end up in the returned cells.
pub fn evaluate<D: Dataset + ?Sized>(
    expression: &str,
    dataset: &D,
) -> Result<Vec<Cell>, ValidationError> {
    let expr = parse(expression)?;
    Ok(expression::evaluate_expression(&expr, dataset)?)
}

/// Run `validations` with a default [`ValidationRunner`]
pub fn validate<D: Dataset + Sync + ?Sized>(
    validations: &[NamedValidation],
    dataset: &D,
) -> Result<EvaluationResult, RunnerError> {
    ValidationRunner::default().run(validations, dataset)
}

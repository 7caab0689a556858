//! Batch execution of named validations.

use super::cache::ExpressionCache;
use super::definition::NamedValidation;
use super::error::{RunnerError, RunnerResult};
use super::result::{EvaluationResult, ResultColumn};
use crate::access::Dataset;
use crate::error::ValidationError;
use crate::expression::{evaluate_expression, Cell};
use log::{debug, log_enabled, warn, Level};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Runner settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Evaluate validations on the rayon thread pool
    pub parallel: bool,
    /// Keep parsed expressions across runs, keyed by expression text
    pub cache_expressions: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            cache_expressions: true,
        }
    }
}

/// Runs named validations against a dataset.
///
/// Every validation gets its own column in the result. A validation that fails
/// to lex, parse or resolve its columns gets a column of error cells; the
/// others are unaffected.
#[derive(Debug, Default)]
pub struct ValidationRunner {
    config: RunnerConfig,
    cache: ExpressionCache,
}

impl ValidationRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            cache: ExpressionCache::new(),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn cache(&self) -> &ExpressionCache {
        &self.cache
    }

    /// Run every validation against `dataset`.
    ///
    /// Fails only when two validations share a name; that is checked before
    /// anything is evaluated.
    pub fn run<D>(
        &self,
        validations: &[NamedValidation],
        dataset: &D,
    ) -> RunnerResult<EvaluationResult>
    where
        D: Dataset + Sync + ?Sized,
    {
        check_unique_names(validations)?;

        debug!(
            "Running {} validations against {} rows (parallel: {})",
            validations.len(),
            dataset.row_count(),
            self.config.parallel
        );

        // Both paths collect in input order
        let columns: Vec<ResultColumn> = if self.config.parallel {
            validations
                .par_iter()
                .map(|validation| self.run_one(validation, dataset))
                .collect()
        } else {
            validations
                .iter()
                .map(|validation| self.run_one(validation, dataset))
                .collect()
        };

        Ok(EvaluationResult::new(dataset.row_count(), columns))
    }

    fn run_one<D>(&self, validation: &NamedValidation, dataset: &D) -> ResultColumn
    where
        D: Dataset + ?Sized,
    {
        debug!("Performing validation: {}", validation.name());

        let cells = match self.evaluate(validation.expression(), dataset) {
            Ok(cells) => cells,
            Err(err) => {
                warn!(
                    "Validation {} failed for all rows: {}",
                    validation.name(),
                    err
                );
                vec![Cell::Error(err); dataset.row_count()]
            }
        };

        let column = ResultColumn::new(validation.name(), cells);
        if log_enabled!(Level::Debug) {
            let summary = column.summary();
            debug!(
                "Validated {} rows - {:.0}% evaluated to true, {} errors",
                summary.total(),
                100.0 * summary.pass_rate(),
                summary.errors
            );
        }
        column
    }

    fn evaluate<D>(&self, expression: &str, dataset: &D) -> Result<Vec<Cell>, ValidationError>
    where
        D: Dataset + ?Sized,
    {
        let expr = if self.config.cache_expressions {
            self.cache.get_or_parse(expression)?
        } else {
            Arc::new(crate::parse(expression)?)
        };
        Ok(evaluate_expression(&expr, dataset)?)
    }
}

fn check_unique_names(validations: &[NamedValidation]) -> RunnerResult<()> {
    let mut seen = HashSet::with_capacity(validations.len());
    for validation in validations {
        if !seen.insert(validation.name()) {
            return Err(RunnerError::DuplicateName {
                name: validation.name().to_string(),
            });
        }
    }
    Ok(())
}

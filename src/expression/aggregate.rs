//! Column-set aggregators.
//!
//! Logical aggregators (`any`, `all`, `none`) compare every selected column
//! and reduce the per-column outcomes. Data aggregators (`mean`, `median`,
//! `min`, `max`, `sum`) reduce the selected values to one number which is
//! then compared.

use crate::access::{DataType, Value};
use crate::expression::{EvalError, ExpressionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reduction applied across the columns of an aggregate test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregator {
    /// True if the comparison holds for at least one column
    Any,
    /// True if the comparison holds for every column
    All,
    /// True if the comparison holds for no column
    None,
    Mean,
    Median,
    Min,
    Max,
    Sum,
}

impl Aggregator {
    /// Look up an aggregator by its (case-sensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "any" => Some(Aggregator::Any),
            "all" => Some(Aggregator::All),
            "none" => Some(Aggregator::None),
            "mean" => Some(Aggregator::Mean),
            "median" => Some(Aggregator::Median),
            "min" => Some(Aggregator::Min),
            "max" => Some(Aggregator::Max),
            "sum" => Some(Aggregator::Sum),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregator::Any => "any",
            Aggregator::All => "all",
            Aggregator::None => "none",
            Aggregator::Mean => "mean",
            Aggregator::Median => "median",
            Aggregator::Min => "min",
            Aggregator::Max => "max",
            Aggregator::Sum => "sum",
        }
    }

    /// Whether the comparison runs per column before reducing
    pub fn is_logical(&self) -> bool {
        matches!(self, Aggregator::Any | Aggregator::All | Aggregator::None)
    }

    /// Reduce per-column comparison outcomes
    pub fn reduce_matches(&self, matches: impl IntoIterator<Item = bool>) -> bool {
        let mut matches = matches.into_iter();
        match self {
            Aggregator::All => matches.all(|m| m),
            Aggregator::None => !matches.any(|m| m),
            _ => matches.any(|m| m),
        }
    }

    /// Reduce column values to a single number.
    ///
    /// Missing values are skipped. With nothing left, `sum` is 0 and the
    /// other aggregators are missing. Booleans count as 0 and 1; strings are a
    /// type mismatch.
    pub fn reduce_values<'v>(
        &self,
        values: impl IntoIterator<Item = &'v Value>,
    ) -> ExpressionResult<Value> {
        let mut numbers = Vec::new();
        for value in values {
            match value {
                Value::Missing => {}
                Value::String(_) => {
                    return Err(EvalError::TypeMismatch {
                        operator: self.as_str().to_string(),
                        left: DataType::String,
                        right: DataType::Number,
                    })
                }
                other => numbers.extend(other.as_number()),
            }
        }

        if numbers.is_empty() {
            return Ok(match self {
                Aggregator::Sum => Value::Number(0.0),
                _ => Value::Missing,
            });
        }

        let count = numbers.len() as f64;
        let result: f64 = match self {
            Aggregator::Sum => numbers.iter().sum(),
            Aggregator::Mean => numbers.iter().sum::<f64>() / count,
            Aggregator::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregator::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregator::Median => {
                numbers.sort_by(f64::total_cmp);
                let mid = numbers.len() / 2;
                if numbers.len() % 2 == 0 {
                    (numbers[mid - 1] + numbers[mid]) / 2.0
                } else {
                    numbers[mid]
                }
            }
            Aggregator::Any | Aggregator::All | Aggregator::None => {
                return Err(EvalError::TypeMismatch {
                    operator: self.as_str().to_string(),
                    left: DataType::Number,
                    right: DataType::Boolean,
                })
            }
        };

        Ok(Value::Number(result))
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<Value> {
        values.iter().map(|&n| Value::Number(n)).collect()
    }

    #[test]
    fn test_names() {
        for name in ["any", "all", "none", "mean", "median", "min", "max", "sum"] {
            let aggregator = Aggregator::from_name(name).unwrap();
            assert_eq!(aggregator.as_str(), name);
        }
        assert_eq!(Aggregator::from_name("ANY"), None);
        assert_eq!(Aggregator::from_name("count"), None);
        assert!(Aggregator::None.is_logical());
        assert!(!Aggregator::Median.is_logical());
    }

    #[test]
    fn test_reduce_matches() {
        let matches = [true, false, false];
        assert!(Aggregator::Any.reduce_matches(matches));
        assert!(!Aggregator::All.reduce_matches(matches));
        assert!(!Aggregator::None.reduce_matches(matches));
        assert!(Aggregator::None.reduce_matches([false, false]));
        assert!(Aggregator::All.reduce_matches([true, true]));
    }

    #[test]
    fn test_reduce_values() {
        let values = numbers(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(Aggregator::Sum.reduce_values(&values), Ok(Value::Number(10.0)));
        assert_eq!(Aggregator::Mean.reduce_values(&values), Ok(Value::Number(2.5)));
        assert_eq!(Aggregator::Median.reduce_values(&values), Ok(Value::Number(2.5)));
        assert_eq!(Aggregator::Min.reduce_values(&values), Ok(Value::Number(1.0)));
        assert_eq!(Aggregator::Max.reduce_values(&values), Ok(Value::Number(4.0)));

        let odd = numbers(&[5.0, 1.0, 3.0]);
        assert_eq!(Aggregator::Median.reduce_values(&odd), Ok(Value::Number(3.0)));
    }

    #[test]
    fn test_reduce_skips_missing() {
        let values = vec![Value::Missing, Value::Number(2.0), Value::Boolean(true)];
        assert_eq!(Aggregator::Sum.reduce_values(&values), Ok(Value::Number(3.0)));
        assert_eq!(Aggregator::Mean.reduce_values(&values), Ok(Value::Number(1.5)));

        let empty = vec![Value::Missing, Value::Missing];
        assert_eq!(Aggregator::Sum.reduce_values(&empty), Ok(Value::Number(0.0)));
        assert_eq!(Aggregator::Max.reduce_values(&empty), Ok(Value::Missing));
    }

    #[test]
    fn test_reduce_strings_is_mismatch() {
        let values = vec![Value::Number(1.0), Value::from("x")];
        assert_eq!(
            Aggregator::Sum.reduce_values(&values),
            Err(EvalError::TypeMismatch {
                operator: "sum".to_string(),
                left: DataType::String,
                right: DataType::Number,
            })
        );
    }
}

//! Operator definitions for expressions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Comparison operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOperator {
    /// Apply the operator to an ordering.
    ///
    /// `None` stands for unordered operands (a NaN was involved); only `!=`
    /// holds for those.
    pub fn matches(&self, ordering: Option<Ordering>) -> bool {
        match ordering {
            None => matches!(self, ComparisonOperator::Ne),
            Some(ord) => match self {
                ComparisonOperator::Eq => ord == Ordering::Equal,
                ComparisonOperator::Ne => ord != Ordering::Equal,
                ComparisonOperator::Lt => ord == Ordering::Less,
                ComparisonOperator::Le => ord != Ordering::Greater,
                ComparisonOperator::Gt => ord == Ordering::Greater,
                ComparisonOperator::Ge => ord != Ordering::Less,
            },
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Ge => ">=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        use ComparisonOperator::*;

        assert!(Eq.matches(Some(Ordering::Equal)));
        assert!(!Eq.matches(Some(Ordering::Less)));
        assert!(Ne.matches(Some(Ordering::Greater)));
        assert!(Le.matches(Some(Ordering::Equal)));
        assert!(Le.matches(Some(Ordering::Less)));
        assert!(!Lt.matches(Some(Ordering::Equal)));
        assert!(Ge.matches(Some(Ordering::Greater)));
        assert!(!Gt.matches(Some(Ordering::Less)));
    }

    #[test]
    fn test_unordered() {
        use ComparisonOperator::*;

        for op in [Eq, Lt, Le, Gt, Ge] {
            assert!(!op.matches(None), "{} should not hold for NaN", op);
        }
        assert!(Ne.matches(None));
    }
}

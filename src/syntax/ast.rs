//! Expression AST definitions.

use crate::access::Value;
use crate::expression::aggregate::Aggregator;
use crate::expression::operator::ComparisonOperator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a dataset column by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub name: String,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Number or string constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: Value,
}

impl Literal {
    pub fn number(val: f64) -> Self {
        Self {
            value: Value::Number(val),
        }
    }

    pub fn string(val: impl Into<String>) -> Self {
        Self {
            value: Value::String(val.into()),
        }
    }
}

/// Either side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Column(ColumnRef),
    Literal(Literal),
}

impl Operand {
    pub fn column(name: impl Into<String>) -> Self {
        Operand::Column(ColumnRef::new(name))
    }

    pub fn number(val: f64) -> Self {
        Operand::Literal(Literal::number(val))
    }

    pub fn string(val: impl Into<String>) -> Self {
        Operand::Literal(Literal::string(val))
    }
}

/// Column or family of columns taking part in an aggregate test
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnSelector {
    Column(ColumnRef),
    /// Every column whose name starts with the prefix (`prefix*`)
    Prefix(String),
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// `left op right`
    Comparison {
        op: ComparisonOperator,
        left: Operand,
        right: Operand,
    },

    /// `column between low:high`, inclusive
    Between {
        column: ColumnRef,
        low: f64,
        high: f64,
    },

    /// `column missing` / `column not missing`
    MissingCheck { column: ColumnRef, negated: bool },

    /// `column in (a, b, ...)` / `column not in (...)`
    InList {
        column: ColumnRef,
        list: Vec<Literal>,
        negated: bool,
    },

    /// `aggregator columns op operand`, e.g. `any dummy_* == 1` or `sum a + b > 10`
    Aggregate {
        aggregator: Aggregator,
        columns: Vec<ColumnSelector>,
        op: ComparisonOperator,
        operand: Operand,
    },

    And(Box<Expr>, Box<Expr>),

    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Create a comparison expression
    pub fn comparison(op: ComparisonOperator, left: Operand, right: Operand) -> Self {
        Expr::Comparison { op, left, right }
    }

    /// Create a BETWEEN expression
    pub fn between(column: impl Into<String>, low: f64, high: f64) -> Self {
        Expr::Between {
            column: ColumnRef::new(column),
            low,
            high,
        }
    }

    /// Create a `missing` check
    pub fn missing(column: impl Into<String>) -> Self {
        Expr::MissingCheck {
            column: ColumnRef::new(column),
            negated: false,
        }
    }

    /// Create a `not missing` check
    pub fn not_missing(column: impl Into<String>) -> Self {
        Expr::MissingCheck {
            column: ColumnRef::new(column),
            negated: true,
        }
    }

    /// Create an AND expression
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Create an OR expression
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// Names of all columns referenced by this expression, in first-seen order
    pub fn column_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_columns(&mut names, &mut Vec::new());
        names
    }

    /// Prefixes of all `prefix*` column patterns, in first-seen order
    pub fn column_prefixes(&self) -> Vec<&str> {
        let mut prefixes = Vec::new();
        self.collect_columns(&mut Vec::new(), &mut prefixes);
        prefixes
    }

    fn collect_columns<'a>(&'a self, names: &mut Vec<&'a str>, prefixes: &mut Vec<&'a str>) {
        fn push<'a>(names: &mut Vec<&'a str>, name: &'a str) {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        match self {
            Expr::Comparison { left, right, .. } => {
                for operand in [left, right] {
                    if let Operand::Column(col) = operand {
                        push(names, &col.name);
                    }
                }
            }
            Expr::Between { column, .. }
            | Expr::MissingCheck { column, .. }
            | Expr::InList { column, .. } => push(names, &column.name),
            Expr::Aggregate {
                columns, operand, ..
            } => {
                for selector in columns {
                    match selector {
                        ColumnSelector::Column(col) => push(names, &col.name),
                        ColumnSelector::Prefix(prefix) => push(prefixes, prefix),
                    }
                }
                if let Operand::Column(col) = operand {
                    push(names, &col.name);
                }
            }
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_columns(names, prefixes);
                right.collect_columns(names, prefixes);
            }
        }
    }

    /// Check if this expression references no columns
    pub fn is_constant(&self) -> bool {
        self.column_names().is_empty() && self.column_prefixes().is_empty()
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Column(col) => write!(f, "{}", col.name),
            Operand::Literal(lit) => write!(f, "{}", lit.value),
        }
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Column(col) => write!(f, "{}", col.name),
            ColumnSelector::Prefix(prefix) => write!(f, "{}*", prefix),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Comparison { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Between { column, low, high } => {
                write!(f, "{} between {}:{}", column.name, low, high)
            }
            Expr::MissingCheck { column, negated } => {
                if *negated {
                    write!(f, "{} not missing", column.name)
                } else {
                    write!(f, "{} missing", column.name)
                }
            }
            Expr::InList {
                column,
                list,
                negated,
            } => {
                let items: Vec<String> = list.iter().map(|lit| lit.value.to_string()).collect();
                let keyword = if *negated { "not in" } else { "in" };
                write!(f, "{} {} ({})", column.name, keyword, items.join(", "))
            }
            Expr::Aggregate {
                aggregator,
                columns,
                op,
                operand,
            } => {
                let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
                write!(
                    f,
                    "{} {} {} {}",
                    aggregator,
                    columns.join(" + "),
                    op,
                    operand
                )
            }
            Expr::And(left, right) => write!(f, "({} & {})", left, right),
            Expr::Or(left, right) => write!(f, "({} | {})", left, right),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data types a non-missing cell can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Number,
    String,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Number => write!(f, "number"),
            DataType::String => write!(f, "string"),
        }
    }
}

/// Values that can appear in a dataset cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Missing,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Get the data type of this value
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Missing => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Number(_) => Some(DataType::Number),
            Value::String(_) => Some(DataType::String),
        }
    }

    /// Only the explicit marker counts; 0, NaN and "" are ordinary values.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view used by range tests; booleans count as 0 and 1.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Check if this value is compatible with the given data type
    pub fn is_compatible_with(&self, data_type: DataType) -> bool {
        match (self, data_type) {
            (Value::Missing, _) => true,
            (Value::Boolean(_), DataType::Boolean) => true,
            (Value::Number(_), DataType::Number) => true,
            (Value::String(_), DataType::String) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "missing"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            // Strings are written the way the lexer reads them back; there are no escapes
            Value::String(s) if s.contains('"') => write!(f, "'{}'", s),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type() {
        assert_eq!(Value::Missing.data_type(), None);
        assert_eq!(Value::Boolean(true).data_type(), Some(DataType::Boolean));
        assert_eq!(Value::Number(1.5).data_type(), Some(DataType::Number));
        assert_eq!(
            Value::String("a".to_string()).data_type(),
            Some(DataType::String)
        );
    }

    #[test]
    fn test_value_compatibility() {
        assert!(Value::Missing.is_compatible_with(DataType::Number));
        assert!(Value::Boolean(true).is_compatible_with(DataType::Boolean));
        assert!(Value::Number(42.0).is_compatible_with(DataType::Number));
        assert!(Value::String("hello".to_string()).is_compatible_with(DataType::String));

        assert!(!Value::Boolean(true).is_compatible_with(DataType::Number));
        assert!(!Value::Number(42.0).is_compatible_with(DataType::String));
    }

    #[test]
    fn test_only_marker_is_missing() {
        assert!(Value::Missing.is_missing());
        assert!(!Value::Number(0.0).is_missing());
        assert!(!Value::Number(f64::NAN).is_missing());
        assert!(!Value::String(String::new()).is_missing());
        assert!(!Value::Boolean(false).is_missing());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Missing.to_string(), "missing");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from("bob").to_string(), r#""bob""#);
        assert_eq!(Value::from(r#"say "hi""#).to_string(), r#"'say "hi"'"#);
        assert_eq!(Value::from("it's").to_string(), r#""it's""#);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(3), Value::Number(3.0));
        assert_eq!(Value::from(2_i64), Value::Number(2.0));
        assert_eq!(Value::from("x"), Value::String("x".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Missing);
        assert_eq!(Value::from(Some(true)), Value::Boolean(true));
        assert_eq!(Value::Boolean(true).as_number(), Some(1.0));
        assert_eq!(Value::String("1".to_string()).as_number(), None);
    }
}

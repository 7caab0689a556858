use serde::{Deserialize, Serialize};

/// A named expression to run as part of a batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedValidation {
    name: String,
    expression: String,
}

impl NamedValidation {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl<N: Into<String>, E: Into<String>> From<(N, E)> for NamedValidation {
    fn from((name, expression): (N, E)) -> Self {
        Self::new(name, expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let v = NamedValidation::new("tall", "height > 190");
        assert_eq!(v.name(), "tall");
        assert_eq!(v.expression(), "height > 190");
        assert_eq!(NamedValidation::from(("tall", "height > 190")), v);
    }
}

//! Lexing and parsing error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning expression text into tokens
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LexError {
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { position: usize, character: char },

    #[error("Unterminated string starting at position {position}")]
    UnterminatedString { position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position } => *position,
        }
    }
}

/// Grammar violation found while building the AST
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("Expected {expected} at position {position}, found {found}")]
pub struct ParseError {
    pub position: usize,
    pub expected: String,
    pub found: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LexError::UnexpectedCharacter {
            position: 4,
            character: '#',
        };
        assert_eq!(err.to_string(), "Unexpected character '#' at position 4");
        assert_eq!(err.position(), 4);

        let err = LexError::UnterminatedString { position: 7 };
        assert_eq!(err.to_string(), "Unterminated string starting at position 7");

        let err = ParseError {
            position: 3,
            expected: "comparison operator".to_string(),
            found: "end of input".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Expected comparison operator at position 3, found end of input"
        );
    }
}

// Expression tokens for lexical analysis

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Identifier(String),
    /// `prefix*`, selecting every column whose name starts with `prefix`
    Pattern(String),
    Number(f64),
    String(String),

    // Keywords
    Between,
    Not,
    Missing,
    In,

    // Operators
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    Colon,
    Plus,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,

    // Special
    Eof,
}

impl TokenKind {
    /// Check if the token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Between | TokenKind::Not | TokenKind::Missing | TokenKind::In
        )
    }

    /// Check if the token is a comparison operator
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::Greater
                | TokenKind::GreaterEqual
        )
    }

    /// Convert a word to a keyword token if it matches.
    ///
    /// Matching is case-sensitive. `and` and `or` are spelled-out synonyms for
    /// `&` and `|`.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "between" => Some(TokenKind::Between),
            "not" => Some(TokenKind::Not),
            "missing" => Some(TokenKind::Missing),
            "in" => Some(TokenKind::In),
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Pattern(prefix) => write!(f, "column pattern '{}*'", prefix),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Between => write!(f, "'between'"),
            TokenKind::Not => write!(f, "'not'"),
            TokenKind::Missing => write!(f, "'missing'"),
            TokenKind::In => write!(f, "'in'"),
            TokenKind::Equal => write!(f, "'=='"),
            TokenKind::NotEqual => write!(f, "'!='"),
            TokenKind::Less => write!(f, "'<'"),
            TokenKind::LessEqual => write!(f, "'<='"),
            TokenKind::Greater => write!(f, "'>'"),
            TokenKind::GreaterEqual => write!(f, "'>='"),
            TokenKind::And => write!(f, "'&'"),
            TokenKind::Or => write!(f, "'|'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with its source text and character offset
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }
}

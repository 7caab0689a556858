// Expression lexer - tokenizes validation expressions

use super::error::LexError;
use super::token::{Token, TokenKind};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return Ok(Token::eof(start)),
        };

        let kind = match ch {
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.advance();
                    TokenKind::Equal
                } else {
                    return Err(self.unexpected(start, ch));
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.advance();
                    TokenKind::NotEqual
                } else {
                    return Err(self.unexpected(start, ch));
                }
            }
            '<' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '&' => {
                self.advance();
                TokenKind::And
            }
            '|' => {
                self.advance();
                TokenKind::Or
            }
            ':' => {
                self.advance();
                TokenKind::Colon
            }
            '+' => {
                self.advance();
                TokenKind::Plus
            }
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            '\'' | '"' => self.read_string(ch)?,
            '-' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.read_number()?,
            c if c.is_ascii_digit() => self.read_number()?,
            c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(),
            _ => return Err(self.unexpected(start, ch)),
        };

        let literal: String = self.input[start..self.position].iter().collect();
        Ok(Token::new(kind, literal, start))
    }

    fn unexpected(&self, position: usize, character: char) -> LexError {
        LexError::UnexpectedCharacter {
            position,
            character,
        }
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read an identifier, keyword or `prefix*` column pattern
    fn read_identifier(&mut self) -> TokenKind {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // `*` is only meaningful as a column-pattern suffix
        if self.current_char() == Some('*') {
            self.advance();
            return TokenKind::Pattern(identifier);
        }

        TokenKind::keyword_from_str(&identifier).unwrap_or(TokenKind::Identifier(identifier))
    }

    /// Read a string literal delimited by `quote`
    fn read_string(&mut self, quote: char) -> Result<TokenKind, LexError> {
        let start = self.position;
        self.advance(); // Skip opening quote
        let mut string = String::new();

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(TokenKind::String(string));
            }
            string.push(ch);
        }

        Err(LexError::UnterminatedString { position: start })
    }

    /// Read a number (integer or decimal, optionally negative)
    fn read_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut has_dot = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot && self.peek().is_some_and(|c| c.is_ascii_digit()) {
                has_dot = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        number
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| self.unexpected(start, self.input[start]))
    }

    /// Tokenize the entire input; the last token is always `Eof`
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }
}

/// Tokenize an expression
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(expression).tokenize()
}

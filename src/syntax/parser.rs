// Expression parser - converts tokens to AST

use super::ast::{ColumnRef, ColumnSelector, Expr, Literal, Operand};
use super::error::ParseError;
use super::token::{Token, TokenKind};
use crate::expression::aggregate::Aggregator;
use crate::expression::operator::ComparisonOperator;

/// Nesting limit, counting parentheses and `&`/`|` links
pub const MAX_DEPTH: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| &t.kind) != Some(&TokenKind::Eof) {
            let end = tokens
                .last()
                .map_or(0, |t| t.position + t.literal.chars().count());
            tokens.push(Token::eof(end));
        }
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse a complete expression; trailing tokens are an error
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_or()?;
        if !self.match_token(&TokenKind::Eof) {
            return Err(self.error("end of expression"));
        }
        Ok(expr)
    }

    /// Parse OR expression
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_and()?;

        while self.match_token(&TokenKind::Or) {
            self.descend()?;
            self.advance();
            let right = self.parse_and()?;
            left = Expr::or(left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse AND expression
    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_unary()?;

        while self.match_token(&TokenKind::And) {
            self.descend()?;
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::and(left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse a parenthesized group or a single test
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_token(&TokenKind::LeftParen) {
            self.descend()?;
            self.advance();
            let expr = self.parse_or()?;
            self.expect_token(TokenKind::RightParen)?;
            self.depth -= 1;
            return Ok(expr);
        }

        if let TokenKind::Identifier(name) = &self.current_token().kind {
            // Aggregator names are only special when a column list follows
            if let Some(aggregator) = Aggregator::from_name(name) {
                if matches!(
                    self.peek_kind(),
                    TokenKind::Identifier(_) | TokenKind::Pattern(_)
                ) {
                    self.advance();
                    return self.parse_aggregate(aggregator);
                }
            }

            let column = ColumnRef::new(name.clone());
            match self.peek_kind().clone() {
                TokenKind::Between => {
                    self.advance();
                    self.advance();
                    return self.parse_between(column);
                }
                TokenKind::Missing => {
                    self.advance();
                    self.advance();
                    return Ok(Expr::MissingCheck {
                        column,
                        negated: false,
                    });
                }
                TokenKind::In => {
                    self.advance();
                    self.advance();
                    return self.parse_in_list(column, false);
                }
                TokenKind::Not => {
                    self.advance();
                    self.advance();
                    return self.parse_negated(column);
                }
                _ => {}
            }
        }

        self.parse_comparison()
    }

    /// Parse the rest of `column between low:high`
    fn parse_between(&mut self, column: ColumnRef) -> Result<Expr, ParseError> {
        let low = self.expect_number()?;
        self.expect_token(TokenKind::Colon)?;
        let high = self.expect_number()?;
        Ok(Expr::Between { column, low, high })
    }

    /// Parse what follows `column not`
    fn parse_negated(&mut self, column: ColumnRef) -> Result<Expr, ParseError> {
        match self.current_token().kind {
            TokenKind::Missing => {
                self.advance();
                Ok(Expr::MissingCheck {
                    column,
                    negated: true,
                })
            }
            TokenKind::In => {
                self.advance();
                self.parse_in_list(column, true)
            }
            _ => Err(self.error("'missing' or 'in'")),
        }
    }

    /// Parse the parenthesized literal list of an `in` test
    fn parse_in_list(&mut self, column: ColumnRef, negated: bool) -> Result<Expr, ParseError> {
        self.expect_token(TokenKind::LeftParen)?;

        let mut list = vec![];
        loop {
            list.push(self.expect_literal()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        self.expect_token(TokenKind::RightParen)?;
        Ok(Expr::InList {
            column,
            list,
            negated,
        })
    }

    /// Parse `columns op operand` after an aggregator name
    fn parse_aggregate(&mut self, aggregator: Aggregator) -> Result<Expr, ParseError> {
        let mut columns = vec![self.parse_column_selector()?];
        while self.match_token(&TokenKind::Plus) {
            self.advance();
            columns.push(self.parse_column_selector()?);
        }

        let op = self.parse_comparison_operator()?;
        let operand = self.parse_operand()?;
        Ok(Expr::Aggregate {
            aggregator,
            columns,
            op,
            operand,
        })
    }

    fn parse_column_selector(&mut self) -> Result<ColumnSelector, ParseError> {
        let selector = match &self.current_token().kind {
            TokenKind::Identifier(name) => ColumnSelector::Column(ColumnRef::new(name.clone())),
            TokenKind::Pattern(prefix) => ColumnSelector::Prefix(prefix.clone()),
            _ => return Err(self.error("column name or pattern")),
        };
        self.advance();
        Ok(selector)
    }

    /// Parse `operand op operand`
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_operand()?;
        let op = self.parse_comparison_operator()?;
        let right = self.parse_operand()?;
        Ok(Expr::Comparison { op, left, right })
    }

    fn parse_comparison_operator(&mut self) -> Result<ComparisonOperator, ParseError> {
        let op = match self.current_token().kind {
            TokenKind::Equal => ComparisonOperator::Eq,
            TokenKind::NotEqual => ComparisonOperator::Ne,
            TokenKind::Less => ComparisonOperator::Lt,
            TokenKind::LessEqual => ComparisonOperator::Le,
            TokenKind::Greater => ComparisonOperator::Gt,
            TokenKind::GreaterEqual => ComparisonOperator::Ge,
            _ => return Err(self.error("comparison operator")),
        };
        self.advance();
        Ok(op)
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        let operand = match &self.current_token().kind {
            TokenKind::Identifier(name) => Operand::Column(ColumnRef::new(name.clone())),
            TokenKind::Number(n) => Operand::Literal(Literal::number(*n)),
            TokenKind::String(s) => Operand::Literal(Literal::string(s.clone())),
            _ => return Err(self.error("column name, number or string")),
        };
        self.advance();
        Ok(operand)
    }

    // Helper methods

    /// Enter one more level of nesting
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("shallower expression"));
        }
        Ok(())
    }

    /// Get current token
    fn current_token(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    fn peek_kind(&self) -> &TokenKind {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + 1).min(last)].kind
    }

    /// Advance to next token
    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    /// Check if current token matches
    fn match_token(&self, kind: &TokenKind) -> bool {
        self.current_token().kind == *kind
    }

    fn error(&self, expected: &str) -> ParseError {
        let token = self.current_token();
        ParseError {
            position: token.position,
            expected: expected.to_string(),
            found: token.kind.to_string(),
        }
    }

    /// Expect a specific token
    fn expect_token(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.match_token(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&kind.to_string()))
        }
    }

    /// Expect a number
    fn expect_number(&mut self) -> Result<f64, ParseError> {
        match self.current_token().kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(n)
            }
            _ => Err(self.error("number")),
        }
    }

    /// Expect a number or string literal
    fn expect_literal(&mut self) -> Result<Literal, ParseError> {
        let literal = match &self.current_token().kind {
            TokenKind::Number(n) => Literal::number(*n),
            TokenKind::String(s) => Literal::string(s.clone()),
            _ => return Err(self.error("number or string")),
        };
        self.advance();
        Ok(literal)
    }
}

/// Parse a token sequence into an AST
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

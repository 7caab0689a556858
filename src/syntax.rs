// Syntax module - expression lexing, parsing and AST representation

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::{LexError, ParseError};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, Parser, MAX_DEPTH};
pub use token::{Token, TokenKind};

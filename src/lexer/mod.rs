//! Lexical analysis
//!
//! Splits source text into a lazy stream of parenthesis, string and atom tokens.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::{SExprScanner, Tokens};
pub use token::{Token, TokenKind};

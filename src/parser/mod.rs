//! Parser Module
//!
//! Builds a single syntax tree from the token stream, matching parentheses
//! with an explicit stack.

mod ast;
mod sexpr_parser;

pub use ast::Expression;
pub use sexpr_parser::{parse_value, ParseOptions, SExprParser};

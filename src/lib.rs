//! # lisp-thing - a tiny S-expression evaluator
//!
//! Reads one S-expression program, builds a syntax tree and evaluates it
//! against a fixed table of built-in functions.
//!
//! ## Quick Start
//!
//! ```rust
//! use lisp_thing::{run, Value};
//!
//! # fn main() -> lisp_thing::Result<()> {
//! let result = run("(+ 1 2 3)")?;
//! assert_eq!(result, Value::Int(6));
//! assert_eq!(result.to_string(), "6");
//! # Ok(())
//! # }
//! ```
//!
//! ### Step by step
//!
//! ```rust
//! use lisp_thing::{Evaluator, Parser, Scanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = r#"(list 1 "two" (list 3))"#;
//!
//! // Tokenize (lazy, whitespace dropped)
//! let scanner = Scanner::new(code);
//!
//! // Parse into a single tree
//! let program = Parser::new(scanner.tokens()).parse()?;
//!
//! // Execute
//! let evaluator = Evaluator::new();
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result.to_string(), r#"[1, "two", [3]]"#);
//! # Ok(())
//! # }
//! ```
//!
//! ## Language
//!
//! - Integers (`42`, `-7`) and JSON-style strings (`"a\n"`) evaluate to themselves.
//! - `(name arg...)` calls the built-in `name` with its evaluated arguments.
//! - There are no variables: a bare identifier outside call-head position is
//!   an error.
//!
//! ### Built-in Functions
//!
//! - `(+ n...)` - integer sum, `(+)` is `0`
//! - `(list x...)` - collect arguments into a list
//! - `(first l)` - first element of a list
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → Expression → Evaluator → Value
//! ```
//!
//! - [`Scanner`] - Tokenizes source code into tokens
//! - [`Parser`] - Builds the syntax tree with an explicit bracket stack
//! - [`Evaluator`] - Evaluates the tree against a [`ToolRegistry`]
//! - [`Value`] - Runtime value representation
//!
//! ## Error Handling
//!
//! Every failure is an [`Error`]; [`Error::kind`] tells parse errors from
//! runtime errors.
//!
//! ```rust
//! use lisp_thing::{run, ErrorKind};
//!
//! let err = run("(+ 1 2))").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Parse);
//! assert!(err.to_string().contains("unmatched ')'"));
//!
//! let err = run("(first (list))").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Runtime);
//! ```

/// Version of the interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod tools;

pub use error::{Error, ErrorKind, Result};
pub use lexer::{SExprScanner, Token, TokenKind};
pub use parser::{Expression, ParseOptions, SExprParser};
pub use runtime::{LispEvaluator, Value};
pub use tools::{Tool, ToolRegistry};

/// Type alias for the S-expression scanner (lexer).
pub type Scanner<'a> = SExprScanner<'a>;

/// Type alias for the S-expression parser.
pub type Parser<I> = SExprParser<I>;

/// Type alias for the evaluator.
pub type Evaluator = LispEvaluator;

/// Parse source text into its single top-level expression
pub fn parse(source: &str) -> Result<Expression> {
    parse_with_options(source, ParseOptions::default())
}

/// Parse source text with explicit parser options
pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<Expression> {
    SExprParser::with_options(SExprScanner::new(source).tokens(), options).parse()
}

/// Evaluate an already parsed tree against the standard built-ins
pub fn evaluate(program: &Expression) -> Result<Value> {
    LispEvaluator::new().execute(program)
}

/// Parse and evaluate source text in one call
pub fn run(source: &str) -> Result<Value> {
    evaluate(&parse(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run() {
        assert_eq!(run("(+ 1 2 3)").unwrap(), Value::Int(6));
        assert_eq!(run(r#"(first (list "a" "b"))"#).unwrap(), Value::from("a"));
    }

    #[test]
    fn test_parse_then_evaluate() {
        let program = parse("(list 1 2)").unwrap();
        assert_eq!(evaluate(&program).unwrap().to_string(), "[1, 2]");
    }

    #[test]
    fn test_parse_errors_prevent_evaluation() {
        // A parse error wins even when evaluation would also fail.
        let err = run("(foo) )").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_parse_with_options() {
        let options = ParseOptions::with_max_depth(1);
        assert!(parse_with_options("(+ 1 2)", options).is_ok());
        assert!(matches!(
            parse_with_options("(+ 1 (+ 2))", options).unwrap_err(),
            Error::NestingTooDeep { limit: 1, .. }
        ));
    }
}

//! Error types for the lisp-thing interpreter

use thiserror::Error;

/// Interpreter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors
    /// A `)` with no open list to close
    ///
    /// **Triggered by:** More closing than opening parentheses
    /// **Example:** `(+ 1 2))`
    #[error("Parse error at line {line}, column {col}: unmatched ')'")]
    UnmatchedCloseParen {
        /// Line of the offending `)`
        line: usize,
        /// Column of the offending `)`
        col: usize,
    },

    /// Input ended while at least one `(` was still open
    ///
    /// **Triggered by:** Missing closing parenthesis
    /// **Example:** `(+ 1 (list 2)`
    #[error("Parse error at line {line}, column {col}: unmatched '(' ({open} still open)")]
    UnmatchedOpenParen {
        /// Number of lists left unclosed
        open: usize,
        /// Line of the innermost unclosed `(`
        line: usize,
        /// Column of the innermost unclosed `(`
        col: usize,
    },

    /// The program contains no expression at all
    #[error("Parse error: unexpected end of input")]
    UnexpectedEof,

    /// More than one top-level expression
    ///
    /// **Example:** `(+ 1 2) (+ 3 4)`
    #[error("Parse error at line {line}, column {col}: too many top-level expressions (found {count})")]
    TooManyTopLevelExpressions {
        /// Number of top-level expressions found
        count: usize,
        /// Line where the second expression starts
        line: usize,
        /// Column where the second expression starts
        col: usize,
    },

    /// A quoted literal that does not decode as a JSON string
    ///
    /// **Triggered by:** Bad escapes or a literal missing its closing quote
    /// **Example:** `"\q"`, `"abc`
    #[error("Parse error at line {line}, column {col}: invalid string literal {token}: {reason}")]
    InvalidString {
        /// Raw token text
        token: String,
        /// Decoder message
        reason: String,
        /// Line of the token
        line: usize,
        /// Column of the token
        col: usize,
    },

    /// Integer-shaped text that does not fit in 64 bits
    #[error("Parse error at line {line}, column {col}: integer literal out of range: {token}")]
    IntegerOutOfRange {
        /// Raw token text
        token: String,
        /// Line of the token
        line: usize,
        /// Column of the token
        col: usize,
    },

    /// Nesting exceeded the configured `ParseOptions::max_depth`
    #[error("Parse error at line {line}, column {col}: nesting deeper than {limit}")]
    NestingTooDeep {
        /// Configured limit
        limit: usize,
        /// Line of the `(` that crossed the limit
        line: usize,
        /// Column of the `(` that crossed the limit
        col: usize,
    },

    // Runtime errors
    /// Evaluating `()`
    #[error("Runtime error: empty list")]
    EmptyList,

    /// Call head is not an identifier
    ///
    /// **Example:** `(1 2 3)`
    #[error("Runtime error: cannot invoke {} {type_name}", indefinite_article(.type_name))]
    NotCallable {
        /// Kind of the node found in head position
        type_name: String,
    },

    /// Identifier evaluated outside call-head position
    ///
    /// **Example:** `foo`, `(list foo)`
    #[error("Runtime error: cannot eval an identifier: {name}")]
    IdentifierEval {
        /// Identifier text
        name: String,
    },

    /// Call head names no registered built-in
    #[error("Runtime error: unknown function: {name}")]
    UndefinedTool {
        /// Function name
        name: String,
    },

    /// Built-in received a value of the wrong type
    ///
    /// **Example:** `(+ 1 "two")`, `(first 5)`
    #[error("Runtime error: type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Index past the end of a list
    ///
    /// **Example:** `(first (list))`
    #[error("Runtime error: index out of bounds: {index} for list of length {length}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// List length
        length: usize,
    },

    /// Wrong number of arguments for a built-in
    #[error("Runtime error: invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// Built-in name
        tool: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Integer arithmetic left the 64-bit range
    #[error("Runtime error: integer overflow in {tool}")]
    IntegerOverflow {
        /// Built-in name
        tool: String,
    },
}

/// The two error families of the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed source; evaluation never started
    Parse,
    /// Well-formed tree that failed while evaluating
    Runtime,
}

impl Error {
    /// Classify the error as a parse or runtime failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnmatchedCloseParen { .. }
            | Error::UnmatchedOpenParen { .. }
            | Error::UnexpectedEof
            | Error::TooManyTopLevelExpressions { .. }
            | Error::InvalidString { .. }
            | Error::IntegerOutOfRange { .. }
            | Error::NestingTooDeep { .. } => ErrorKind::Parse,

            Error::EmptyList
            | Error::NotCallable { .. }
            | Error::IdentifierEval { .. }
            | Error::UndefinedTool { .. }
            | Error::TypeError { .. }
            | Error::IndexOutOfBounds { .. }
            | Error::InvalidArguments { .. }
            | Error::IntegerOverflow { .. } => ErrorKind::Runtime,
        }
    }

    /// True for errors raised while tokenizing or building the tree
    pub fn is_parse_error(&self) -> bool {
        self.kind() == ErrorKind::Parse
    }

    /// True for errors raised while evaluating
    pub fn is_runtime_error(&self) -> bool {
        self.kind() == ErrorKind::Runtime
    }
}

fn indefinite_article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Result type for interpreter operations
pub type Result<T> = std::result::Result<T, Error>;

use super::ast::Expression;
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Knobs for [`SExprParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Maximum parenthesis nesting; `None` means unbounded
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Options with a nesting cap
    pub fn with_max_depth(max_depth: usize) -> Self {
        ParseOptions {
            max_depth: Some(max_depth),
        }
    }
}

/// S-expression tree builder
///
/// Consumes tokens in a single pass, keeping an explicit stack of
/// in-progress lists. The bottom frame is the implicit top level and must
/// end up holding exactly one expression.
pub struct SExprParser<I> {
    tokens: I,
    options: ParseOptions,
}

impl<I: Iterator<Item = Token>> SExprParser<I> {
    /// Creates a new S-expression parser
    pub fn new<T: IntoIterator<IntoIter = I>>(tokens: T) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    /// Creates a parser with explicit options
    pub fn with_options<T: IntoIterator<IntoIter = I>>(tokens: T, options: ParseOptions) -> Self {
        SExprParser {
            tokens: tokens.into_iter(),
            options,
        }
    }

    /// Parses the tokens into a single root expression
    pub fn parse(self) -> Result<Expression> {
        let SExprParser { tokens, options } = self;
        let mut stack: Vec<Frame> = vec![Frame::new(1, 1)];
        let mut top_level_started = 0usize;
        let mut second_start = None;

        for token in tokens {
            if token.kind != TokenKind::Whitespace
                && token.kind != TokenKind::RightParen
                && stack.len() == 1
            {
                top_level_started += 1;
                if top_level_started == 2 {
                    second_start = Some((token.line, token.column));
                }
            }

            match token.kind {
                TokenKind::Whitespace => continue,
                TokenKind::LeftParen => {
                    if let Some(limit) = options.max_depth {
                        if stack.len() > limit {
                            return Err(Error::NestingTooDeep {
                                limit,
                                line: token.line,
                                col: token.column,
                            });
                        }
                    }
                    stack.push(Frame::new(token.line, token.column));
                }
                TokenKind::RightParen => {
                    if stack.len() < 2 {
                        return Err(Error::UnmatchedCloseParen {
                            line: token.line,
                            col: token.column,
                        });
                    }
                    let finished = stack.pop().map(|frame| frame.items).unwrap_or_default();
                    if let Some(parent) = stack.last_mut() {
                        parent.items.push(Expression::List(finished));
                    }
                }
                TokenKind::String | TokenKind::Atom => {
                    let value = parse_value(&token)?;
                    if let Some(frame) = stack.last_mut() {
                        frame.items.push(value);
                    }
                }
            }
        }

        if let Some(innermost) = stack.last().filter(|_| stack.len() > 1) {
            return Err(Error::UnmatchedOpenParen {
                open: stack.len() - 1,
                line: innermost.line,
                col: innermost.col,
            });
        }

        let mut top_level = stack.pop().map(|frame| frame.items).unwrap_or_default();
        match top_level.len() {
            0 => Err(Error::UnexpectedEof),
            1 => {
                let root = top_level.remove(0);
                tracing::debug!(
                    nodes = root.node_count(),
                    depth = root.depth(),
                    "parsed program"
                );
                Ok(root)
            }
            count => {
                let (line, col) = second_start.unwrap_or_default();
                Err(Error::TooManyTopLevelExpressions { count, line, col })
            }
        }
    }
}

/// A list under construction and the position of its `(`
struct Frame {
    items: Vec<Expression>,
    line: usize,
    col: usize,
}

impl Frame {
    fn new(line: usize, col: usize) -> Self {
        Frame {
            items: Vec::new(),
            line,
            col,
        }
    }
}

/// Classifies one non-parenthesis token
///
/// Integer first, then quoted string, otherwise identifier. Integer-shaped
/// text is never an identifier, even when it overflows.
pub fn parse_value(token: &Token) -> Result<Expression> {
    let text = token.lexeme.as_str();

    if let Ok(n) = text.parse::<i64>() {
        return Ok(Expression::Integer(n));
    }
    if is_integer_shaped(text) {
        return Err(Error::IntegerOutOfRange {
            token: text.to_string(),
            line: token.line,
            col: token.column,
        });
    }

    if text.starts_with('"') {
        return serde_json::from_str::<String>(text)
            .map(Expression::String)
            .map_err(|e| Error::InvalidString {
                token: text.to_string(),
                reason: e.to_string(),
                line: token.line,
                col: token.column,
            });
    }

    Ok(Expression::Identifier(text.to_string()))
}

fn is_integer_shaped(text: &str) -> bool {
    let digits = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of the syntax tree
///
/// The parsed program is exactly one of these. Lists own their children, so a
/// tree has no sharing and no back-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Bare atom that is neither an integer nor a quoted string.
    /// Only meaningful in call-head position.
    Identifier(String),
    /// Base-10 signed integer literal
    Integer(i64),
    /// Decoded string literal
    String(String),
    /// Parenthesized group; the first element is the call head
    List(Vec<Expression>),
}

impl Expression {
    /// Returns the node kind as used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "identifier",
            Expression::Integer(_) => "integer",
            Expression::String(_) => "string",
            Expression::List(_) => "list",
        }
    }

    /// Total number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        match self {
            Expression::List(items) => 1 + items.iter().map(Expression::node_count).sum::<usize>(),
            _ => 1,
        }
    }

    /// Parenthesis nesting depth; atoms have depth 0
    pub fn depth(&self) -> usize {
        match self {
            Expression::List(items) => {
                1 + items.iter().map(Expression::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }
}

/// Debug-style rendering: `id:name`, integers, JSON strings, `[...]` lists
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "id:{}", name),
            Expression::Integer(n) => write!(f, "{}", n),
            Expression::String(s) => {
                let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Expression::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

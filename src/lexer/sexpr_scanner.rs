use lazy_static::lazy_static;
use regex::{CaptureMatches, Regex};

use super::token::{Token, TokenKind};

lazy_static! {
    /// Alternatives are tried left to right at each position.
    /// `.` does not match `\n`, so a string literal never runs past the end
    /// of its line; an unclosed one falls through to the atom pattern.
    static ref TOKEN_RE: Regex = Regex::new(concat!(
        r"(?P<ws>\s+)|",
        r"(?P<open>\()|",
        r"(?P<close>\))|",
        r#"(?P<string>"(?:[^"\n\\]|\\.)+")|"#,
        r"(?P<atom>[^()\s]+)",
    ))
    .expect("token pattern is valid");
}

/// Scanner for S-expression source text
///
/// Scanning never fails: every character belongs to one of the token
/// classes. Malformed atoms are rejected later, by the parser.
#[derive(Debug, Clone, Copy)]
pub struct SExprScanner<'a> {
    source: &'a str,
}

impl<'a> SExprScanner<'a> {
    /// Creates a new S-expression scanner from source code
    pub fn new(source: &'a str) -> Self {
        SExprScanner { source }
    }

    /// Lazily yields every token, whitespace runs included
    ///
    /// Each call starts again from the beginning of the source.
    pub fn raw_tokens(&self) -> Tokens<'a> {
        let re: &'static Regex = &TOKEN_RE;
        Tokens {
            matches: re.captures_iter(self.source),
            line: 1,
            column: 1,
        }
    }

    /// Lazily yields the tokens the parser consumes (whitespace dropped)
    pub fn tokens(&self) -> impl Iterator<Item = Token> + 'a {
        self.raw_tokens().filter(|token| !token.is_whitespace())
    }

    /// Scans all parser-facing tokens and returns them as a vector
    pub fn scan_tokens(&self) -> Vec<Token> {
        self.tokens().collect()
    }
}

/// Lazy token iterator returned by [`SExprScanner::raw_tokens`]
pub struct Tokens<'a> {
    matches: CaptureMatches<'static, 'a>,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed, in characters)
    column: usize,
}

impl Tokens<'_> {
    /// Moves the position past `text`, counting only the matched characters
    fn advance(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last) => {
                self.line += text.matches('\n').count();
                self.column = text[last + 1..].chars().count() + 1;
            }
            None => self.column += text.chars().count(),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let caps = self.matches.next()?;

        let (kind, m) = if let Some(m) = caps.name("ws") {
            (TokenKind::Whitespace, m)
        } else if let Some(m) = caps.name("open") {
            (TokenKind::LeftParen, m)
        } else if let Some(m) = caps.name("close") {
            (TokenKind::RightParen, m)
        } else if let Some(m) = caps.name("string") {
            (TokenKind::String, m)
        } else {
            (TokenKind::Atom, caps.name("atom")?)
        };

        let text = m.as_str();
        let token = Token::new(kind, text.to_string(), self.line, self.column);
        self.advance(text);

        tracing::trace!(kind = %token.kind, lexeme = %token.lexeme, line = token.line, column = token.column, "token");
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(source: &str) -> Vec<String> {
        SExprScanner::new(source)
            .tokens()
            .map(|t| t.lexeme)
            .collect()
    }

    #[test]
    fn test_simple_sexpr() {
        let source = "(+ 1 2)";
        let tokens = SExprScanner::new(source).scan_tokens();

        assert_eq!(tokens.len(), 5); // ( + 1 2 )
        assert_eq!(tokens[0].kind, TokenKind::LeftParen);
        assert_eq!(tokens[1].kind, TokenKind::Atom);
        assert_eq!(tokens[1].lexeme, "+");
        assert_eq!(tokens[2].lexeme, "1");
        assert_eq!(tokens[3].lexeme, "2");
        assert_eq!(tokens[4].kind, TokenKind::RightParen);
    }

    #[test]
    fn test_whitespace_is_recognised_then_filtered() {
        let scanner = SExprScanner::new("( a\t\n b )");
        let raw: Vec<TokenKind> = scanner.raw_tokens().map(|t| t.kind).collect();
        assert_eq!(
            raw,
            vec![
                TokenKind::LeftParen,
                TokenKind::Whitespace,
                TokenKind::Atom,
                TokenKind::Whitespace,
                TokenKind::Atom,
                TokenKind::Whitespace,
                TokenKind::RightParen,
            ]
        );
        assert_eq!(lexemes("( a\t\n b )"), vec!["(", "a", "b", ")"]);
    }

    #[test]
    fn test_parens_split_atoms() {
        assert_eq!(lexemes("(foo(bar)baz)"), vec!["(", "foo", "(", "bar", ")", "baz", ")"]);
    }

    #[test]
    fn test_string_literal_keeps_spaces_and_escapes() {
        let tokens = SExprScanner::new(r#"(list "a b" "q\"x\\")"#).scan_tokens();
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].lexeme, r#""a b""#);
        assert_eq!(tokens[3].kind, TokenKind::String);
        assert_eq!(tokens[3].lexeme, r#""q\"x\\""#);
    }

    #[test]
    fn test_escaped_paren_inside_string() {
        assert_eq!(lexemes(r#""(not a list)""#), vec![r#""(not a list)""#]);
    }

    #[test]
    fn test_unterminated_string_falls_through_to_atom() {
        let tokens = SExprScanner::new("\"abc def\n)").scan_tokens();
        assert_eq!(tokens[0].kind, TokenKind::Atom);
        assert_eq!(tokens[0].lexeme, "\"abc");
        assert_eq!(tokens[1].lexeme, "def");
        assert_eq!(tokens[2].kind, TokenKind::RightParen);
    }

    #[test]
    fn test_string_never_crosses_newline() {
        let tokens = SExprScanner::new("\"ab\ncd\"").scan_tokens();
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Atom));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_positions() {
        let tokens = SExprScanner::new("(a\n  bc)").scan_tokens();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 2));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 5));
    }

    #[test]
    fn test_columns_after_multibyte_and_crlf() {
        let tokens = SExprScanner::new("(\"é\" x\r\n  y)").scan_tokens();
        assert_eq!((tokens[1].line, tokens[1].column), (1, 2));
        assert_eq!((tokens[2].line, tokens[2].column), (1, 6));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 3));
    }

    #[test]
    fn test_columns_on_long_single_line() {
        let count = 50_000;
        let source = format!("(+{})", " 1".repeat(count));
        let tokens = SExprScanner::new(&source).scan_tokens();

        assert_eq!(tokens.len(), count + 3);
        assert!(tokens.iter().all(|t| t.line == 1));
        // `(+` then " 1" pairs: the n-th argument sits at column 2n + 2.
        assert_eq!(tokens[2].column, 4);
        assert_eq!(tokens[count + 1].column, 2 * count + 2);
        assert_eq!(tokens[count + 2].column, 2 * count + 3);
    }

    #[test]
    fn test_restartable() {
        let scanner = SExprScanner::new("(first (list 1))");
        let first_pass = scanner.scan_tokens();
        let second_pass = scanner.scan_tokens();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_empty_source() {
        assert!(SExprScanner::new("").scan_tokens().is_empty());
        assert!(SExprScanner::new("  \n\t ").scan_tokens().is_empty());
    }
}

//! Error types.
//!
//! Lexing and parsing failures carry the byte offset of the problem, so that
//! the caller can point at it (see [`caret`][crate::report::caret]).
//! Evaluation and table-building failures are defensive: they signal a broken
//! internal contract rather than bad input.

use std::fmt::{Display, Formatter};

use crate::token::{Name, Token};

/// An input character that does not start any token.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LexError {
    pub character: char,
    pub offset: usize,
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "illegal character {:?} at offset {}",
            self.character, self.offset
        )
    }
}

impl std::error::Error for LexError {}

/// What the parser ran into instead of what it expected.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Found {
    Token(Token),
    EndOfInput,
}

impl Display for Found {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Found::Token(token) => write!(f, "{}", token),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// The token stream does not match the grammar.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SyntaxError {
    pub found: Found,
    pub offset: usize,
    /// Human-readable description of what would have been accepted.
    pub expected: &'static str,
}

impl SyntaxError {
    pub fn is_end_of_input(&self) -> bool {
        self.found == Found::EndOfInput
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "syntax error at offset {}: expected {}, found {}",
            self.offset, self.expected, self.found
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Nesting through `not` or parentheses went past the parser's limit.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DepthError {
    /// Offset of the `not` or `(` that opened the level too many.
    pub offset: usize,
    pub limit: usize,
}

impl Display for DepthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expression nested too deeply at offset {} (at most {} levels are supported)",
            self.offset, self.limit
        )
    }
}

impl std::error::Error for DepthError {}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    Lex(LexError),
    Syntax(SyntaxError),
    Depth(DepthError),
}

impl ParseError {
    /// Byte offset of the offending character or token.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lex(e) => e.offset,
            ParseError::Syntax(e) => e.offset,
            ParseError::Depth(e) => e.offset,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(e: SyntaxError) -> Self {
        ParseError::Syntax(e)
    }
}

impl From<DepthError> for ParseError {
    fn from(e: DepthError) -> Self {
        ParseError::Depth(e)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::Syntax(e) => write!(f, "{}", e),
            ParseError::Depth(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Syntax(e) => Some(e),
            ParseError::Depth(e) => Some(e),
        }
    }
}

/// Any failure while processing a single expression.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    Parse(ParseError),
    /// An identifier was evaluated without a value in the assignment.
    MissingBinding { name: Name },
    /// A row discovered a subexpression that the first row did not.
    InternalInconsistency { row: usize, subexpression: String },
    /// The expression has more identifiers than the configured limit.
    TooManyIdentifiers { count: usize, limit: usize },
}

impl Error {
    /// Byte offset of the problem, for lexing and syntax errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Parse(e) => Some(e.offset()),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Parse(e.into())
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Parse(e.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{}", e),
            Error::MissingBinding { name } => {
                write!(f, "no value bound to identifier `{}`", name)
            }
            Error::InternalInconsistency { row, subexpression } => write!(
                f,
                "internal error: row {} discovered new subexpression `{}`",
                row, subexpression
            ),
            Error::TooManyIdentifiers { count, limit } => write!(
                f,
                "too many identifiers: {} (at most {} are supported)",
                count, limit
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::token::TokenKind;

    #[test]
    fn test_lex_error_message() {
        let e = LexError { character: '$', offset: 2 };
        assert_eq!(e.to_string(), "illegal character '$' at offset 2");
    }

    #[test]
    fn test_syntax_error_message() {
        let e = SyntaxError {
            found: Found::Token(Token::new(TokenKind::RParen, ")", 7)),
            offset: 7,
            expected: "end of input",
        };
        assert_eq!(
            e.to_string(),
            "syntax error at offset 7: expected end of input, found `)`"
        );
        assert!(!e.is_end_of_input());
    }

    #[test]
    fn test_depth_error() {
        let e: Error = ParseError::from(DepthError { offset: 1024, limit: 256 }).into();
        assert_eq!(e.offset(), Some(1024));
        assert_eq!(
            e.to_string(),
            "expression nested too deeply at offset 1024 (at most 256 levels are supported)"
        );
    }

    #[test]
    fn test_error_offset() {
        let e: Error = LexError { character: '#', offset: 4 }.into();
        assert_eq!(e.offset(), Some(4));
        let e = Error::TooManyIdentifiers { count: 30, limit: 24 };
        assert_eq!(e.offset(), None);
    }

    #[test]
    fn test_error_source() {
        use std::error::Error as _;

        let e: Error = SyntaxError {
            found: Found::EndOfInput,
            offset: 5,
            expected: "an operand",
        }
        .into();
        assert!(e.source().is_some());
        assert!(Error::MissingBinding { name: "x".into() }.source().is_none());
    }
}

//! Tokenizer for propositional expressions.
//!
//! The lexer recognises parentheses and identifier-like words `[A-Za-z_][A-Za-z0-9_]*`.
//! A word that exactly matches one of the reserved (lowercase) keywords
//! `not`, `and`, `or`, `implies`, `equals` becomes an operator token,
//! any other word becomes an [`Identifier`][TokenKind::Identifier].
//!
//! Spaces, tabs and newlines separate tokens and are otherwise ignored.
//! Any other character yields a [`LexError`]; the lexer then moves past the
//! offending character, so the caller may either stop or keep pulling tokens.
//!
//! # Examples
//!
//! ```
//! use whopper::token::{tokenize, TokenKind};
//!
//! let kinds: Vec<TokenKind> = tokenize("not (a and b)")
//!     .map(|t| t.unwrap().kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Not,
//!         TokenKind::LParen,
//!         TokenKind::Identifier,
//!         TokenKind::And,
//!         TokenKind::Identifier,
//!         TokenKind::RParen,
//!     ]
//! );
//! ```

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::error::LexError;

/// Shared, immutable name of an identifier.
pub type Name = Arc<str>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    LParen,
    RParen,
    Identifier,
    And,
    Or,
    Not,
    Implies,
    Equals,
}

/// Reserved words, matched exactly (case-sensitive).
const KEYWORDS: [(&str, TokenKind); 5] = [
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("implies", TokenKind::Implies),
    ("equals", TokenKind::Equals),
];

impl TokenKind {
    /// Classify a word: a reserved keyword, or an identifier otherwise.
    pub fn from_word(word: &str) -> Self {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|&(_, kind)| kind)
            .unwrap_or(TokenKind::Identifier)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Name,
    /// Byte offset of the first character of the lexeme.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<Name>, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }

    /// Byte offset just past the end of the lexeme.
    pub fn end(&self) -> usize {
        self.offset + self.lexeme.len()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", self.lexeme)
    }
}

/// Lazy token stream over a borrowed input string.
///
/// Holds nothing besides the input and the current position,
/// so every call to [`tokenize`] starts from scratch.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Length of the whole input, i.e. the offset of the end of input.
    pub fn end(&self) -> usize {
        self.text.len()
    }

    fn is_word_start(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    fn is_word_continue(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let skipped = rest.len() - rest.trim_start_matches([' ', '\t', '\n']).len();
        self.pos += skipped;

        let start = self.pos;
        let c = self.text[start..].chars().next()?;

        let token = match c {
            '(' => Token::new(TokenKind::LParen, "(", start),
            ')' => Token::new(TokenKind::RParen, ")", start),
            c if Self::is_word_start(c) => {
                let len = self.text[start..]
                    .find(|c: char| !Self::is_word_continue(c))
                    .unwrap_or(self.text.len() - start);
                let word = &self.text[start..start + len];
                Token::new(TokenKind::from_word(word), word, start)
            }
            c => {
                self.pos += c.len_utf8();
                return Some(Err(LexError { character: c, offset: start }));
            }
        };

        self.pos = token.end();
        Some(Ok(token))
    }
}

/// Tokenize `text` lazily.
pub fn tokenize(text: &str) -> Lexer<'_> {
    Lexer::new(text)
}

//! Recursive-descent parser.
//!
//! Grammar, from the tightest binding to the loosest:
//!
//! ```text
//! primary := IDENTIFIER | '(' expr ')'
//! unary   := 'not' unary | primary
//! and_or  := unary (('and' | 'or') unary)*
//! expr    := and_or (('implies' | 'equals') and_or)*
//! ```
//!
//! `and` and `or` share one precedence level, as do `implies` and `equals`;
//! both levels are left-associative, so `A implies B equals C` groups as
//! `(A implies B) equals C`.
//!
//! Nesting through `not` and parentheses is limited to
//! [`DEFAULT_MAX_DEPTH`] levels (see [`Parser::with_max_depth`]); deeper input
//! is rejected with [`ParseError::Depth`] instead of exhausting the stack.
//!
//! A [`Parser`] is consumed by [`Parser::parse`], so nothing (partial trees,
//! collected identifiers) can outlive a single parse.

use std::iter::Peekable;

use log::debug;

use crate::ast::{Ast, Expr, ExprArena, Idx};
use crate::error::{DepthError, Found, LexError, ParseError, SyntaxError};
use crate::token::{tokenize, Name, Token, TokenKind};

const EXPECTED_OPERAND: &str = "an identifier, `not` or `(`";
const EXPECTED_RPAREN: &str = "`)`";
const EXPECTED_OPERATOR: &str = "an operator or end of input";

/// Default limit on nested `not`s and parentheses.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub struct Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    tokens: Peekable<I>,
    /// Offset reported for errors at the end of input.
    end: usize,
    arena: ExprArena,
    identifiers: Vec<Name>,
    depth: usize,
    max_depth: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    pub fn new(tokens: I, end: usize) -> Self {
        Self {
            tokens: tokens.peekable(),
            end,
            arena: ExprArena::new(),
            identifiers: Vec::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a complete expression, returning it along with its identifiers
    /// in order of first occurrence.
    pub fn parse(mut self) -> Result<(Ast, Vec<Name>), ParseError> {
        let root = self.expr()?;
        if let Some(token) = self.next()? {
            return Err(self.unexpected(Some(token), EXPECTED_OPERATOR));
        }
        Ok((Ast::new(self.arena, root), self.identifiers))
    }

    fn peek_kind(&mut self) -> Result<Option<TokenKind>, ParseError> {
        match self.tokens.peek() {
            Some(Ok(token)) => Ok(Some(token.kind)),
            Some(Err(e)) => Err(e.clone().into()),
            None => Ok(None),
        }
    }

    fn next(&mut self) -> Result<Option<Token>, ParseError> {
        self.tokens.next().transpose().map_err(ParseError::from)
    }

    /// Consume the next token if it has one of the given kinds.
    fn eat(&mut self, kinds: &[TokenKind]) -> Result<Option<Token>, ParseError> {
        match self.peek_kind()? {
            Some(kind) if kinds.contains(&kind) => self.next(),
            _ => Ok(None),
        }
    }

    /// Run `f` one nesting level deeper; `offset` locates the opening token.
    fn nested(&mut self, offset: usize, f: fn(&mut Self) -> Result<Idx, ParseError>) -> Result<Idx, ParseError> {
        if self.depth >= self.max_depth {
            return Err(DepthError {
                offset,
                limit: self.max_depth,
            }
            .into());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self, token: Option<Token>, expected: &'static str) -> ParseError {
        let (found, offset) = match token {
            Some(token) => {
                let offset = token.offset;
                (Found::Token(token), offset)
            }
            None => (Found::EndOfInput, self.end),
        };
        SyntaxError { found, offset, expected }.into()
    }

    fn expr(&mut self) -> Result<Idx, ParseError> {
        let mut lhs = self.and_or()?;
        while let Some(op) = self.eat(&[TokenKind::Implies, TokenKind::Equals])? {
            let rhs = self.and_or()?;
            lhs = match op.kind {
                TokenKind::Implies => self.arena.intern(Expr::Implies(lhs, rhs)),
                _ => self.arena.intern(Expr::Equals(lhs, rhs)),
            };
        }
        Ok(lhs)
    }

    fn and_or(&mut self) -> Result<Idx, ParseError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.eat(&[TokenKind::And, TokenKind::Or])? {
            let rhs = self.unary()?;
            lhs = match op.kind {
                TokenKind::And => self.arena.intern(Expr::And(lhs, rhs)),
                _ => self.arena.intern(Expr::Or(lhs, rhs)),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Idx, ParseError> {
        if let Some(not) = self.eat(&[TokenKind::Not])? {
            let inner = self.nested(not.offset, Self::unary)?;
            return Ok(self.arena.intern(Expr::Not(inner)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Idx, ParseError> {
        match self.next()? {
            Some(token) if token.kind == TokenKind::Identifier => {
                if !self.identifiers.contains(&token.lexeme) {
                    self.identifiers.push(token.lexeme.clone());
                }
                Ok(self.arena.intern(Expr::Identifier(token.lexeme)))
            }
            Some(token) if token.kind == TokenKind::LParen => {
                let inner = self.nested(token.offset, Self::expr)?;
                match self.next()? {
                    Some(token) if token.kind == TokenKind::RParen => {
                        Ok(self.arena.intern(Expr::Paren(inner)))
                    }
                    other => Err(self.unexpected(other, EXPECTED_RPAREN)),
                }
            }
            other => Err(self.unexpected(other, EXPECTED_OPERAND)),
        }
    }
}

/// Parse an expression from source text.
pub fn parse(text: &str) -> Result<(Ast, Vec<Name>), ParseError> {
    let lexer = tokenize(text);
    let end = lexer.end();
    let result = Parser::new(lexer, end).parse();
    match &result {
        Ok((ast, identifiers)) => debug!("parse({:?}) = {} with identifiers {:?}", text, ast, identifiers),
        Err(e) => debug!("parse({:?}) failed: {}", text, e),
    }
    result
}

/// Parse an expression from an already lexed token sequence.
///
/// End of input is reported at the end of the last token.
pub fn parse_tokens<T>(tokens: T) -> Result<(Ast, Vec<Name>), ParseError>
where
    T: IntoIterator<Item = Token>,
{
    let tokens: Vec<Token> = tokens.into_iter().collect();
    let end = tokens.last().map_or(0, Token::end);
    Parser::new(tokens.into_iter().map(Ok), end).parse()
}

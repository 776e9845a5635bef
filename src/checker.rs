//! Configurable front door: text in, truth table (or one error) out.

use log::{debug, warn};

use crate::error::Error;
use crate::parser::{Parser, DEFAULT_MAX_DEPTH};
use crate::table::{TruthTable, TruthTableBuilder, DEFAULT_MAX_IDENTIFIERS};
use crate::token::tokenize;

/// What to do with a character that does not start any token.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LexPolicy {
    /// Fail the whole expression.
    #[default]
    Abort,
    /// Warn, drop the character and keep lexing.
    Skip,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    /// Expressions with more identifiers are rejected before enumeration.
    pub max_identifiers: usize,
    /// Expressions nested deeper (through `not` and parentheses) are rejected while parsing.
    pub max_depth: usize,
    pub lex_policy: LexPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_identifiers: DEFAULT_MAX_IDENTIFIERS,
            max_depth: DEFAULT_MAX_DEPTH,
            lex_policy: LexPolicy::Abort,
        }
    }
}

impl Config {
    pub fn with_max_identifiers(mut self, max_identifiers: usize) -> Self {
        self.max_identifiers = max_identifiers;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_lex_policy(mut self, lex_policy: LexPolicy) -> Self {
        self.lex_policy = lex_policy;
        self
    }
}

/// Parses expressions and builds their truth tables.
///
/// Holds only configuration: every call to [`check`][Checker::check] starts
/// from a clean slate.
#[derive(Debug, Clone)]
pub struct Checker {
    lex_policy: LexPolicy,
    max_depth: usize,
    builder: TruthTableBuilder,
}

impl Checker {
    /// # Panics
    ///
    /// Panics if `config.max_identifiers >= 64`.
    pub fn new(config: Config) -> Self {
        Self {
            lex_policy: config.lex_policy,
            max_depth: config.max_depth,
            builder: TruthTableBuilder::new(config.max_identifiers),
        }
    }

    pub fn check(&self, text: &str) -> Result<TruthTable, Error> {
        let skip = self.lex_policy == LexPolicy::Skip;
        let tokens = tokenize(text).filter(|item| match item {
            Err(e) if skip => {
                warn!("Skipping {}", e);
                false
            }
            _ => true,
        });
        let (ast, identifiers) = Parser::new(tokens, text.len())
            .with_max_depth(self.max_depth)
            .parse()?;
        let table = self.builder.build(&ast, &identifiers)?;
        debug!("check({:?}): valid = {}", text, table.is_valid());
        Ok(table)
    }
}

impl Default for Checker {
    fn default() -> Self {
        Checker::new(Config::default())
    }
}

/// Build the truth table of `text` with the default configuration.
pub fn run(text: &str) -> Result<TruthTable, Error> {
    Checker::default().check(text)
}

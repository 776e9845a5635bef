//! # whopper: tautology checking by truth tables
//!
//! **`whopper`** parses propositional-logic expressions written with the keywords
//! `not`, `and`, `or`, `implies` and `equals`, and decides whether an expression is
//! a **tautology** (true under every assignment to its identifiers) by enumerating
//! all assignments.
//! Along the way it builds a truth table that shows the value of every distinct
//! subexpression.
//!
//! ## Grammar
//!
//! From the tightest binding to the loosest:
//!
//! - identifiers `[A-Za-z_][A-Za-z0-9_]*` and parenthesised expressions,
//! - prefix `not`,
//! - `and` / `or` (same level, left-associative),
//! - `implies` / `equals` (same level, left-associative).
//!
//! Keywords are lowercase and case-sensitive: `And` is an identifier.
//!
//! ## Basic Usage
//!
//! ```rust
//! // 1. Build the truth table
//! let table = whopper::run("A implies (B implies A)").unwrap();
//!
//! // 2. Identifier columns come first, the whole expression comes last
//! assert_eq!(table.header()[..2], ["A", "B"]);
//! assert_eq!(table.header().last().unwrap(), "A implies (B implies A)");
//!
//! // 3. Rows count in binary, with the first identifier as the most significant bit
//! assert_eq!(table.rows().len(), 4);
//! assert_eq!(table.rows()[1][..2], [false, true]);
//!
//! // 4. Check the verdict
//! assert!(table.is_valid());
//! assert!(!whopper::run("A equals B").unwrap().is_valid());
//! ```
//!
//! ## Core Components
//!
//! - **[`token`]**: the lexer.
//! - **[`parser`]**: recursive-descent parser producing an [`Ast`][crate::ast::Ast]
//!   and the identifiers in order of first occurrence.
//! - **[`ast`]**: hash-consed expression arena; a node index is a subexpression's identity.
//! - **[`eval`]** and **[`cache`]**: post-order evaluation with a per-row memo.
//! - **[`enumerate`]**: all `2^n` assignments in canonical order.
//! - **[`table`]**: truth-table assembly and the validity check.
//! - **[`checker`]**: configuration ([`Config`]) and the [`run`] entry point.
//! - **[`report`]**: plain-text rendering of tables and error positions.

pub mod ast;
pub mod cache;
pub mod checker;
pub mod enumerate;
pub mod error;
pub mod eval;
pub mod parser;
pub mod report;
pub mod table;
pub mod token;

pub use checker::{run, Checker, Config, LexPolicy};
pub use error::Error;
pub use parser::parse;
pub use token::tokenize;

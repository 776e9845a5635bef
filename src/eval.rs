//! Evaluation of an [`Ast`] under one truth assignment.
//!
//! Evaluation is post-order and eager: both operands of a binary connective
//! are always evaluated, so every row visits the same set of nodes.
//! Each node's value is recorded in the row's [`RowCache`] the first time it
//! is computed; a node reached again in the same row is answered from the
//! cache and is not recorded twice. [`Paren`][Expr::Paren] nodes are
//! transparent and never recorded.

use std::collections::HashMap;

use log::trace;

use crate::ast::{Ast, Expr, Idx};
use crate::cache::RowCache;
use crate::error::Error;
use crate::token::Name;

/// Truth values of the identifiers.
pub type Assignment = HashMap<Name, bool>;

/// Zip identifiers with their values.
pub fn assignment(identifiers: &[Name], values: &[bool]) -> Assignment {
    debug_assert_eq!(identifiers.len(), values.len());
    identifiers.iter().cloned().zip(values.iter().copied()).collect()
}

/// Evaluate the subtree rooted at `root`, filling `cache` along the way.
///
/// The walk uses an explicit stack, so arbitrarily long operator chains do not
/// grow the call stack. `cache` must belong to the current row only.
pub fn evaluate(ast: &Ast, root: Idx, assignment: &Assignment, cache: &mut RowCache) -> Result<bool, Error> {
    // `(node, true)`: the operands of `node` are already in the cache.
    let mut stack = vec![(root, false)];

    while let Some((node, expanded)) = stack.pop() {
        let expr = ast.get(node);
        if let Expr::Paren(inner) = expr {
            stack.push((*inner, false));
            continue;
        }

        if !expanded {
            if let Some(value) = cache.get(node) {
                trace!("evaluate({}) = {} (cached)", node, value);
                continue;
            }
            match *expr {
                Expr::Identifier(ref name) => {
                    let value = *assignment
                        .get(name)
                        .ok_or_else(|| Error::MissingBinding { name: name.clone() })?;
                    trace!("evaluate({}) = {}", node, value);
                    cache.insert(node, value);
                }
                Expr::Not(a) => {
                    stack.push((node, true));
                    stack.push((a, false));
                }
                Expr::And(a, b) | Expr::Or(a, b) | Expr::Implies(a, b) | Expr::Equals(a, b) => {
                    // Left operand on top: it is evaluated first.
                    stack.push((node, true));
                    stack.push((b, false));
                    stack.push((a, false));
                }
                Expr::Paren(_) => unreachable!("parentheses are handled above"),
            }
            continue;
        }

        let operand = |child: Idx| value_of(ast, cache, child);
        let value = match *expr {
            Expr::Not(a) => !operand(a),
            Expr::And(a, b) => operand(a) && operand(b),
            Expr::Or(a, b) => operand(a) || operand(b),
            Expr::Implies(a, b) => !operand(a) || operand(b),
            Expr::Equals(a, b) => operand(a) == operand(b),
            Expr::Identifier(_) | Expr::Paren(_) => unreachable!("{} has no operands", node),
        };
        trace!("evaluate({}) = {}", node, value);
        cache.insert(node, value);
    }

    Ok(value_of(ast, cache, root))
}

/// Value of an already evaluated node, looking through parentheses.
fn value_of(ast: &Ast, cache: &RowCache, mut node: Idx) -> bool {
    while let Expr::Paren(inner) = ast.get(node) {
        node = *inner;
    }
    cache
        .peek(node)
        .unwrap_or_else(|| unreachable!("{} is evaluated before its parent", node))
}

impl Ast {
    /// Evaluate the whole expression with a fresh row cache.
    ///
    /// Returns the value of the root together with the filled cache.
    pub fn evaluate_row(&self, assignment: &Assignment) -> Result<(bool, RowCache), Error> {
        let mut cache = RowCache::new();
        let value = evaluate(self, self.root(), assignment, &mut cache)?;
        Ok((value, cache))
    }
}

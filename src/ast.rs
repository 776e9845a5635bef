//! Abstract syntax tree for propositional expressions.
//!
//! Nodes live in an [`ExprArena`] and refer to their children by [`Idx`].
//! The arena is hash-consed: interning a node that is structurally equal to an
//! existing one returns the existing index. Hence an `Idx` is the *identity* of
//! a subexpression, and two syntactically identical pieces of source text share
//! one identity.
//!
//! Nodes are stored bottom-up (children before parents, by construction),
//! which lets [`ExprArena::fold`] collapse a tree in a single forward pass.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use log::trace;

use crate::token::Name;

/// Identity of a node inside an [`ExprArena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Idx(usize);

impl Display for Idx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr<I = Idx> {
    Identifier(Name),
    Not(I),
    And(I, I),
    Or(I, I),
    Implies(I, I),
    Equals(I, I),
    /// Explicit parentheses in the source. Transparent for evaluation.
    Paren(I),
}

impl<A> Expr<A> {
    #[inline(always)]
    pub fn fmap<B, F>(self, mut f: F) -> Expr<B>
    where
        F: FnMut(A) -> B,
    {
        match self {
            Expr::Identifier(name) => Expr::Identifier(name),
            Expr::Not(a) => Expr::Not(f(a)),
            Expr::And(a, b) => Expr::And(f(a), f(b)),
            Expr::Or(a, b) => Expr::Or(f(a), f(b)),
            Expr::Implies(a, b) => Expr::Implies(f(a), f(b)),
            Expr::Equals(a, b) => Expr::Equals(f(a), f(b)),
            Expr::Paren(a) => Expr::Paren(f(a)),
        }
    }

    #[inline(always)]
    pub fn fmap_ref<B, F>(&self, mut f: F) -> Expr<B>
    where
        F: FnMut(&A) -> B,
    {
        match self {
            Expr::Identifier(name) => Expr::Identifier(name.clone()),
            Expr::Not(a) => Expr::Not(f(a)),
            Expr::And(a, b) => Expr::And(f(a), f(b)),
            Expr::Or(a, b) => Expr::Or(f(a), f(b)),
            Expr::Implies(a, b) => Expr::Implies(f(a), f(b)),
            Expr::Equals(a, b) => Expr::Equals(f(a), f(b)),
            Expr::Paren(a) => Expr::Paren(f(a)),
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, Expr::Identifier(_))
    }

    pub fn is_paren(&self) -> bool {
        matches!(self, Expr::Paren(_))
    }
}

#[derive(Debug, Default)]
pub struct ExprArena {
    /// Topologically sorted expressions (children first), by construction.
    exprs: Vec<Expr>,
    /// Unique table: structure -> identity.
    unique: HashMap<Expr, Idx>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn get(&self, idx: Idx) -> &Expr {
        &self.exprs[idx.0]
    }

    /// Intern a node whose children are already in this arena.
    ///
    /// Returns the index of an existing structurally equal node, if any.
    pub fn intern(&mut self, expr: Expr) -> Idx {
        if let Some(&idx) = self.unique.get(&expr) {
            trace!("intern: {:?} => existing {}", expr, idx);
            return idx;
        }
        let idx = Idx(self.exprs.len());
        trace!("intern: {:?} => new {}", expr, idx);
        self.exprs.push(expr.clone());
        self.unique.insert(expr, idx);
        idx
    }

    /// Fold the subtree rooted at `root` bottom-up.
    ///
    /// Every node reachable from `root` is collapsed exactly once, shared
    /// nodes included; their results are cloned into each parent.
    pub fn fold<R, F>(&self, root: Idx, mut collapse: F) -> R
    where
        R: Clone,
        F: FnMut(Expr<R>) -> R,
    {
        let mut results: Vec<Option<R>> = std::iter::repeat_with(|| None)
            .take(root.0 + 1)
            .collect();

        // Mark reachable nodes, so unrelated nodes are not collapsed.
        let mut reachable = vec![false; root.0 + 1];
        reachable[root.0] = true;
        for i in (0..=root.0).rev() {
            if reachable[i] {
                self.exprs[i].fmap_ref(|child| reachable[child.0] = true);
            }
        }

        for i in 0..=root.0 {
            if !reachable[i] {
                continue;
            }
            let expr = self.exprs[i].fmap_ref(|child| {
                results[child.0]
                    .clone()
                    .unwrap_or_else(|| unreachable!("child {} is collapsed before its parent", child))
            });
            results[i] = Some(collapse(expr));
        }

        results
            .pop()
            .flatten()
            .unwrap_or_else(|| unreachable!("root {} is always reachable", root))
    }

    /// Pretty-print the subtree rooted at `idx`.
    ///
    /// Operators are written as their keywords, and parentheses appear only
    /// where the source had them.
    pub fn render(&self, idx: Idx) -> String {
        self.fold(idx, |expr| match expr {
            Expr::Identifier(name) => name.to_string(),
            Expr::Not(a) => format!("not {}", a),
            Expr::And(a, b) => format!("{} and {}", a, b),
            Expr::Or(a, b) => format!("{} or {}", a, b),
            Expr::Implies(a, b) => format!("{} implies {}", a, b),
            Expr::Equals(a, b) => format!("{} equals {}", a, b),
            Expr::Paren(a) => format!("({})", a),
        })
    }
}

/// A parsed expression: the arena plus the index of its root node.
#[derive(Debug)]
pub struct Ast {
    arena: ExprArena,
    root: Idx,
}

impl Ast {
    pub fn new(arena: ExprArena, root: Idx) -> Self {
        assert!(root.0 < arena.len(), "Root {} is outside of the arena", root);
        Self { arena, root }
    }

    pub fn root(&self) -> Idx {
        self.root
    }

    pub fn get(&self, idx: Idx) -> &Expr {
        self.arena.get(idx)
    }

    pub fn render(&self, idx: Idx) -> String {
        self.arena.render(idx)
    }
}

impl Display for Ast {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.arena.render(self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn ident(arena: &mut ExprArena, name: &str) -> Idx {
        arena.intern(Expr::Identifier(name.into()))
    }

    #[test]
    fn test_intern_shares_identical_nodes() {
        let mut arena = ExprArena::new();
        let a1 = ident(&mut arena, "A");
        let a2 = ident(&mut arena, "A");
        let b = ident(&mut arena, "B");
        assert_eq!(a1, a2);
        assert_ne!(a1, b);

        let and1 = arena.intern(Expr::And(a1, b));
        let and2 = arena.intern(Expr::And(a2, b));
        let and3 = arena.intern(Expr::And(b, a1));
        assert_eq!(and1, and2);
        assert_ne!(and1, and3);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_render_keeps_source_parens() {
        let mut arena = ExprArena::new();
        let a = ident(&mut arena, "A");
        let b = ident(&mut arena, "B");
        let c = ident(&mut arena, "C");
        let and = arena.intern(Expr::And(a, b));
        let paren = arena.intern(Expr::Paren(and));
        let not = arena.intern(Expr::Not(paren));
        let root = arena.intern(Expr::Implies(not, c));
        assert_eq!(arena.render(root), "not (A and B) implies C");
        assert_eq!(arena.render(and), "A and B");
    }

    #[test]
    fn test_render_without_parens() {
        let mut arena = ExprArena::new();
        let a = ident(&mut arena, "A");
        let b = ident(&mut arena, "B");
        let or = arena.intern(Expr::Or(a, b));
        let root = arena.intern(Expr::Equals(or, a));
        assert_eq!(arena.render(root), "A or B equals A");
    }

    #[test]
    fn test_fold_skips_unreachable_nodes() {
        let mut arena = ExprArena::new();
        let a = ident(&mut arena, "A");
        let _unrelated = ident(&mut arena, "Z");
        let not = arena.intern(Expr::Not(a));
        let root = arena.intern(Expr::Or(a, not));

        let mut visited = 0;
        let size = arena.fold(root, |expr| {
            visited += 1;
            match expr {
                Expr::Identifier(_) => 1,
                Expr::Not(a) | Expr::Paren(a) => a + 1,
                Expr::And(a, b)
                | Expr::Or(a, b)
                | Expr::Implies(a, b)
                | Expr::Equals(a, b) => a + b + 1,
            }
        });
        // Tree size counts the shared `A` twice, but it is collapsed once.
        assert_eq!(size, 4);
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_fmap() {
        let expr: Expr<u32> = Expr::Implies(1, 2);
        assert_eq!(expr.fmap(|x| x * 10), Expr::Implies(10, 20));
        let expr: Expr<u32> = Expr::Identifier("x".into());
        assert_eq!(expr.fmap_ref(|x| *x + 1), Expr::<u32>::Identifier("x".into()));
    }

    #[test]
    fn test_ast_display() {
        let mut arena = ExprArena::new();
        let a = ident(&mut arena, "A");
        let root = arena.intern(Expr::Not(a));
        let ast = Ast::new(arena, root);
        assert_eq!(ast.to_string(), "not A");
        assert!(ast.get(a).is_identifier());
    }
}

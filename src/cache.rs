use std::cell::Cell;
use std::collections::HashMap;

use crate::ast::Idx;

/// Memo of subexpression values for a single truth-table row.
///
/// Entries are kept in the order they were first inserted, which, for a
/// post-order evaluation, is the order subexpressions are discovered.
/// A fresh cache must be used for every row.
#[derive(Debug, Default)]
pub struct RowCache {
    values: HashMap<Idx, bool>,
    order: Vec<Idx>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up a cached value, counting the hit or miss.
    pub fn get(&self, node: Idx) -> Option<bool> {
        match self.values.get(&node) {
            Some(&value) => {
                self.hits.set(self.hits.get() + 1);
                Some(value)
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Look up a cached value without touching the statistics.
    pub fn peek(&self, node: Idx) -> Option<bool> {
        self.values.get(&node).copied()
    }

    /// Record the value of a node.
    ///
    /// A node that is already present keeps its value and its position.
    pub fn insert(&mut self, node: Idx, value: bool) {
        if self.values.insert(node, value).is_none() {
            self.order.push(node);
        } else {
            debug_assert_eq!(self.values[&node], value, "Node {} changed its value", node);
        }
    }

    /// Cached nodes in discovery order.
    pub fn order(&self) -> &[Idx] {
        &self.order
    }

    /// Cached `(node, value)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (Idx, bool)> + '_ {
        self.order.iter().map(|&node| (node, self.values[&node]))
    }
}

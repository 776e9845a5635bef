//! Truth-table assembly and the validity check.
//!
//! A table has one column per identifier, then one column per distinct
//! subexpression (in the order the first row discovers them, post-order),
//! then the value of the whole expression. Identifier nodes are not repeated
//! as subexpression columns. The root is both the last subexpression column
//! and the final column.

use log::{debug, trace};

use crate::ast::{Ast, Idx};
use crate::cache::RowCache;
use crate::enumerate::assignments;
use crate::error::Error;
use crate::eval::assignment;
use crate::token::Name;

/// Default limit on the number of identifiers, i.e. at most `2^24` rows.
pub const DEFAULT_MAX_IDENTIFIERS: usize = 24;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TruthTable {
    header: Vec<String>,
    rows: Vec<Vec<bool>>,
    identifiers: usize,
}

impl TruthTable {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Number of leading identifier columns.
    pub fn identifier_count(&self) -> usize {
        self.identifiers
    }

    /// Values of the whole expression, one per row.
    pub fn results(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows.iter().filter_map(|row| row.last().copied())
    }

    /// Whether the expression is a tautology.
    pub fn is_valid(&self) -> bool {
        is_valid(&self.rows)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<bool>>) {
        (self.header, self.rows)
    }
}

/// A set of rows is valid when the last column is `true` in every row.
pub fn is_valid(rows: &[Vec<bool>]) -> bool {
    rows.iter().all(|row| row.last().copied().unwrap_or(true))
}

#[derive(Debug, Clone)]
pub struct TruthTableBuilder {
    max_identifiers: usize,
}

impl TruthTableBuilder {
    /// # Panics
    ///
    /// Panics if `max_identifiers >= 64`.
    pub fn new(max_identifiers: usize) -> Self {
        assert!(
            max_identifiers < 64,
            "Identifier limit should be in the range 0..64"
        );
        Self { max_identifiers }
    }

    /// Evaluate `ast` under every assignment to `identifiers`.
    ///
    /// `identifiers` must be the list produced by parsing `ast`.
    pub fn build(&self, ast: &Ast, identifiers: &[Name]) -> Result<TruthTable, Error> {
        if identifiers.len() > self.max_identifiers {
            return Err(Error::TooManyIdentifiers {
                count: identifiers.len(),
                limit: self.max_identifiers,
            });
        }

        let mut columns: Option<Vec<Idx>> = None;
        let mut rows = Vec::new();

        for (index, values) in assignments(identifiers.len()).enumerate() {
            let (value, cache) = ast.evaluate_row(&assignment(identifiers, &values))?;
            trace!(
                "row {}: {:?} => {} (cache: {} hits, {} misses)",
                index,
                values,
                value,
                cache.hits(),
                cache.misses()
            );

            // The first row fixes the subexpression columns for the whole table.
            let discovered = subexpressions(ast, &cache);
            let known = columns.get_or_insert_with(|| discovered.clone());
            if let Some(node) = discovered.iter().copied().find(|node| !known.contains(node)) {
                return Err(Error::InternalInconsistency {
                    row: index,
                    subexpression: ast.render(node),
                });
            }

            let mut row = values;
            for &node in known.iter() {
                let cached = cache.peek(node).ok_or_else(|| Error::InternalInconsistency {
                    row: index,
                    subexpression: ast.render(node),
                })?;
                row.push(cached);
            }
            row.push(value);
            rows.push(row);
        }

        let columns = columns.unwrap_or_default();
        let header = identifiers
            .iter()
            .map(|name| name.to_string())
            .chain(columns.iter().map(|&node| ast.render(node)))
            .chain(std::iter::once(ast.to_string()))
            .collect();

        let table = TruthTable {
            header,
            rows,
            identifiers: identifiers.len(),
        };
        debug!(
            "build({}) = {} rows x {} columns, valid = {}",
            ast,
            table.rows.len(),
            table.header.len(),
            table.is_valid()
        );
        Ok(table)
    }
}

impl Default for TruthTableBuilder {
    fn default() -> Self {
        TruthTableBuilder::new(DEFAULT_MAX_IDENTIFIERS)
    }
}

/// Subexpression nodes of one row, in discovery order, without identifiers.
fn subexpressions(ast: &Ast, cache: &RowCache) -> Vec<Idx> {
    cache
        .order()
        .iter()
        .copied()
        .filter(|&node| !ast.get(node).is_identifier())
        .collect()
}

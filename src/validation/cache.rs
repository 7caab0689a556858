//! Parse-once cache for expression text.

use crate::error::ValidationError;
use crate::syntax::Expr;
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

/// Concurrent map from expression text to its parsed AST.
///
/// Only successful parses are stored; text that fails to lex or parse is
/// re-parsed (and fails again) on every lookup. Entries are never evicted, so
/// a long-lived cache grows with every distinct expression it sees until
/// [`ExpressionCache::clear`] is called.
#[derive(Debug, Default)]
pub struct ExpressionCache {
    entries: DashMap<String, Arc<Expr>>,
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached AST for `expression`, parsing it on first use
    pub fn get_or_parse(&self, expression: &str) -> Result<Arc<Expr>, ValidationError> {
        if let Some(entry) = self.entries.get(expression) {
            debug!("Expression cache hit: {}", expression);
            return Ok(Arc::clone(entry.value()));
        }

        // Concurrent misses may parse twice; both results are identical
        let expr = Arc::new(crate::parse(expression)?);
        self.entries.insert(expression.to_string(), Arc::clone(&expr));
        Ok(expr)
    }

    pub fn contains(&self, expression: &str) -> bool {
        self.entries.contains_key(expression)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

//! `Lookup` smart constructor: indexed read into a literal table.
//!
//! `Lookup` has no rewrite rules beyond one clear simplification:
//! projecting a constant in-range index directly to its table entry,
//! mirroring the numeric-evaluation shortcuts `Floor`/`Ceil` take.

use std::sync::Arc;

use crate::expr::{Expr, raw};

/// Build a read of `table[index]`.
#[must_use]
pub fn lookup(table: Vec<Arc<Expr>>, index: Arc<Expr>) -> Arc<Expr> {
    if let Some(i) = index.as_const() {
        if let Ok(idx) = usize::try_from(i) {
            if let Some(value) = table.get(idx) {
                return Arc::clone(value);
            }
        }
    }
    raw::lookup(table, index)
}

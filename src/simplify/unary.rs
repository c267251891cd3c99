//! `Floor`, `Ceil`, `Abs` smart constructors.

use std::sync::Arc;

use crate::expr::sign;
use crate::expr::{Expr, raw};
use crate::range::Sign;

/// `floor(e)`.
#[must_use]
pub fn floor(e: Arc<Expr>) -> Arc<Expr> {
    close_to_const(&e).unwrap_or_else(|| raw::floor(e))
}

/// `ceil(e)`.
#[must_use]
pub fn ceil(e: Arc<Expr>) -> Arc<Expr> {
    close_to_const(&e).unwrap_or_else(|| raw::ceil(e))
}

/// `abs(e)`.
#[must_use]
pub fn abs(e: Arc<Expr>) -> Arc<Expr> {
    if let Some(c) = e.as_const() {
        return Arc::new(Expr::constant(c.abs()));
    }
    match sign::sign(&e) {
        Sign::Positive => e,
        Sign::Negative => crate::simplify::product::product(vec![Arc::new(Expr::constant(-1)), e]),
        Sign::Unknown => raw::abs(e),
    }
}

/// Shared numeric-evaluation / bound-collapse path for `Floor`/`Ceil`:
/// every value in this kernel is already an integer, so both
/// simplify to the same constant whenever one can be derived.
fn close_to_const(e: &Arc<Expr>) -> Option<Arc<Expr>> {
    if let Some(c) = e.as_const() {
        return Some(Arc::new(Expr::constant(c)));
    }
    if let Ok(v) = crate::eval::eval(e) {
        return Some(Arc::new(Expr::constant(v)));
    }
    let (mn, mx) = (sign::min(e), sign::max(e));
    if let (Some(a), Some(b)) = (mn.as_const(), mx.as_const()) {
        if a == b {
            return Some(Arc::new(Expr::constant(a)));
        }
    }
    None
}

//! `Pow` smart constructor.

use std::sync::Arc;

use crate::expr::sign;
use crate::expr::{Expr, ExprKind, raw};
use crate::range::Sign;

/// Build `base ^ exponent`, applying trivial-power elision, nested-power
/// folding, constant folding, and distribution over a product base with
/// a constant integer exponent.
///
/// Negative exponents are retained symbolically: `Pow(base, Const(-1))`
/// is how the kernel represents division by `base` inside a `Prod`.
#[must_use]
pub fn pow(base: Arc<Expr>, exp: Arc<Expr>) -> Arc<Expr> {
    if exp.is_zero() {
        return Arc::new(Expr::constant(1));
    }
    if exp.is_one() {
        return base;
    }
    if base.is_one() {
        return Arc::new(Expr::constant(1));
    }
    if base.is_zero() {
        let exponent_is_positive = exp.as_const().is_some_and(|n| n > 0)
            || (exp.as_const().is_none() && sign::sign(&exp) == Sign::Positive);
        if exponent_is_positive {
            return Arc::new(Expr::constant(0));
        }
    }

    if let ExprKind::Pow(inner_base, inner_exp) = base.kind() {
        let new_exp = crate::simplify::product::product(vec![Arc::clone(inner_exp), Arc::clone(&exp)]);
        return pow(Arc::clone(inner_base), new_exp);
    }

    if let (Some(b), Some(e)) = (base.as_const(), exp.as_const()) {
        if let Some(folded) = const_pow(b, e) {
            return Arc::new(Expr::constant(folded));
        }
    }

    if let ExprKind::Prod(factors) = base.kind() {
        if exp.as_const().is_some() {
            let distributed = factors.iter().map(|f| pow(Arc::clone(f), Arc::clone(&exp))).collect();
            return crate::simplify::product::product(distributed);
        }
    }

    raw::pow(base, exp)
}

fn const_pow(b: i64, e: i64) -> Option<i64> {
    if e >= 0 {
        u32::try_from(e).ok().and_then(|e| b.checked_pow(e))
    } else {
        match b {
            1 => Some(1),
            -1 => Some(if e % 2 == 0 { 1 } else { -1 }),
            _ => None,
        }
    }
}

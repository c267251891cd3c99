//! `isSmaller(a, b)`: a sound, three-valued "is `a` always less than
//! `b`?" decision procedure.

use std::sync::Arc;

use super::traverse::{self, substitute};
use crate::eval::eval;
use crate::expr::sign;
use crate::expr::{Expr, ExprKind};

/// Returns `Some(true)`/`Some(false)` when decidable, `None` when not.
/// Never returns `Some(true)` unless every closed instantiation of both
/// sides satisfies the inequality.
#[must_use]
pub fn is_smaller(a: &Arc<Expr>, b: &Arc<Expr>) -> Option<bool> {
    if matches!(a.kind(), ExprKind::Unknown) || matches!(b.kind(), ExprKind::Unknown) {
        return None;
    }
    if matches!(a.kind(), ExprKind::NegInf) {
        return Some(!matches!(b.kind(), ExprKind::NegInf));
    }
    if matches!(b.kind(), ExprKind::PosInf) {
        return Some(!matches!(a.kind(), ExprKind::PosInf));
    }
    if matches!(a.kind(), ExprKind::PosInf) || matches!(b.kind(), ExprKind::NegInf) {
        return Some(false);
    }

    if let (Ok(av), Ok(bv)) = (eval(a), eval(b)) {
        return Some(av < bv);
    }

    if let (Some(amax), Some(bmin)) = (sign::max(a).as_const(), sign::min(b).as_const()) {
        if amax < bmin {
            return Some(true);
        }
    }

    if let Some(decided) = pattern_catalogue(a, b) {
        return Some(decided);
    }

    let shared: Vec<u64> = traverse::var_ids(a)
        .into_iter()
        .filter(|id| traverse::var_ids(b).contains(id))
        .collect();
    if shared.is_empty() {
        return None;
    }

    let freeze = |e: &Arc<Expr>| -> Option<Arc<Expr>> {
        substitute(e, &mut |n| match n.kind() {
            ExprKind::Var(v) if shared.contains(&v.id) => Some(Arc::new(Expr::opaque_var(Arc::clone(n)))),
            _ => None,
        })
        .ok()
    };
    let (a_frozen, b_frozen) = (freeze(a)?, freeze(b)?);
    let (amax, bmin) = (sign::max(&a_frozen).as_const(), sign::min(&b_frozen).as_const());
    match (amax, bmin) {
        (Some(amax), Some(bmin)) => Some(amax < bmin),
        _ => None,
    }
}

/// A small catalogue of structural shapes with a known answer:
/// `v/k < v` for `k > 1`, `v > 0`, and `Mod(_, v) < v` for `v` provably
/// positive.
fn pattern_catalogue(a: &Arc<Expr>, b: &Arc<Expr>) -> Option<bool> {
    if let ExprKind::IntDiv(n, d) = a.kind() {
        if n == b {
            if let Some(k) = d.as_const() {
                if k > 1 && sign::sign(b) == crate::range::Sign::Positive {
                    return Some(true);
                }
            }
        }
    }
    if let ExprKind::Mod(_, divisor) = a.kind() {
        if divisor == b && sign::sign(b) == crate::range::Sign::Positive {
            return Some(true);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Range;

    #[test]
    fn constants_compare_directly() {
        let a = Arc::new(Expr::constant(3));
        let b = Arc::new(Expr::constant(5));
        assert_eq!(is_smaller(&a, &b), Some(true));
        assert_eq!(is_smaller(&b, &a), Some(false));
    }

    #[test]
    fn unrelated_symbolic_terms_are_undecidable() {
        let x = Arc::new(Expr::var("x", None));
        let y = Arc::new(Expr::var("y", None));
        assert_eq!(is_smaller(&x, &y), None);
    }

    #[test]
    fn positive_var_bounds_decide_against_smaller_constant() {
        let v = Arc::new(Expr::var(
            "n",
            Some(Arc::new(Range::StartFrom(Arc::new(Expr::constant(10))))),
        ));
        let c = Arc::new(Expr::constant(3));
        assert_eq!(is_smaller(&c, &v), Some(true));
    }

    #[test]
    fn int_div_by_constant_is_smaller_than_the_dividend() {
        let v = Arc::new(Expr::var(
            "n",
            Some(Arc::new(Range::StartFrom(Arc::new(Expr::constant(1))))),
        ));
        let k = Arc::new(Expr::constant(2));
        let div = crate::simplify::int_div::int_div(Arc::clone(&v), k)
            .expect("dividing by a nonzero constant cannot fail");
        assert_eq!(is_smaller(&div, &v), Some(true));
    }
}

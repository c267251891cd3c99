//! Sign derivation and min/max propagation.
//!
//! Both are case-wise rule tables over `ExprKind`; they fall back to
//! `Sign::Unknown` / unbounded whenever the case table doesn't cover a
//! shape, since these are decision procedures and intentionally
//! partial.

use std::sync::Arc;

use super::{Expr, ExprKind};
use crate::range::Sign;

/// Derive the sign of an expression.
#[must_use]
pub fn sign(e: &Expr) -> Sign {
    match e.kind() {
        ExprKind::Const(n) => {
            if *n > 0 {
                Sign::Positive
            } else if *n < 0 {
                Sign::Negative
            } else {
                Sign::Positive
            }
        }
        ExprKind::PosInf => Sign::Positive,
        ExprKind::NegInf => Sign::Negative,
        ExprKind::Unknown => Sign::Unknown,
        ExprKind::Var(v) => v.range.as_ref().map_or(Sign::Unknown, |r| r.sign()),
        ExprKind::OpaqueVar(inner) => sign(inner),
        ExprKind::NamedFn(d) => d.range.as_ref().map_or(Sign::Unknown, |r| r.sign()),
        ExprKind::Lookup(_) | ExprKind::Log(..) | ExprKind::IntDiv(..) => Sign::Unknown,
        ExprKind::Sum(terms) => Sign::sum_of(terms.iter().map(|t| sign(t))),
        ExprKind::Prod(factors) => {
            let mut acc = Sign::Positive;
            for f in factors {
                if f.is_zero() {
                    return Sign::Positive;
                }
                acc = acc.mul(sign(f));
            }
            acc
        }
        ExprKind::Pow(base, exp) => pow_sign(base, exp),
        ExprKind::Mod(dividend, _) => sign(dividend),
        ExprKind::Floor(inner) | ExprKind::Ceil(inner) => sign(inner),
        ExprKind::Abs(_) => Sign::Positive,
        ExprKind::IfThenElse(_, t, e2) => {
            let (st, se) = (sign(t), sign(e2));
            if st == se { st } else { Sign::Unknown }
        }
        ExprKind::BigSum(d) => sign(&d.body),
    }
}

fn pow_sign(base: &Arc<Expr>, exp: &Arc<Expr>) -> Sign {
    match exp.as_const() {
        Some(n) if n > 0 => {
            if n % 2 == 0 {
                Sign::Positive
            } else {
                sign(base)
            }
        }
        Some(0) => Sign::Positive,
        _ => Sign::Unknown,
    }
}

/// A sound, possibly-loose lower bound, or `NegInf`/`Unknown` when none
/// can be derived.
#[must_use]
pub fn min(e: &Expr) -> Arc<Expr> {
    match e.kind() {
        ExprKind::Const(_) => Arc::new(clone_expr(e)),
        ExprKind::PosInf => Arc::new(Expr::pos_inf()),
        ExprKind::NegInf => Arc::new(Expr::neg_inf()),
        ExprKind::Var(v) => v
            .range
            .as_ref()
            .and_then(crate::range::Range::min)
            .unwrap_or_else(|| Arc::new(Expr::neg_inf())),
        ExprKind::OpaqueVar(inner) => Arc::clone(inner),
        ExprKind::NamedFn(d) => d
            .range
            .as_ref()
            .and_then(crate::range::Range::min)
            .unwrap_or_else(|| Arc::new(Expr::neg_inf())),
        ExprKind::Sum(terms) => fold_const(terms.iter().map(|t| min(t)), i64::checked_add)
            .unwrap_or_else(|| Arc::new(Expr::neg_inf())),
        ExprKind::Prod(factors) => match sign(e) {
            Sign::Positive => fold_const(
                factors.iter().map(|f| corner_for_positive_product(f)),
                i64::checked_mul,
            )
            .unwrap_or_else(|| Arc::new(Expr::neg_inf())),
            _ => Arc::new(Expr::neg_inf()),
        },
        ExprKind::Mod(_, divisor) => match sign(e) {
            Sign::Positive => Arc::new(Expr::constant(0)),
            Sign::Negative => divisor
                .as_const()
                .map(|d| Arc::new(Expr::constant(-(d.abs() - 1))))
                .unwrap_or_else(|| Arc::new(Expr::neg_inf())),
            Sign::Unknown => Arc::new(Expr::neg_inf()),
        },
        ExprKind::Abs(_) => Arc::new(Expr::constant(0)),
        ExprKind::IfThenElse(_, t, e2) => {
            let (mt, me) = (min(t), min(e2));
            match (mt.as_const(), me.as_const()) {
                (Some(a), Some(b)) => Arc::new(Expr::constant(a.min(b))),
                _ => Arc::new(Expr::neg_inf()),
            }
        }
        _ => Arc::new(Expr::neg_inf()),
    }
}

/// A sound, possibly-loose upper bound, or `PosInf`/`Unknown` when none
/// can be derived.
#[must_use]
pub fn max(e: &Expr) -> Arc<Expr> {
    match e.kind() {
        ExprKind::Const(_) => Arc::new(clone_expr(e)),
        ExprKind::PosInf => Arc::new(Expr::pos_inf()),
        ExprKind::NegInf => Arc::new(Expr::neg_inf()),
        ExprKind::Var(v) => v
            .range
            .as_ref()
            .and_then(crate::range::Range::max)
            .unwrap_or_else(|| Arc::new(Expr::pos_inf())),
        ExprKind::OpaqueVar(inner) => Arc::clone(inner),
        ExprKind::NamedFn(d) => d
            .range
            .as_ref()
            .and_then(crate::range::Range::max)
            .unwrap_or_else(|| Arc::new(Expr::pos_inf())),
        ExprKind::Sum(terms) => fold_const(terms.iter().map(|t| max(t)), i64::checked_add)
            .unwrap_or_else(|| Arc::new(Expr::pos_inf())),
        ExprKind::Prod(factors) => match sign(e) {
            Sign::Positive => fold_const(
                factors.iter().map(|f| corner_for_positive_product_max(f)),
                i64::checked_mul,
            )
            .unwrap_or_else(|| Arc::new(Expr::pos_inf())),
            _ => Arc::new(Expr::pos_inf()),
        },
        ExprKind::Mod(_, divisor) => match sign(e) {
            Sign::Positive => divisor
                .as_const()
                .map(|d| Arc::new(Expr::constant(d.abs() - 1)))
                .unwrap_or_else(|| Arc::new(Expr::pos_inf())),
            Sign::Negative => Arc::new(Expr::constant(0)),
            Sign::Unknown => Arc::new(Expr::pos_inf()),
        },
        ExprKind::Abs(inner) => {
            let (mn, mx) = (min(inner), max(inner));
            match (mn.as_const(), mx.as_const()) {
                (Some(a), Some(b)) => Arc::new(Expr::constant(a.abs().max(b.abs()))),
                _ => Arc::new(Expr::pos_inf()),
            }
        }
        ExprKind::IfThenElse(_, t, e2) => {
            let (mt, me) = (max(t), max(e2));
            match (mt.as_const(), me.as_const()) {
                (Some(a), Some(b)) => Arc::new(Expr::constant(a.max(b))),
                _ => Arc::new(Expr::pos_inf()),
            }
        }
        _ => Arc::new(Expr::pos_inf()),
    }
}

fn corner_for_positive_product(f: &Arc<Expr>) -> Arc<Expr> {
    match sign(f) {
        Sign::Negative => max(f),
        _ => min(f),
    }
}

fn corner_for_positive_product_max(f: &Arc<Expr>) -> Arc<Expr> {
    match sign(f) {
        Sign::Negative => min(f),
        _ => max(f),
    }
}

fn fold_const(
    mut corners: impl Iterator<Item = Arc<Expr>>,
    op: fn(i64, i64) -> Option<i64>,
) -> Option<Arc<Expr>> {
    let first = corners.next()?.as_const()?;
    corners.try_fold(first, |acc, c| op(acc, c.as_const()?)).map(|v| Arc::new(Expr::constant(v)))
}

fn clone_expr(e: &Expr) -> Expr {
    Expr::new(e.kind().clone(), e.is_simplified())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Range;

    #[test]
    fn const_sign() {
        assert_eq!(sign(&Expr::constant(5)), Sign::Positive);
        assert_eq!(sign(&Expr::constant(-5)), Sign::Negative);
    }

    #[test]
    fn var_with_nonneg_range_is_positive() {
        let v = Expr::var(
            "n",
            Some(Arc::new(Range::StartFrom(Arc::new(Expr::constant(0))))),
        );
        assert_eq!(sign(&v), Sign::Positive);
    }

    #[test]
    fn abs_is_always_positive() {
        let v = Arc::new(Expr::var("x", None));
        let a = Expr::new(super::ExprKind::Abs(v), true);
        assert_eq!(sign(&a), Sign::Positive);
    }

    #[test]
    fn pow_even_exponent_is_positive() {
        let v = Arc::new(Expr::var("x", None));
        let two = Arc::new(Expr::constant(2));
        let p = Expr::new(super::ExprKind::Pow(v, two), true);
        assert_eq!(sign(&p), Sign::Positive);
    }
}

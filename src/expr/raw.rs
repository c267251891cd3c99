//! Internal, non-simplifying constructors.
//!
//! Used only by [`crate::simplify`] as the last step of each smart
//! constructor, once its rewrite rules have run out of matches: wraps
//! the residual shape with `simplified = true` since at that point it
//! genuinely is in normal form, given the caller already applied every
//! applicable rule. Callers outside `simplify` must never reach for
//! these directly.

use std::sync::Arc;

use super::{BigSumData, Expr, ExprKind, LookupData};
use crate::predicate::Predicate;
use crate::symbol::next_var_id;

pub(crate) fn sum(terms: Vec<Arc<Expr>>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::Sum(terms), true))
}

pub(crate) fn prod(factors: Vec<Arc<Expr>>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::Prod(factors), true))
}

pub(crate) fn pow(base: Arc<Expr>, exp: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::Pow(base, exp), true))
}

pub(crate) fn int_div(n: Arc<Expr>, d: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::IntDiv(n, d), true))
}

pub(crate) fn modulo(n: Arc<Expr>, d: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::Mod(n, d), true))
}

pub(crate) fn log(base: Arc<Expr>, x: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::Log(base, x), true))
}

pub(crate) fn floor(e: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::Floor(e), true))
}

pub(crate) fn ceil(e: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::Ceil(e), true))
}

pub(crate) fn abs(e: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::Abs(e), true))
}

pub(crate) fn if_then_else(pred: Predicate, t: Arc<Expr>, e: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(ExprKind::IfThenElse(pred, t, e), true))
}

pub(crate) fn big_sum(var_name: Arc<str>, from: Arc<Expr>, up_to: Arc<Expr>, body: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(
        ExprKind::BigSum(BigSumData {
            var_id: next_var_id(),
            var_name,
            from,
            up_to,
            body,
        }),
        true,
    ))
}

pub(crate) fn big_sum_with_id(
    var_id: u64,
    var_name: Arc<str>,
    from: Arc<Expr>,
    up_to: Arc<Expr>,
    body: Arc<Expr>,
) -> Arc<Expr> {
    Arc::new(Expr::new(
        ExprKind::BigSum(BigSumData {
            var_id,
            var_name,
            from,
            up_to,
            body,
        }),
        true,
    ))
}

pub(crate) fn lookup(table: Vec<Arc<Expr>>, index: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::new(
        ExprKind::Lookup(LookupData {
            table,
            index,
            id: next_var_id(),
        }),
        true,
    ))
}

//! `BigSum` smart constructor: closed-form symbolic summation.
//!
//! The bound variable is identified by an id rather than passed as a
//! closure parameter at every call site (closures can't satisfy
//! `Eq`/`Hash`/digest). [`big_sum`] is the public entry point: it mints
//! a fresh bound variable, lets the caller build the body expression
//! from it, then normalizes.

use std::sync::Arc;

use crate::decision::{is_smaller, traverse};
use crate::expr::{Expr, ExprKind, raw};
use crate::predicate::CmpOp;
use crate::range::Range;
use crate::symbol::next_var_id;

/// Build `sum_{i=from}^{upTo} body(i)` (inclusive both ends), where
/// `body` constructs the summand from a fresh bound variable ranging
/// over `[from, upTo]`.
pub fn big_sum(
    name: impl Into<Arc<str>>,
    from: Arc<Expr>,
    up_to: Arc<Expr>,
    body: impl FnOnce(Arc<Expr>) -> Arc<Expr>,
) -> Arc<Expr> {
    let var_id = next_var_id();
    let name: Arc<str> = name.into();
    let range = Arc::new(Range::RangeAdd {
        start: Arc::clone(&from),
        stop: Arc::clone(&up_to),
        step: Arc::new(Expr::constant(1)),
    });
    let bound_var = Arc::new(Expr::var_with_id(var_id, Arc::clone(&name), Some(range)));
    let body = body(bound_var);
    rebuild(var_id, name, from, up_to, body)
}

/// Rebuild a `BigSum` whose bound variable `var_id` already appears (or
/// doesn't) inside `body`, applying the closed-form rules. Used both by
/// [`big_sum`] and by `substitute` when rewriting an existing `BigSum`.
pub(crate) fn rebuild(
    var_id: u64,
    var_name: Arc<str>,
    from: Arc<Expr>,
    up_to: Arc<Expr>,
    body: Arc<Expr>,
) -> Arc<Expr> {
    if is_smaller(&up_to, &from) == Some(true) {
        return Arc::new(Expr::constant(0));
    }
    if from == up_to {
        return substitute_bound_var(&body, var_id, &from);
    }
    if !contains_var(&body, var_id) {
        let count = count(&from, &up_to);
        return crate::simplify::product::product(vec![body, count]);
    }
    if let ExprKind::Sum(terms) = body.kind() {
        let parts = terms
            .iter()
            .map(|t| {
                rebuild(
                    var_id,
                    Arc::clone(&var_name),
                    Arc::clone(&from),
                    Arc::clone(&up_to),
                    Arc::clone(t),
                )
            })
            .collect();
        return crate::simplify::sum::sum(parts);
    }
    if let ExprKind::Var(v) = body.kind() {
        if v.id == var_id {
            return arithmetic_series(&from, &up_to);
        }
    }
    if let ExprKind::Prod(factors) = body.kind() {
        if let Some(c) = factors.first().and_then(|f| f.as_const()) {
            let rest = &factors[1..];
            let f_body = if rest.len() == 1 {
                Arc::clone(&rest[0])
            } else {
                crate::expr::raw::prod(rest.to_vec())
            };
            let inner = rebuild(var_id, var_name, from, up_to, f_body);
            return crate::simplify::product::product(vec![Arc::new(Expr::constant(c)), inner]);
        }
    }
    if let ExprKind::IfThenElse(pred, t, e) = body.kind() {
        if let Some((k, op)) = bound_var_threshold(pred, var_id) {
            if let Some(split) =
                split_conditional(var_id, &var_name, &from, &up_to, k, op, t, e)
            {
                return split;
            }
        }
    }
    raw::big_sum_with_id(var_id, var_name, from, up_to, body)
}

fn contains_var(e: &Arc<Expr>, var_id: u64) -> bool {
    let mut found = false;
    traverse::visit(e, &mut |n| {
        if let ExprKind::Var(v) = n.kind() {
            if v.id == var_id {
                found = true;
            }
        }
    });
    found
}

fn substitute_bound_var(body: &Arc<Expr>, var_id: u64, value: &Arc<Expr>) -> Arc<Expr> {
    traverse::substitute(body, &mut |n| match n.kind() {
        ExprKind::Var(v) if v.id == var_id => Some(Arc::clone(value)),
        _ => None,
    })
    .unwrap_or_else(|_| Arc::clone(body))
}

/// `upTo - from + 1`.
fn count(from: &Arc<Expr>, up_to: &Arc<Expr>) -> Arc<Expr> {
    crate::simplify::sum::sum(vec![
        Arc::clone(up_to),
        crate::simplify::product::product(vec![Arc::new(Expr::constant(-1)), Arc::clone(from)]),
        Arc::new(Expr::constant(1)),
    ])
}

/// `(from + upTo) * (upTo - from + 1) / 2`.
fn arithmetic_series(from: &Arc<Expr>, up_to: &Arc<Expr>) -> Arc<Expr> {
    let sum_ends = crate::simplify::sum::sum(vec![Arc::clone(from), Arc::clone(up_to)]);
    let numerator = crate::simplify::product::product(vec![sum_ends, count(from, up_to)]);
    crate::simplify::int_div::int_div(numerator, Arc::new(Expr::constant(2)))
        .unwrap_or_else(|_| raw::int_div(Arc::new(Expr::constant(0)), Arc::new(Expr::constant(1))))
}

/// If `pred` compares the bound variable to a constant, return
/// `(threshold, op)` oriented so the bound variable is always the
/// left-hand side.
fn bound_var_threshold(pred: &crate::predicate::Predicate, var_id: u64) -> Option<(i64, CmpOp)> {
    if let (ExprKind::Var(v), Some(k)) = (pred.lhs().kind(), pred.rhs().as_const()) {
        if v.id == var_id {
            return Some((k, pred.op()));
        }
    }
    if let (Some(k), ExprKind::Var(v)) = (pred.lhs().as_const(), pred.rhs().kind()) {
        if v.id == var_id {
            return Some((k, flip(pred.op())));
        }
    }
    None
}

fn flip(op: CmpOp) -> CmpOp {
    match op {
        CmpOp::Lt => CmpOp::Gt,
        CmpOp::Gt => CmpOp::Lt,
        CmpOp::Le => CmpOp::Ge,
        CmpOp::Ge => CmpOp::Le,
        CmpOp::Eq | CmpOp::Ne => op,
    }
}

#[allow(clippy::too_many_arguments, reason = "internal recognizer with no external caller")]
fn split_conditional(
    var_id: u64,
    var_name: &Arc<str>,
    from: &Arc<Expr>,
    up_to: &Arc<Expr>,
    k: i64,
    op: CmpOp,
    t: &Arc<Expr>,
    e: &Arc<Expr>,
) -> Option<Arc<Expr>> {
    let (true_hi, false_lo) = match op {
        CmpOp::Lt => (k - 1, k),
        CmpOp::Le => (k, k + 1),
        CmpOp::Gt | CmpOp::Ge | CmpOp::Eq | CmpOp::Ne => return None,
    };
    let true_part = rebuild(
        var_id,
        Arc::clone(var_name),
        Arc::clone(from),
        Arc::new(Expr::constant(true_hi)),
        Arc::clone(t),
    );
    let false_part = rebuild(
        var_id,
        Arc::clone(var_name),
        Arc::new(Expr::constant(false_lo)),
        Arc::clone(up_to),
        Arc::clone(e),
    );
    Some(crate::simplify::sum::sum(vec![true_part, false_part]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(n: i64) -> Arc<Expr> {
        Arc::new(Expr::constant(n))
    }

    #[test]
    fn empty_when_up_to_before_from() {
        let s = big_sum("i", c(5), c(0), |_| c(1));
        assert_eq!(s.as_const(), Some(0));
    }

    #[test]
    fn single_point_evaluates_body() {
        let s = big_sum("i", c(0), c(0), |_| c(1));
        assert_eq!(s.as_const(), Some(1));
    }

    #[test]
    fn constant_body_scales_by_count() {
        let s = big_sum("i", c(0), c(9), |_| c(1));
        assert_eq!(s.as_const(), Some(10));
    }

    #[test]
    fn identity_body_is_arithmetic_series() {
        let s = big_sum("i", c(0), c(9), |i| i);
        assert_eq!(s.as_const(), Some(45));
    }

    #[test]
    fn scaled_identity_body() {
        let s = big_sum("i", c(0), c(9), |i| {
            crate::simplify::product::product(vec![c(2), i])
        });
        assert_eq!(s.as_const(), Some(90));
    }

    #[test]
    fn conditional_body_splits_the_range() {
        let s = big_sum("i", c(0), c(10), |i| {
            let pred = crate::predicate::Predicate::new(Arc::clone(&i), c(5), CmpOp::Lt);
            crate::simplify::cond::if_then_else(
                pred,
                Arc::clone(&i),
                crate::simplify::product::product(vec![c(2), i]),
            )
        });
        assert_eq!(s.as_const(), Some(100));
    }
}

//! Structural traversals: `contains`, `visit`, `visitUntil`,
//! `substitute`.
//!
//! `visit`/`visitUntil`/`contains` never descend into a `Var`'s
//! attached range; `substitute` does. A range is metadata about a
//! variable, not a sub-expression of the tree it's attached to, except
//! when rewriting, where a stale bound would be wrong.

use std::sync::Arc;

use crate::error::Result;
use crate::expr::{Expr, ExprKind};
use crate::range::Range;

/// Call `f` on every node of `e`, pre-order. Does not descend into
/// `Var`/`NamedFn` ranges.
pub fn visit(e: &Arc<Expr>, f: &mut impl FnMut(&Arc<Expr>)) {
    f(e);
    for child in children(e) {
        visit(&child, f);
    }
}

/// Short-circuiting traversal: stops and returns `true` as soon as `f`
/// returns `true` for some node.
#[must_use]
pub fn visit_until(e: &Arc<Expr>, f: &mut impl FnMut(&Arc<Expr>) -> bool) -> bool {
    if f(e) {
        return true;
    }
    children(e).into_iter().any(|child| visit_until(&child, f))
}

/// Whether `target` occurs anywhere in `e` (by structural equality).
#[must_use]
pub fn contains(e: &Arc<Expr>, target: &Arc<Expr>) -> bool {
    visit_until(e, &mut |n| n == target)
}

/// The immediate children of a node, for traversal purposes. Does not
/// include `Var`/`NamedFn` range bounds.
fn children(e: &Expr) -> Vec<Arc<Expr>> {
    match e.kind() {
        ExprKind::Const(_)
        | ExprKind::PosInf
        | ExprKind::NegInf
        | ExprKind::Unknown
        | ExprKind::Var(_)
        | ExprKind::NamedFn(_) => Vec::new(),
        ExprKind::OpaqueVar(inner) => vec![Arc::clone(inner)],
        ExprKind::Lookup(d) => {
            let mut v = d.table.clone();
            v.push(Arc::clone(&d.index));
            v
        }
        ExprKind::Sum(ts) | ExprKind::Prod(ts) => ts.clone(),
        ExprKind::Pow(b, e2) | ExprKind::IntDiv(b, e2) | ExprKind::Mod(b, e2) | ExprKind::Log(b, e2) => {
            vec![Arc::clone(b), Arc::clone(e2)]
        }
        ExprKind::Floor(e2) | ExprKind::Ceil(e2) | ExprKind::Abs(e2) => vec![Arc::clone(e2)],
        ExprKind::IfThenElse(pred, t, el) => {
            vec![Arc::clone(pred.lhs()), Arc::clone(pred.rhs()), Arc::clone(t), Arc::clone(el)]
        }
        ExprKind::BigSum(d) => vec![Arc::clone(&d.from), Arc::clone(&d.up_to), Arc::clone(&d.body)],
    }
}

/// Collect every distinct `Var`/`NamedFn` id reachable from `e`.
#[must_use]
pub fn var_ids(e: &Arc<Expr>) -> Vec<u64> {
    let mut ids = Vec::new();
    visit(e, &mut |n| {
        if let ExprKind::Var(v) = n.kind() {
            if !ids.contains(&v.id) {
                ids.push(v.id);
            }
        }
    });
    ids
}

/// Recursively replace sub-trees for which `sigma` returns `Some`,
/// rebuilding through smart constructors so the result is simplified.
/// Consults `sigma` at every node, including inside a `Var`'s range.
pub fn substitute(e: &Arc<Expr>, sigma: &mut impl FnMut(&Arc<Expr>) -> Option<Arc<Expr>>) -> Result<Arc<Expr>> {
    if let Some(replacement) = sigma(e) {
        return Ok(replacement);
    }
    match e.kind() {
        ExprKind::Const(_) | ExprKind::PosInf | ExprKind::NegInf | ExprKind::Unknown => Ok(Arc::clone(e)),
        ExprKind::Var(v) => {
            let new_range = match &v.range {
                Some(r) => Some(Arc::new(substitute_range(r, sigma)?)),
                None => None,
            };
            Ok(crate::simplify::var::rebuild(v.id, Arc::clone(&v.name), new_range))
        }
        ExprKind::OpaqueVar(inner) => Ok(Arc::new(Expr::opaque_var(substitute(inner, sigma)?))),
        ExprKind::NamedFn(d) => {
            let new_range = match &d.range {
                Some(r) => Some(Arc::new(substitute_range(r, sigma)?)),
                None => None,
            };
            Ok(Arc::new(Expr::named_fn(Arc::clone(&d.name), new_range)))
        }
        ExprKind::Lookup(d) => {
            let table = d
                .table
                .iter()
                .map(|t| substitute(t, sigma))
                .collect::<Result<Vec<_>>>()?;
            let index = substitute(&d.index, sigma)?;
            Ok(crate::simplify::lookup::lookup(table, index))
        }
        ExprKind::Sum(ts) => {
            let terms = ts.iter().map(|t| substitute(t, sigma)).collect::<Result<Vec<_>>>()?;
            Ok(crate::simplify::sum::sum(terms))
        }
        ExprKind::Prod(fs) => {
            let factors = fs.iter().map(|f| substitute(f, sigma)).collect::<Result<Vec<_>>>()?;
            Ok(crate::simplify::product::product(factors))
        }
        ExprKind::Pow(b, ex) => {
            crate::simplify::pow::pow(substitute(b, sigma)?, substitute(ex, sigma)?)
        }
        ExprKind::IntDiv(n, d) => {
            crate::simplify::int_div::int_div(substitute(n, sigma)?, substitute(d, sigma)?)
        }
        ExprKind::Mod(n, d) => crate::simplify::modulo::modulo(substitute(n, sigma)?, substitute(d, sigma)?),
        ExprKind::Log(b, x) => Ok(crate::expr::raw::log(substitute(b, sigma)?, substitute(x, sigma)?)),
        ExprKind::Floor(inner) => Ok(crate::simplify::unary::floor(substitute(inner, sigma)?)),
        ExprKind::Ceil(inner) => Ok(crate::simplify::unary::ceil(substitute(inner, sigma)?)),
        ExprKind::Abs(inner) => Ok(crate::simplify::unary::abs(substitute(inner, sigma)?)),
        ExprKind::IfThenElse(pred, t, el) => {
            let lhs = substitute(pred.lhs(), sigma)?;
            let rhs = substitute(pred.rhs(), sigma)?;
            let then_branch = substitute(t, sigma)?;
            let else_branch = substitute(el, sigma)?;
            Ok(crate::simplify::cond::if_then_else(
                crate::predicate::Predicate::new(lhs, rhs, pred.op()),
                then_branch,
                else_branch,
            ))
        }
        ExprKind::BigSum(d) => {
            let from = substitute(&d.from, sigma)?;
            let up_to = substitute(&d.up_to, sigma)?;
            let body = substitute(&d.body, sigma)?;
            Ok(crate::simplify::big_sum::rebuild(d.var_id, Arc::clone(&d.var_name), from, up_to, body))
        }
    }
}

fn substitute_range(r: &Range, sigma: &mut impl FnMut(&Arc<Expr>) -> Option<Arc<Expr>>) -> Result<Range> {
    let mut err = None;
    let substituted = r.substitute(&mut |bound| match substitute(bound, sigma) {
        Ok(v) => v,
        Err(e) => {
            err = Some(e);
            Arc::clone(bound)
        }
    });
    err.map_or(Ok(substituted), Err)
}

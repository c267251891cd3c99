//! `IntDiv` smart constructor: floor division.

use std::sync::Arc;

use crate::decision::{is_smaller, multiple_of};
use crate::error::{ArithError, Result};
use crate::expr::sign;
use crate::expr::{Expr, ExprKind, raw};
use crate::range::Sign;

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) { q - 1 } else { q }
}

fn provably_nonzero(e: &Arc<Expr>) -> bool {
    if let Some(c) = e.as_const() {
        return c != 0;
    }
    if let ExprKind::Var(v) = e.kind() {
        if let Some(r) = &v.range {
            if r.min().and_then(|m| m.as_const()).is_some_and(|m| m > 0) {
                return true;
            }
            if r.max().and_then(|m| m.as_const()).is_some_and(|m| m < 0) {
                return true;
            }
        }
    }
    matches!(sign::sign(e), Sign::Negative)
}

/// Build `n / d` (floor division), trying each simplification rule in
/// order. Fails with [`ArithError::ArithmeticDomain`] when `d` is
/// `Const(0)`.
pub fn int_div(n: Arc<Expr>, d: Arc<Expr>) -> Result<Arc<Expr>> {
    if d.is_zero() {
        return Err(ArithError::domain("division by zero"));
    }
    if let Some(dc) = d.as_const() {
        if dc == 1 {
            return Ok(n);
        }
        if dc == -1 {
            return Ok(crate::simplify::product::product(vec![
                Arc::new(Expr::constant(-1)),
                n,
            ]));
        }
    }
    if n.is_zero() {
        return Ok(Arc::new(Expr::constant(0)));
    }
    if let (Some(nc), Some(dc)) = (n.as_const(), d.as_const()) {
        return Ok(Arc::new(Expr::constant(floor_div(nc, dc))));
    }
    if n == d && provably_nonzero(&d) {
        return Ok(Arc::new(Expr::constant(1)));
    }
    if matches!(sign::sign(&n), Sign::Positive) {
        let abs_n = crate::simplify::unary::abs(Arc::clone(&n));
        let abs_d = crate::simplify::unary::abs(Arc::clone(&d));
        if is_smaller(&abs_n, &abs_d) == Some(true) {
            return Ok(Arc::new(Expr::constant(0)));
        }
    }
    if multiple_of(&n, &d) {
        return Ok(exact_quotient(&n, &d));
    }
    if let ExprKind::Sum(terms) = n.kind() {
        let mut divisible = Vec::new();
        let mut rest = Vec::new();
        for t in terms {
            if multiple_of(t, &d) {
                divisible.push(Arc::clone(t));
            } else {
                rest.push(Arc::clone(t));
            }
        }
        if !divisible.is_empty() && !rest.is_empty() {
            let rest_sum = crate::simplify::sum::sum(rest);
            if matches!(sign::sign(&rest_sum), Sign::Positive) {
                let divisible_sum = crate::simplify::sum::sum(divisible);
                let part1 = int_div(divisible_sum, Arc::clone(&d))?;
                let part2 = int_div(rest_sum, d)?;
                return Ok(crate::simplify::sum::sum(vec![part1, part2]));
            }
        }
    }
    Ok(raw::int_div(n, d))
}

/// Divide `n` by `d` structurally, assuming `multiple_of(n, d)` already
/// holds: remove `d`'s factors from `n`'s `Prod`, or shrink `n`'s
/// constant factor by `d` when `d` is a constant.
fn exact_quotient(n: &Arc<Expr>, d: &Arc<Expr>) -> Arc<Expr> {
    if let Some(c) = d.as_const() {
        if let ExprKind::Prod(factors) = n.kind() {
            let mut factors = factors.clone();
            if let Some(idx) = factors.iter().position(|f| f.as_const().is_some()) {
                if let Some(nc) = factors[idx].as_const() {
                    factors[idx] = Arc::new(Expr::constant(nc / c));
                    return crate::simplify::product::product(factors);
                }
            }
        }
    }
    let d_factors: Vec<Arc<Expr>> = match d.kind() {
        ExprKind::Prod(fs) => fs.clone(),
        _ => vec![Arc::clone(d)],
    };
    if let ExprKind::Prod(n_factors) = n.kind() {
        let mut remaining = n_factors.clone();
        for df in &d_factors {
            if let Some(pos) = remaining.iter().position(|f| f == df) {
                remaining.remove(pos);
            }
        }
        return crate::simplify::product::product(remaining);
    }
    Arc::new(Expr::constant(1))
}

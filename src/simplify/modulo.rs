//! `Mod` smart constructor: C-style remainder.

use std::sync::Arc;

use crate::decision::{is_smaller, multiple_of};
use crate::error::{ArithError, Result};
use crate::expr::sign;
use crate::expr::{Expr, ExprKind, raw};
use crate::range::Sign;

/// Build `n % d`, trying each simplification rule in order. Fails with
/// [`ArithError::ArithmeticDomain`] when `d` is `Const(0)`.
///
/// `sign(result) == sign(dividend)`, matching Rust's own `%` for
/// integers, which is already C-style truncated remainder.
pub fn modulo(n: Arc<Expr>, d: Arc<Expr>) -> Result<Arc<Expr>> {
    if d.is_zero() {
        return Err(ArithError::domain("modulo by zero"));
    }
    if d.as_const() == Some(1) {
        return Ok(Arc::new(Expr::constant(0)));
    }
    if n.is_zero() || n.is_one() {
        return Ok(n);
    }
    if let (Some(nc), Some(dc)) = (n.as_const(), d.as_const()) {
        return Ok(Arc::new(Expr::constant(nc % dc)));
    }
    if n == d {
        return Ok(Arc::new(Expr::constant(0)));
    }
    if matches!(sign::sign(&n), Sign::Positive) {
        let abs_n = crate::simplify::unary::abs(Arc::clone(&n));
        let abs_d = crate::simplify::unary::abs(Arc::clone(&d));
        if is_smaller(&abs_n, &abs_d) == Some(true) {
            return Ok(n);
        }
    }
    if let ExprKind::Mod(_, inner_d) = n.kind() {
        if inner_d == &d {
            return Ok(Arc::clone(&n));
        }
    }
    if multiple_of(&n, &d) {
        return Ok(Arc::new(Expr::constant(0)));
    }
    if let ExprKind::Sum(terms) = n.kind() {
        if matches!(sign::sign(&n), Sign::Positive) {
            let mut rest = Vec::with_capacity(terms.len());
            let mut dropped_any = false;
            for t in terms {
                if multiple_of(t, &d) {
                    dropped_any = true;
                } else {
                    rest.push(Arc::clone(t));
                }
            }
            if dropped_any {
                let rest_sum = crate::simplify::sum::sum(rest);
                return modulo(rest_sum, d);
            }
        }
    }
    Ok(raw::modulo(n, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulo_by_zero_fails() {
        assert!(modulo(Arc::new(Expr::constant(1)), Arc::new(Expr::constant(0))).is_err());
    }

    #[test]
    fn negative_dividend_follows_c_rules() {
        let n = Arc::new(Expr::constant(-7));
        let d = Arc::new(Expr::constant(3));
        assert_eq!(modulo(n, d).unwrap().as_const(), Some(-1));
    }

    #[test]
    fn self_modulo_is_zero() {
        let x = Arc::new(Expr::var("x", None));
        assert_eq!(modulo(Arc::clone(&x), x).unwrap().as_const(), Some(0));
    }

    #[test]
    fn idempotent_on_its_own_result() {
        let x = Arc::new(Expr::var("x", None));
        let d = Arc::new(Expr::constant(5));
        let once = modulo(x, Arc::clone(&d)).unwrap();
        let twice = modulo(Arc::clone(&once), d).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn drops_additive_multiples_of_the_divisor() {
        let v = Arc::new(Expr::var(
            "v",
            Some(Arc::new(crate::range::Range::StartFrom(Arc::new(
                Expr::constant(0),
            )))),
        ));
        let d = Arc::new(Expr::constant(4));
        let k_d = crate::simplify::product::product(vec![Arc::new(Expr::constant(2)), Arc::clone(&d)]);
        let n = crate::simplify::sum::sum(vec![Arc::clone(&v), k_d]);
        let result = modulo(n, Arc::clone(&d)).unwrap();
        let direct = modulo(v, d).unwrap();
        assert_eq!(result, direct);
    }
}

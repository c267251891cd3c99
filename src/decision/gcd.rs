//! Greatest common divisor, for constants and for symbolic products.

use std::sync::Arc;

use crate::expr::{Expr, ExprKind};

fn int_gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Factors of `e` as a `Prod`, or the singleton `[e]` otherwise.
fn factors_of(e: &Arc<Expr>) -> Vec<Arc<Expr>> {
    match e.kind() {
        ExprKind::Prod(fs) => fs.clone(),
        _ => vec![Arc::clone(e)],
    }
}

/// `gcd(a, b)`: for constants, the numeric GCD; for symbolic trees, the
/// largest expression `g` such that `a` and `b` are each a `Prod`
/// containing `g`. Symmetric. Returns `Const(1)` when nothing can be
/// factored out.
#[must_use]
pub fn gcd(a: &Arc<Expr>, b: &Arc<Expr>) -> Arc<Expr> {
    if let (Some(x), Some(y)) = (a.as_const(), b.as_const()) {
        return Arc::new(Expr::constant(int_gcd(x, y)));
    }

    let fa = factors_of(a);
    let mut fb = factors_of(b);
    let mut common = Vec::new();
    for f in &fa {
        if let Some(pos) = fb.iter().position(|g| g == f) {
            common.push(Arc::clone(f));
            fb.remove(pos);
        }
    }

    if common.is_empty() {
        Arc::new(Expr::constant(1))
    } else if common.len() == 1 {
        common.into_iter().next().unwrap_or_else(|| Arc::new(Expr::constant(1)))
    } else {
        crate::simplify::product::product(common)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_gcd() {
        let a = Arc::new(Expr::constant(12));
        let b = Arc::new(Expr::constant(18));
        assert_eq!(gcd(&a, &b).as_const(), Some(6));
    }

    #[test]
    fn coprime_constants_yield_one() {
        let a = Arc::new(Expr::constant(7));
        let b = Arc::new(Expr::constant(5));
        assert_eq!(gcd(&a, &b).as_const(), Some(1));
    }

    #[test]
    fn shared_symbolic_factor_is_extracted() {
        let x = Arc::new(Expr::var("x", None));
        let y = Arc::new(Expr::var("y", None));
        let z = Arc::new(Expr::var("z", None));
        let a = crate::simplify::product::product(vec![
            Arc::clone(&x),
            Arc::clone(&y),
        ]);
        let b = crate::simplify::product::product(vec![Arc::clone(&x), Arc::clone(&z)]);
        let g = gcd(&a, &b);
        assert_eq!(g, x);
    }
}

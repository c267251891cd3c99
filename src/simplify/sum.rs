//! `Sum` smart constructor.

use std::sync::Arc;

use crate::expr::{Expr, ExprKind, ordering, raw};

/// Build a (possibly collapsed) sum of `terms`.
///
/// Flattens nested sums, merges constants, combines like terms by
/// coefficient, sorts under the canonical order, and collapses to a
/// bare term or `Const(0)` when fewer than two terms remain.
#[must_use]
pub fn sum(terms: Vec<Arc<Expr>>) -> Arc<Expr> {
    let mut flat = Vec::with_capacity(terms.len());
    for t in terms {
        match t.kind() {
            ExprKind::Sum(inner) => flat.extend(inner.iter().cloned()),
            _ => flat.push(t),
        }
    }

    let mut const_sum: i64 = 0;
    let mut non_const = Vec::with_capacity(flat.len());
    for t in flat {
        if let Some(c) = t.as_const() {
            const_sum = const_sum.wrapping_add(c);
        } else {
            non_const.push(t);
        }
    }

    let mut combined: Vec<(i64, Arc<Expr>)> = Vec::with_capacity(non_const.len());
    for t in non_const {
        let (coeff, body) = coefficient_and_body(&t);
        if let Some(slot) = combined.iter_mut().find(|(_, b)| b == &body) {
            slot.0 = slot.0.wrapping_add(coeff);
        } else {
            combined.push((coeff, body));
        }
    }

    let mut rebuilt: Vec<Arc<Expr>> = combined
        .into_iter()
        .filter_map(|(coeff, body)| match coeff {
            0 => None,
            1 => Some(body),
            _ => Some(crate::simplify::product::product(vec![
                Arc::new(Expr::constant(coeff)),
                body,
            ])),
        })
        .collect();

    if const_sum != 0 || rebuilt.is_empty() {
        rebuilt.push(Arc::new(Expr::constant(const_sum)));
    }

    rebuilt.sort_by(ordering::cmp);

    match rebuilt.len() {
        1 => rebuilt
            .into_iter()
            .next()
            .unwrap_or_else(|| Arc::new(Expr::constant(0))),
        _ => raw::sum(rebuilt),
    }
}

/// Factor a term into `(coefficient, body)`: a `Prod` whose
/// canonically-first factor is a constant splits into that constant
/// and the rest; everything else has an implicit coefficient of 1.
fn coefficient_and_body(t: &Arc<Expr>) -> (i64, Arc<Expr>) {
    if let ExprKind::Prod(factors) = t.kind() {
        if let Some(c) = factors.first().and_then(|f| f.as_const()) {
            let rest = &factors[1..];
            let body = if rest.len() == 1 {
                Arc::clone(&rest[0])
            } else {
                raw::prod(rest.to_vec())
            };
            return (c, body);
        }
    }
    (1, Arc::clone(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    #[test]
    fn zero_terms_collapse_away() {
        let a = Arc::new(Expr::var("a", None));
        let zero = Arc::new(Expr::constant(0));
        let s = sum(vec![Arc::clone(&a), zero]);
        assert_eq!(s, a);
    }

    #[test]
    fn constants_merge() {
        let s = sum(vec![Arc::new(Expr::constant(2)), Arc::new(Expr::constant(3))]);
        assert_eq!(s.as_const(), Some(5));
    }

    #[test]
    fn like_terms_combine_by_coefficient() {
        let x = Arc::new(Expr::var("x", None));
        let three_x = crate::simplify::product::product(vec![Arc::new(Expr::constant(3)), Arc::clone(&x)]);
        let minus_three_x =
            crate::simplify::product::product(vec![Arc::new(Expr::constant(-3)), Arc::clone(&x)]);
        let s = sum(vec![three_x, minus_three_x]);
        assert_eq!(s.as_const(), Some(0));
    }

    #[test]
    fn commutative() {
        let a = Arc::new(Expr::var("a", None));
        let b = Arc::new(Expr::var("b", None));
        let lhs = sum(vec![Arc::clone(&a), Arc::clone(&b)]);
        let rhs = sum(vec![b, a]);
        assert_eq!(lhs, rhs);
    }
}

//! `Prod` smart constructor: the multiplicative mirror of
//! [`crate::simplify::sum`], plus base-merging and bounded distribution.

use std::sync::Arc;

use crate::expr::{Expr, ExprKind, ordering, raw};

/// Build a (possibly collapsed) product of `factors`.
#[must_use]
pub fn product(factors: Vec<Arc<Expr>>) -> Arc<Expr> {
    if factors.iter().any(|f| f.is_zero()) {
        return Arc::new(Expr::constant(0));
    }

    let mut flat = Vec::with_capacity(factors.len());
    for f in factors {
        match f.kind() {
            ExprKind::Prod(inner) => flat.extend(inner.iter().cloned()),
            _ => flat.push(f),
        }
    }

    let mut const_prod: i64 = 1;
    let mut rest = Vec::with_capacity(flat.len());
    for f in flat {
        if let Some(c) = f.as_const() {
            const_prod = const_prod.wrapping_mul(c);
        } else {
            rest.push(f);
        }
    }
    if const_prod == 0 {
        return Arc::new(Expr::constant(0));
    }

    let mut bases: Vec<(Arc<Expr>, Arc<Expr>)> = Vec::with_capacity(rest.len());
    for f in rest {
        let (base, exp) = base_and_exponent(&f);
        if let Some(slot) = bases.iter_mut().find(|(b, _)| b == &base) {
            slot.1 = crate::simplify::sum::sum(vec![Arc::clone(&slot.1), exp]);
        } else {
            bases.push((base, exp));
        }
    }

    let mut rebuilt = Vec::with_capacity(bases.len());
    for (base, exp) in bases {
        let p = crate::simplify::pow::pow(base, exp);
        if p.is_zero() {
            return Arc::new(Expr::constant(0));
        }
        if !p.is_one() {
            rebuilt.push(p);
        }
    }

    if const_prod != 1 && rebuilt.len() == 1 {
        if let ExprKind::Sum(terms) = rebuilt[0].kind() {
            let distributed = terms
                .iter()
                .map(|t| product(vec![Arc::new(Expr::constant(const_prod)), Arc::clone(t)]))
                .collect();
            return crate::simplify::sum::sum(distributed);
        }
    }

    if const_prod != 1 || rebuilt.is_empty() {
        rebuilt.push(Arc::new(Expr::constant(const_prod)));
    }

    rebuilt.sort_by(ordering::cmp);

    match rebuilt.len() {
        1 => rebuilt
            .into_iter()
            .next()
            .unwrap_or_else(|| Arc::new(Expr::constant(1))),
        _ => raw::prod(rebuilt),
    }
}

/// Factor a term into `(base, exponent)`: a `Pow` splits directly,
/// everything else has an implicit exponent of 1.
fn base_and_exponent(f: &Arc<Expr>) -> (Arc<Expr>, Arc<Expr>) {
    if let ExprKind::Pow(base, exp) = f.kind() {
        (Arc::clone(base), Arc::clone(exp))
    } else {
        (Arc::clone(f), Arc::new(Expr::constant(1)))
    }
}

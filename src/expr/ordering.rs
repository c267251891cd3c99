//! Canonical total order `≺` over simplified expressions.
//!
//! Constants sort first, then variables (lexicographically by name,
//! then by id), then every other kind by `(variant seed, digest)`.
//! Sum/Prod children are always stored under this order, so structural
//! equality of two canonical sums/products reduces to `Vec` equality.

use std::cmp::Ordering;

use super::digest::{
    ABS, BIG_SUM, CEIL, FLOOR, IF_THEN_ELSE, INT_DIV, LOG, LOOKUP, MOD, NAMED_FN, NEG_INF,
    OPAQUE_VAR, POS_INF, POW, PROD, SUM, UNKNOWN,
};
use super::{Expr, ExprKind};

/// Rank used for the coarse first-level grouping: constants, then
/// variables, then everything else.
fn tier(kind: &ExprKind) -> u8 {
    match kind {
        ExprKind::Const(_) => 0,
        ExprKind::Var(_) => 1,
        _ => 2,
    }
}

/// Per-variant seed used to order within tier 2, matching the seeds
/// `digest` mixes in (an arbitrary but stable choice: any injective
/// per-variant key would satisfy the invariant).
fn variant_seed(kind: &ExprKind) -> u64 {
    match kind {
        ExprKind::Const(_) | ExprKind::Var(_) => 0,
        ExprKind::PosInf => POS_INF,
        ExprKind::NegInf => NEG_INF,
        ExprKind::Unknown => UNKNOWN,
        ExprKind::OpaqueVar(_) => OPAQUE_VAR,
        ExprKind::NamedFn(_) => NAMED_FN,
        ExprKind::Lookup(_) => LOOKUP,
        ExprKind::Sum(_) => SUM,
        ExprKind::Prod(_) => PROD,
        ExprKind::Pow(..) => POW,
        ExprKind::IntDiv(..) => INT_DIV,
        ExprKind::Mod(..) => MOD,
        ExprKind::Log(..) => LOG,
        ExprKind::Floor(_) => FLOOR,
        ExprKind::Ceil(_) => CEIL,
        ExprKind::Abs(_) => ABS,
        ExprKind::IfThenElse(..) => IF_THEN_ELSE,
        ExprKind::BigSum(_) => BIG_SUM,
    }
}

/// Compare two expressions under the canonical order `≺`.
#[must_use]
pub fn cmp(a: &Expr, b: &Expr) -> Ordering {
    match (a.kind(), b.kind()) {
        (ExprKind::Const(x), ExprKind::Const(y)) => x.cmp(y),
        (ExprKind::Var(x), ExprKind::Var(y)) => x.name.cmp(&y.name).then(x.id.cmp(&y.id)),
        _ => tier(a.kind())
            .cmp(&tier(b.kind()))
            .then_with(|| variant_seed(a.kind()).cmp(&variant_seed(b.kind())))
            .then_with(|| a.digest().cmp(&b.digest())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn constants_sort_before_variables() {
        let c = Expr::constant(1);
        let v = Expr::var("x", None);
        assert_eq!(cmp(&c, &v), Ordering::Less);
    }

    #[test]
    fn variables_sort_by_name_then_id() {
        let a = Expr::var("a", None);
        let b = Expr::var("b", None);
        assert_eq!(cmp(&a, &b), Ordering::Less);
    }

    #[test]
    fn same_tier_breaks_ties_on_digest() {
        let x = Arc::new(Expr::var("x", None));
        let floor = Expr::new(ExprKind::Floor(Arc::clone(&x)), true);
        let ceil = Expr::new(ExprKind::Ceil(x), true);
        assert_ne!(cmp(&floor, &ceil), Ordering::Equal);
    }
}

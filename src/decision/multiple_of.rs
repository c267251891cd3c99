//! `multipleOf(a, b)`: is `b | a` provable?

use std::sync::Arc;

use crate::expr::{Expr, ExprKind};

fn is_division_factor(f: &Expr) -> bool {
    matches!(f.kind(), ExprKind::Pow(_, e) if e.as_const().is_some_and(|n| n < 0))
}

/// Returns `true` only when `b | a` is provable; `false` is a sound
/// refusal, never a proof of non-divisibility.
#[must_use]
pub fn multiple_of(a: &Arc<Expr>, b: &Arc<Expr>) -> bool {
    if b.is_one() {
        return true;
    }
    if let (Some(x), Some(y)) = (a.as_const(), b.as_const()) {
        return if y == 0 { x == 0 } else { x % y == 0 };
    }
    if a == b {
        return true;
    }

    match (a.kind(), b.kind()) {
        (ExprKind::Prod(fa), ExprKind::Prod(fb)) => {
            let mut remaining = fa.clone();
            fb.iter().filter(|f| !is_division_factor(f)).all(|bf| {
                if let Some(pos) = remaining.iter().position(|af| af == bf) {
                    remaining.remove(pos);
                    true
                } else {
                    remaining.iter().any(|af| multiple_of(af, bf))
                }
            })
        }
        (ExprKind::Prod(fa), _) if b.as_const().is_some() => {
            let bc = b.as_const().unwrap_or(1);
            fa.iter().any(|f| f.as_const().is_some_and(|c| bc != 0 && c % bc == 0))
                || fa.iter().any(|f| multiple_of(f, b))
        }
        (ExprKind::IntDiv(an, ad), ExprKind::IntDiv(bn, bd)) => ad == bd && multiple_of(an, bn),
        _ => false,
    }
}

//! `Var` smart constructor.

use std::sync::Arc;

use crate::expr::Expr;
use crate::range::Range;

/// A fresh symbolic variable, collapsing to a constant when its range
/// pins down a single reachable value.
#[must_use]
pub fn var(name: impl Into<Arc<str>>, range: Option<Arc<Range>>) -> Arc<Expr> {
    collapse(&range).unwrap_or_else(|| Arc::new(Expr::var(name, range)))
}

/// Rebuild a variable with a preserved `id` (used by `substitute` when
/// rewriting a range in place), applying the same collapse rule.
#[must_use]
pub(crate) fn rebuild(id: u64, name: Arc<str>, range: Option<Arc<Range>>) -> Arc<Expr> {
    collapse(&range).unwrap_or_else(|| Arc::new(Expr::var_with_id(id, name, range)))
}

fn collapse(range: &Option<Arc<Range>>) -> Option<Arc<Expr>> {
    let r = range.as_ref()?;
    let (min, max) = (r.min()?, r.max()?);
    if min.as_const().is_some() && min == max {
        Some(min)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_range_collapses_to_constant() {
        let pinned = Arc::new(Range::RangeAdd {
            start: Arc::new(Expr::constant(4)),
            stop: Arc::new(Expr::constant(4)),
            step: Arc::new(Expr::constant(1)),
        });
        let v = var("n", Some(pinned));
        assert_eq!(v.as_const(), Some(4));
    }

    #[test]
    fn open_range_stays_a_variable() {
        let open = Arc::new(Range::StartFrom(Arc::new(Expr::constant(0))));
        let v = var("n", Some(open));
        assert!(matches!(v.kind(), crate::expr::ExprKind::Var(_)));
    }
}

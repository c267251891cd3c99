//! `IfThenElse` smart constructor.

use std::sync::Arc;

use crate::expr::{Expr, raw};
use crate::predicate::Predicate;

/// Build `if pred then t else e`.
#[must_use]
pub fn if_then_else(pred: Predicate, t: Arc<Expr>, e: Arc<Expr>) -> Arc<Expr> {
    if let Some(decided) = pred.eval_const() {
        return if decided { t } else { e };
    }
    if t == e {
        return t;
    }
    raw::if_then_else(pred, t, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::CmpOp;

    #[test]
    fn constant_predicate_short_circuits() {
        let pred = Predicate::new(
            Arc::new(Expr::constant(1)),
            Arc::new(Expr::constant(2)),
            CmpOp::Lt,
        );
        let t = Arc::new(Expr::constant(10));
        let e = Arc::new(Expr::constant(20));
        assert_eq!(if_then_else(pred, t, e).as_const(), Some(10));
    }

    #[test]
    fn identical_branches_collapse() {
        let pred = Predicate::new(
            Arc::new(Expr::var("x", None)),
            Arc::new(Expr::constant(2)),
            CmpOp::Lt,
        );
        let t = Arc::new(Expr::constant(7));
        let e = Arc::new(Expr::constant(7));
        assert_eq!(if_then_else(pred, t, e).as_const(), Some(7));
    }
}

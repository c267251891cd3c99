//! Advisory textual form.
//!
//! Not a round-trip contract: this is a debugging/logging aid, not a
//! parser front-end. Sums
//! render with `+`, products with `*`, powers as `pow(b, e)` (or
//! `1/^(b)` for `Pow(b, -1)`), modulo as `(x % (y))`, and variables as
//! `v_<name>_<id>`.

use std::fmt;

use crate::expr::{Expr, ExprKind};
use crate::predicate::CmpOp;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Const(n) => write!(f, "{n}"),
            ExprKind::PosInf => write!(f, "inf"),
            ExprKind::NegInf => write!(f, "-inf"),
            ExprKind::Unknown => write!(f, "unknown"),
            ExprKind::Var(v) => write!(f, "v_{}_{}", v.name, v.id),
            ExprKind::OpaqueVar(inner) => write!(f, "{inner}"),
            ExprKind::NamedFn(d) => write!(f, "{}()", d.name),
            ExprKind::Lookup(d) => {
                write!(f, "[")?;
                for (i, entry) in d.table.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{entry}")?;
                }
                write!(f, "][{}]", d.index)
            }
            ExprKind::Sum(terms) => write_joined(f, terms, " + "),
            ExprKind::Prod(factors) => write_joined(f, factors, "*"),
            ExprKind::Pow(base, exp) => {
                if exp.as_const() == Some(-1) {
                    write!(f, "1/^({base})")
                } else {
                    write!(f, "pow({base}, {exp})")
                }
            }
            ExprKind::IntDiv(n, d) => write!(f, "({n} / {d})"),
            ExprKind::Mod(n, d) => write!(f, "({n} % ({d}))"),
            ExprKind::Log(base, x) => write!(f, "log_{base}({x})"),
            ExprKind::Floor(inner) => write!(f, "floor({inner})"),
            ExprKind::Ceil(inner) => write!(f, "ceil({inner})"),
            ExprKind::Abs(inner) => write!(f, "abs({inner})"),
            ExprKind::IfThenElse(pred, t, e) => {
                write!(f, "if ({} {} {}) then {t} else {e}", pred.lhs(), op_symbol(pred.op()), pred.rhs())
            }
            ExprKind::BigSum(d) => {
                write!(f, "sum_{{{}={}}}^{{{}}} {}", d.var_name, d.from, d.up_to, d.body)
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[std::sync::Arc<Expr>], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn op_symbol(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Lt => "<",
        CmpOp::Le => "<=",
        CmpOp::Gt => ">",
        CmpOp::Ge => ">=",
        CmpOp::Eq => "==",
        CmpOp::Ne => "!=",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn sum_renders_with_plus() {
        let s = crate::simplify::sum::sum(vec![
            Arc::new(Expr::var("x", None)),
            Arc::new(Expr::var("y", None)),
        ]);
        assert!(s.to_string().contains(" + "));
    }

    #[test]
    fn reciprocal_power_uses_ordinal_notation() {
        let x = Arc::new(Expr::var("x", None));
        let p = crate::simplify::pow::pow(x, Arc::new(Expr::constant(-1)));
        assert!(p.to_string().starts_with("1/^("));
    }

    #[test]
    fn modulo_renders_in_parens() {
        let x = Arc::new(Expr::var("x", None));
        let d = Arc::new(Expr::constant(5));
        let m = crate::simplify::modulo::modulo(x, d).expect("nonzero divisor");
        assert!(m.to_string().contains(" % ("));
    }
}

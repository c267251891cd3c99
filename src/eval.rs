//! Full numeric evaluation.
//!
//! `eval` folds a closed expression down to a single `i64`, failing with
//! `NotEvaluable` as soon as it hits anything open: a free `Var`,
//! `NamedFn`, `Lookup`, `IfThenElse`, `Unknown`, or an infinity.
//! `eval_double` is the cheap feasibility cousin used by decision
//! procedures that only need a yes/no/overflow probe and would rather
//! not pay for checked arithmetic or propagate an error.

use crate::expr::{Expr, ExprKind};
use crate::error::{ArithError, Result};

/// Fully evaluate `e`, failing on anything that isn't a closed constant
/// expression.
///
/// # Errors
///
/// Returns [`ArithError::NotEvaluable`] if `e` contains a free variable,
/// named function, lookup, conditional, `Unknown`, or an infinity, or
/// [`ArithError::ArithmeticDomain`] on division/modulo by zero.
pub fn eval(e: &Expr) -> Result<i64> {
    match e.kind() {
        ExprKind::Const(n) => Ok(*n),
        ExprKind::PosInf | ExprKind::NegInf => {
            Err(ArithError::not_evaluable("infinity has no finite value"))
        }
        ExprKind::Unknown => Err(ArithError::not_evaluable("Unknown has no value")),
        ExprKind::Var(_) => Err(ArithError::not_evaluable("free variable")),
        ExprKind::OpaqueVar(inner) => eval(inner),
        ExprKind::NamedFn(_) => Err(ArithError::not_evaluable("uninterpreted named function")),
        ExprKind::Lookup(_) => Err(ArithError::not_evaluable("lookup is not statically evaluable")),
        ExprKind::Sum(terms) => terms.iter().try_fold(0i64, |acc, t| {
            eval(t).and_then(|v| acc.checked_add(v).ok_or_else(overflow))
        }),
        ExprKind::Prod(factors) => factors.iter().try_fold(1i64, |acc, f| {
            eval(f).and_then(|v| acc.checked_mul(v).ok_or_else(overflow))
        }),
        ExprKind::Pow(base, exp) => {
            let b = eval(base)?;
            let e = eval(exp)?;
            const_pow(b, e)
        }
        ExprKind::IntDiv(n, d) => {
            let n = eval(n)?;
            let d = eval(d)?;
            if d == 0 {
                return Err(ArithError::domain("division by zero"));
            }
            Ok(floor_div(n, d))
        }
        ExprKind::Mod(n, d) => {
            let n = eval(n)?;
            let d = eval(d)?;
            if d == 0 {
                return Err(ArithError::domain("modulo by zero"));
            }
            Ok(n % d)
        }
        ExprKind::Log(_, _) => Err(ArithError::not_evaluable("Log has no closed-form integer value")),
        ExprKind::Floor(inner) | ExprKind::Ceil(inner) => eval(inner),
        ExprKind::Abs(inner) => eval(inner).map(i64::abs),
        ExprKind::IfThenElse(..) => Err(ArithError::not_evaluable("conditional is not statically evaluable")),
        ExprKind::BigSum(d) => {
            let from = eval(&d.from)?;
            let up_to = eval(&d.up_to)?;
            (from..=up_to).try_fold(0i64, |acc, i| {
                let bound = std::sync::Arc::new(Expr::constant(i));
                let instance = crate::decision::traverse::substitute(&d.body, &mut |n| match n.kind() {
                    ExprKind::Var(v) if v.id == d.var_id => Some(std::sync::Arc::clone(&bound)),
                    _ => None,
                })
                .map_err(|_| overflow())?;
                acc.checked_add(eval(&instance)?).ok_or_else(overflow)
            })
        }
    }
}

/// Cheap feasibility probe: evaluate using `f64`, returning `None` for
/// anything `eval` would reject rather than an error. Used by decision
/// procedures that want a fast approximate magnitude check without
/// committing to exact `i64` arithmetic.
#[must_use]
pub fn eval_double(e: &Expr) -> Option<f64> {
    match e.kind() {
        ExprKind::Const(n) => Some(*n as f64),
        ExprKind::PosInf => Some(f64::INFINITY),
        ExprKind::NegInf => Some(f64::NEG_INFINITY),
        ExprKind::Unknown | ExprKind::Var(_) | ExprKind::NamedFn(_) | ExprKind::Lookup(_) | ExprKind::IfThenElse(..) => None,
        ExprKind::OpaqueVar(inner) => eval_double(inner),
        ExprKind::Sum(terms) => terms.iter().try_fold(0.0, |acc, t| eval_double(t).map(|v| acc + v)),
        ExprKind::Prod(factors) => factors.iter().try_fold(1.0, |acc, f| eval_double(f).map(|v| acc * v)),
        ExprKind::Pow(base, exp) => Some(eval_double(base)?.powf(eval_double(exp)?)),
        ExprKind::IntDiv(n, d) => {
            let d = eval_double(d)?;
            if d == 0.0 {
                None
            } else {
                Some((eval_double(n)? / d).floor())
            }
        }
        ExprKind::Mod(n, d) => {
            let d = eval_double(d)?;
            if d == 0.0 {
                None
            } else {
                Some(eval_double(n)? % d)
            }
        }
        ExprKind::Log(base, x) => Some(eval_double(x)?.log(eval_double(base)?)),
        ExprKind::Floor(inner) => Some(eval_double(inner)?.floor()),
        ExprKind::Ceil(inner) => Some(eval_double(inner)?.ceil()),
        ExprKind::Abs(inner) => Some(eval_double(inner)?.abs()),
        ExprKind::BigSum(d) => {
            let from = eval_double(&d.from)?;
            let up_to = eval_double(&d.up_to)?;
            if up_to < from {
                return Some(0.0);
            }
            let body = eval_double(&d.body)?;
            Some(body * (up_to - from + 1.0))
        }
    }
}

fn overflow() -> ArithError {
    ArithError::not_evaluable("integer overflow during evaluation")
}

fn const_pow(base: i64, exp: i64) -> Result<i64> {
    if exp < 0 {
        return match base {
            1 => Ok(1),
            -1 => Ok(if exp % 2 == 0 { 1 } else { -1 }),
            _ => Err(ArithError::not_evaluable("negative exponent of a non-unit base")),
        };
    }
    let exp = u32::try_from(exp).map_err(|_| overflow())?;
    base.checked_pow(exp).ok_or_else(overflow)
}

/// Floor division: rounds toward negative infinity rather than Rust's
/// native truncating `/`.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if (r != 0) && ((r < 0) != (b < 0)) { q - 1 } else { q }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn evaluates_constant_arithmetic() {
        let sum = crate::expr::raw::sum(vec![
            Arc::new(Expr::constant(2)),
            Arc::new(Expr::constant(3)),
        ]);
        assert_eq!(eval(&sum), Ok(5));
    }

    #[test]
    fn free_variable_is_not_evaluable() {
        let v = Expr::var("x", None);
        assert!(matches!(eval(&v), Err(ArithError::NotEvaluable { .. })));
    }

    #[test]
    fn division_by_zero_is_a_domain_error() {
        let n = Arc::new(Expr::constant(4));
        let d = Arc::new(Expr::constant(0));
        let e = crate::expr::raw::int_div(n, d);
        assert!(matches!(eval(&e), Err(ArithError::ArithmeticDomain { .. })));
    }

    #[test]
    fn floor_div_rounds_toward_negative_infinity() {
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, 2), 3);
    }

    #[test]
    fn eval_double_handles_infinity() {
        assert_eq!(eval_double(&Expr::pos_inf()), Some(f64::INFINITY));
    }
}

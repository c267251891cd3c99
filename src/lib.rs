#![forbid(unsafe_code)]
//! Normalizing symbolic arithmetic kernel for integer/rational index
//! expressions.
//!
//! Built for a polyhedral loop-optimization compiler: every term is a
//! closed integer-arithmetic expression (sums, products, powers, floor
//! division, C-style modulo, conditionals, closed-form symbolic
//! summation) that a smart constructor keeps in a canonical normal
//! form as it's built, rather than requiring a separate rewrite pass.
//!
//! ```
//! use loop_arith::{add, const_, mul, pos_var};
//!
//! let n = pos_var("n");
//! let e = add(mul(const_(2), n), const_(1));
//! assert!(e.to_string().contains('+'));
//! ```

mod decision;
mod display;
mod error;
mod eval;
mod expr;
mod predicate;
mod range;
mod simplify;
mod symbol;

use std::sync::Arc;

pub use decision::{contains, gcd, is_smaller, multiple_of, substitute, visit, visit_until};
pub use error::{ArithError, Result};
pub use eval::{eval, eval_double};
pub use expr::{BigSumData, Expr, ExprKind, LookupData, NamedFnData, VarData};
pub use predicate::{CmpOp, Predicate};
pub use range::{Range, Sign};
pub use simplify::driver::{Driver, simplify};

/// An integer literal.
#[must_use]
pub fn const_(n: i64) -> Arc<Expr> {
    Arc::new(Expr::constant(n))
}

/// `+infinity`.
#[must_use]
pub fn pos_inf() -> Arc<Expr> {
    Arc::new(Expr::pos_inf())
}

/// `-infinity`.
#[must_use]
pub fn neg_inf() -> Arc<Expr> {
    Arc::new(Expr::neg_inf())
}

/// A value about which nothing is known.
#[must_use]
pub fn unknown() -> Arc<Expr> {
    Arc::new(Expr::unknown())
}

/// A fresh symbolic variable, collapsing to a constant if `range` pins
/// it to a single value.
#[must_use]
pub fn var(name: impl Into<Arc<str>>, range: Option<Arc<Range>>) -> Arc<Expr> {
    simplify::var::var(name, range)
}

/// A variable ranging over `[0, +inf)`.
#[must_use]
pub fn pos_var(name: impl Into<Arc<str>>) -> Arc<Expr> {
    var(name, Some(Arc::new(Range::StartFrom(const_(0)))))
}

/// A variable ranging over `[1, +inf)` (a loop trip count or array size).
#[must_use]
pub fn size_var(name: impl Into<Arc<str>>) -> Arc<Expr> {
    var(name, Some(Arc::new(Range::StartFrom(const_(1)))))
}

/// A symbolic uninterpreted function value.
#[must_use]
pub fn named_fn(name: impl Into<Arc<str>>, range: Option<Arc<Range>>) -> Arc<Expr> {
    Arc::new(Expr::named_fn(name, range))
}

/// An indexed read into a literal table.
#[must_use]
pub fn lookup(table: Vec<Arc<Expr>>, index: Arc<Expr>) -> Arc<Expr> {
    simplify::lookup::lookup(table, index)
}

/// `sum_{i=from}^{upTo} body(i)`, inclusive both ends.
#[must_use]
pub fn big_sum(
    name: impl Into<Arc<str>>,
    from: Arc<Expr>,
    up_to: Arc<Expr>,
    body: impl FnOnce(Arc<Expr>) -> Arc<Expr>,
) -> Arc<Expr> {
    simplify::big_sum::big_sum(name, from, up_to, body)
}

/// `a + b`.
#[must_use]
pub fn add(a: Arc<Expr>, b: Arc<Expr>) -> Arc<Expr> {
    simplify::sum::sum(vec![a, b])
}

/// `a - b`.
#[must_use]
pub fn sub(a: Arc<Expr>, b: Arc<Expr>) -> Arc<Expr> {
    simplify::sum::sum(vec![a, simplify::product::product(vec![const_(-1), b])])
}

/// `a * b`.
#[must_use]
pub fn mul(a: Arc<Expr>, b: Arc<Expr>) -> Arc<Expr> {
    simplify::product::product(vec![a, b])
}

/// `base ^ exponent`.
#[must_use]
pub fn pow(base: Arc<Expr>, exponent: Arc<Expr>) -> Arc<Expr> {
    simplify::pow::pow(base, exponent)
}

/// Integer (floor) division `n / d`.
///
/// # Errors
///
/// Returns [`ArithError::ArithmeticDomain`] when `d` is provably zero.
pub fn int_div(n: Arc<Expr>, d: Arc<Expr>) -> Result<Arc<Expr>> {
    simplify::int_div::int_div(n, d)
}

/// Ordinal division `a /^ b`, modeled as `a * b^(-1)`.
#[must_use]
pub fn ordinal_div(a: Arc<Expr>, b: Arc<Expr>) -> Arc<Expr> {
    mul(a, pow(b, const_(-1)))
}

/// C-style remainder `n % d`.
///
/// # Errors
///
/// Returns [`ArithError::ArithmeticDomain`] when `d` is provably zero.
pub fn modulo(n: Arc<Expr>, d: Arc<Expr>) -> Result<Arc<Expr>> {
    simplify::modulo::modulo(n, d)
}

/// `floor(e)`.
#[must_use]
pub fn floor(e: Arc<Expr>) -> Arc<Expr> {
    simplify::unary::floor(e)
}

/// `ceil(e)`.
#[must_use]
pub fn ceil(e: Arc<Expr>) -> Arc<Expr> {
    simplify::unary::ceil(e)
}

/// `abs(e)`.
#[must_use]
pub fn abs(e: Arc<Expr>) -> Arc<Expr> {
    simplify::unary::abs(e)
}

/// `if pred then t else e`, where `pred` is `lhs op rhs`.
#[must_use]
pub fn if_then_else(lhs: Arc<Expr>, op: CmpOp, rhs: Arc<Expr>, t: Arc<Expr>, e: Arc<Expr>) -> Arc<Expr> {
    simplify::cond::if_then_else(Predicate::new(lhs, rhs, op), t, e)
}

/// `lhs < rhs`.
#[must_use]
pub fn lt(lhs: Arc<Expr>, rhs: Arc<Expr>) -> Predicate {
    Predicate::new(lhs, rhs, CmpOp::Lt)
}

/// `lhs <= rhs`.
#[must_use]
pub fn le(lhs: Arc<Expr>, rhs: Arc<Expr>) -> Predicate {
    Predicate::new(lhs, rhs, CmpOp::Le)
}

/// `lhs > rhs`.
#[must_use]
pub fn gt(lhs: Arc<Expr>, rhs: Arc<Expr>) -> Predicate {
    Predicate::new(lhs, rhs, CmpOp::Gt)
}

/// `lhs >= rhs`.
#[must_use]
pub fn ge(lhs: Arc<Expr>, rhs: Arc<Expr>) -> Predicate {
    Predicate::new(lhs, rhs, CmpOp::Ge)
}

/// `lhs == rhs`.
#[must_use]
pub fn eq(lhs: Arc<Expr>, rhs: Arc<Expr>) -> Predicate {
    Predicate::new(lhs, rhs, CmpOp::Eq)
}

/// `lhs != rhs`.
#[must_use]
pub fn ne(lhs: Arc<Expr>, rhs: Arc<Expr>) -> Predicate {
    Predicate::new(lhs, rhs, CmpOp::Ne)
}

/// This expression's sign.
#[must_use]
pub fn sign(e: &Expr) -> Sign {
    expr::sign::sign(e)
}

/// A sound, possibly-loose lower bound.
#[must_use]
pub fn min(e: &Expr) -> Arc<Expr> {
    expr::sign::min(e)
}

/// A sound, possibly-loose upper bound.
#[must_use]
pub fn max(e: &Expr) -> Arc<Expr> {
    expr::sign::max(e)
}

/// `e` with every free variable replaced by its own range minimum.
///
/// # Errors
///
/// Returns [`ArithError::ArithmeticDomain`] if substituting a variable's
/// minimum produces a malformed division or modulo.
pub fn at_min(e: &Arc<Expr>) -> Result<Arc<Expr>> {
    substitute(e, &mut |n| match n.kind() {
        ExprKind::Var(v) => v.range.as_ref().and_then(|r| r.min()),
        _ => None,
    })
}

/// `e` with every free variable replaced by its own range maximum.
///
/// # Errors
///
/// Returns [`ArithError::ArithmeticDomain`] if substituting a variable's
/// maximum produces a malformed division or modulo.
pub fn at_max(e: &Arc<Expr>) -> Result<Arc<Expr>> {
    substitute(e, &mut |n| match n.kind() {
        ExprKind::Var(v) => v.range.as_ref().and_then(|r| r.max()),
        _ => None,
    })
}

/// Whether `e` is closed (no free `Var`/`NamedFn`/`Lookup`/`IfThenElse`,
/// no infinity or `Unknown`) and therefore evaluable.
#[must_use]
pub fn is_evaluable(e: &Expr) -> bool {
    eval(e).is_ok()
}

/// Every distinct variable `id` reachable from `e`.
#[must_use]
pub fn var_list(e: &Arc<Expr>) -> Vec<u64> {
    decision::traverse::var_ids(e)
}

/// `e`'s structural digest (a fast-reject filter, not a proof of
/// equality).
#[must_use]
pub fn digest(e: &Expr) -> u64 {
    e.digest()
}

/// Whether `e` could possibly take a negative value (a conservative
/// `true` when the sign isn't provably nonnegative).
#[must_use]
pub fn might_be_negative(e: &Expr) -> bool {
    !matches!(sign(e), Sign::Positive)
}

/// `if a < b then a else b`.
#[must_use]
pub fn math_min(a: Arc<Expr>, b: Arc<Expr>) -> Arc<Expr> {
    if_then_else(Arc::clone(&a), CmpOp::Lt, Arc::clone(&b), a, b)
}

/// `if a > b then a else b`.
#[must_use]
pub fn math_max(a: Arc<Expr>, b: Arc<Expr>) -> Arc<Expr> {
    if_then_else(Arc::clone(&a), CmpOp::Gt, Arc::clone(&b), a, b)
}

/// `math_min(math_max(x, lo), hi)`.
#[must_use]
pub fn math_clamp(x: Arc<Expr>, lo: Arc<Expr>, hi: Arc<Expr>) -> Arc<Expr> {
    math_min(math_max(x, lo), hi)
}

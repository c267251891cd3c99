//! Property and scenario tests driven through the public API only.
//!
//! Quantified invariants use `quickcheck` over a small hand-rolled
//! generator (additive/multiplicative expressions over a three-variable
//! pool); the generator stays shallow so shrinking stays useful.

use std::sync::Arc;

use loop_arith::{
    Expr, ExprKind, add, big_sum, const_, eval, gcd, if_then_else, int_div, is_smaller, modulo,
    multiple_of, mul, simplify, sub, substitute, var, CmpOp,
};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

fn init() {
    let _ = dotenvy::dotenv();
}

const VAR_POOL: [&str; 3] = ["a", "b", "c"];

#[derive(Clone, Debug)]
struct SmallExpr(Arc<Expr>);

impl Arbitrary for SmallExpr {
    fn arbitrary(g: &mut Gen) -> Self {
        SmallExpr(gen_expr(g, 3))
    }
}

fn gen_expr(g: &mut Gen, depth: u32) -> Arc<Expr> {
    if depth == 0 {
        return gen_leaf(g);
    }
    match u8::arbitrary(g) % 4 {
        0 => gen_leaf(g),
        1 => add(gen_expr(g, depth - 1), gen_expr(g, depth - 1)),
        2 => mul(gen_expr(g, depth - 1), gen_expr(g, depth - 1)),
        _ => sub(gen_expr(g, depth - 1), gen_expr(g, depth - 1)),
    }
}

fn gen_leaf(g: &mut Gen) -> Arc<Expr> {
    if bool::arbitrary(g) {
        const_(i64::from(i16::arbitrary(g)))
    } else {
        let idx = (u8::arbitrary(g) as usize) % VAR_POOL.len();
        var(VAR_POOL[idx], None)
    }
}

// =============================================================================
// Quantified invariants
// =============================================================================

#[quickcheck]
fn simplify_is_idempotent(e: SmallExpr) -> bool {
    let once = simplify(Arc::clone(&e.0)).expect("additive/multiplicative tree always simplifies");
    let twice = simplify(Arc::clone(&once)).expect("idempotent simplify cannot fail");
    once == twice
}

#[quickcheck]
fn addition_is_commutative(a: SmallExpr, b: SmallExpr) -> bool {
    add(Arc::clone(&a.0), Arc::clone(&b.0)) == add(b.0, a.0)
}

#[quickcheck]
fn multiplication_is_commutative(a: SmallExpr, b: SmallExpr) -> bool {
    mul(Arc::clone(&a.0), Arc::clone(&b.0)) == mul(b.0, a.0)
}

#[quickcheck]
fn self_subtraction_is_zero(a: SmallExpr) -> bool {
    sub(Arc::clone(&a.0), a.0).as_const() == Some(0)
}

#[quickcheck]
fn closing_every_variable_makes_an_expression_evaluable(e: SmallExpr) -> bool {
    let closed = substitute(&e.0, &mut |n| match n.kind() {
        ExprKind::Var(_) => Some(const_(1)),
        _ => None,
    })
    .expect("closing a +,-,* tree with a constant cannot fail");
    eval(&closed).is_ok()
}

#[quickcheck]
fn product_is_a_multiple_of_its_own_factor(a: i16, b: i16) -> bool {
    let (a, b) = (i64::from(a), i64::from(b));
    let product = mul(const_(a), const_(b));
    multiple_of(&product, &const_(b))
}

#[quickcheck]
fn gcd_divides_both_operands(a: i16, b: i16) -> bool {
    let (a, b) = (i64::from(a), i64::from(b));
    if a == 0 && b == 0 {
        return true;
    }
    let g = gcd(&const_(a), &const_(b)).as_const().expect("gcd of two constants is a constant");
    g != 0 && a % g == 0 && b % g == 0
}

#[quickcheck]
fn is_smaller_is_sound_on_constants(a: i16, b: i16) -> bool {
    let (a, b) = (i64::from(a), i64::from(b));
    match is_smaller(&const_(a), &const_(b)) {
        Some(true) => a < b,
        Some(false) => a >= b,
        None => true,
    }
}

#[quickcheck]
fn modulo_matches_dividend_sign_and_is_bounded_by_divisor(a: i16, b: i16) -> bool {
    let (a, b) = (i64::from(a), i64::from(b));
    if b == 0 {
        return true;
    }
    let Ok(m) = modulo(const_(a), const_(b)) else {
        return false;
    };
    let mv = m.as_const().expect("modulo of two constants is a constant");
    (mv == 0 || (mv < 0) == (a < 0)) && mv.abs() < b.abs()
}

// =============================================================================
// Boundary behaviors
// =============================================================================

#[test]
fn division_by_zero_is_an_arithmetic_domain_error() {
    init();
    assert!(int_div(const_(5), const_(0)).is_err());
    assert!(modulo(const_(5), const_(0)).is_err());
}

#[test]
fn zero_to_the_zero_is_one() {
    init();
    let p = loop_arith::pow(const_(0), const_(0));
    assert_eq!(p.as_const(), Some(1));
}

#[test]
fn negative_modulo_follows_c_rules() {
    init();
    let m = modulo(const_(-7), const_(3)).expect("nonzero divisor");
    assert_eq!(m.as_const(), Some(-1));
}

#[test]
fn int_div_floors_toward_negative_infinity() {
    init();
    let q = int_div(const_(-7), const_(2)).expect("nonzero divisor");
    assert_eq!(q.as_const(), Some(-4));
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn big_sum_closed_forms() {
    init();
    assert_eq!(big_sum("i", const_(0), const_(0), |_| const_(1)).as_const(), Some(1));
    assert_eq!(big_sum("i", const_(0), const_(9), |_| const_(1)).as_const(), Some(10));
    assert_eq!(big_sum("i", const_(0), const_(9), |i| i).as_const(), Some(45));
    assert_eq!(
        big_sum("i", const_(0), const_(9), |i| mul(const_(2), i)).as_const(),
        Some(90)
    );
    let conditional = big_sum("i", const_(0), const_(10), |i| {
        if_then_else(
            Arc::clone(&i),
            CmpOp::Lt,
            const_(5),
            Arc::clone(&i),
            mul(const_(2), i),
        )
    });
    assert_eq!(conditional.as_const(), Some(100));
}

#[test]
fn big_sum_of_a_sum_distributes_over_two_free_variables() {
    init();
    let x = var("x", None);
    let y = var("y", None);
    let s = big_sum("i", const_(0), const_(9), move |_| add(Arc::clone(&x), Arc::clone(&y)));
    // 10*x + 10*y, so substituting x=1, y=1 should yield 20.
    let closed = substitute(&s, &mut |n| match n.kind() {
        ExprKind::Var(_) => Some(const_(1)),
        _ => None,
    })
    .expect("closing with constants cannot fail");
    assert_eq!(eval(&closed), Ok(20));
}

#[test]
fn substituting_concrete_values_folds_to_constants() {
    init();
    let a = var("a", None);
    let c = var("c", None);
    let expr1 = int_div(mul(const_(-1), Arc::clone(&a)), Arc::clone(&c))
        .expect("a free-variable divisor is not yet provably zero");
    let closed1 = substitute(&expr1, &mut |n| {
        if n == &a {
            Some(const_(12))
        } else if n == &c {
            Some(const_(2))
        } else {
            None
        }
    })
    .expect("substituting constants for a and c cannot fail");
    assert_eq!(closed1.as_const(), Some(-6));

    let b = var("b", None);
    let c2 = var("c", None);
    let inner = add(const_(1), mul(const_(-1), Arc::clone(&b)));
    let expr2 = sub(
        modulo(inner, Arc::clone(&c2)).expect("a free-variable divisor is not yet provably zero"),
        const_(1),
    );
    let closed2 = substitute(&expr2, &mut |n| {
        if n == &b {
            Some(const_(57))
        } else if n == &c2 {
            Some(const_(2))
        } else {
            None
        }
    })
    .expect("substituting constants for b and c cannot fail");
    assert_eq!(closed2.as_const(), Some(-1));
}

#[test]
fn like_terms_combine_only_when_the_body_matches_exactly() {
    init();
    let a = var("a", None);
    let b = var("b", None);
    let ab = mul(Arc::clone(&a), Arc::clone(&b));

    let combined = add(mul(const_(6), Arc::clone(&ab)), mul(const_(5), Arc::clone(&ab)));
    let direct = mul(const_(11), ab);
    assert_eq!(combined, direct);

    let not_combined = add(mul(const_(6), mul(Arc::clone(&a), Arc::clone(&b))), mul(const_(5), Arc::clone(&a)));
    let wrong_target = mul(const_(11), mul(a, b));
    assert_ne!(not_combined, wrong_target);
}

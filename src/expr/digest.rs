//! Structural digest for expressions.
//!
//! Every [`super::ExprKind`] variant mixes a per-variant seed with its
//! children's digests. Ordered (non-commutative) children are combined
//! with XOR against a bitwise complement so that swapping, say, a
//! numerator and denominator does not silently produce the same digest;
//! commutative children (`Sum`/`Prod` terms) are combined with plain XOR
//! so that canonical sorting never has to re-derive the digest.
//!
//! A digest match is a necessary but not sufficient condition for
//! equality: two structurally different expressions may collide. The
//! engine always confirms with structural equality (see
//! [`super::ExprKind`]'s `PartialEq` impl) before acting on a digest
//! match.

mod seed {
    pub const CONST: u64 = 0x01;
    pub const POS_INF: u64 = 0x02;
    pub const NEG_INF: u64 = 0x03;
    pub const UNKNOWN: u64 = 0x04;
    pub const VAR: u64 = 0x05;
    pub const OPAQUE_VAR: u64 = 0x06;
    pub const NAMED_FN: u64 = 0x07;
    pub const LOOKUP: u64 = 0x08;
    pub const SUM: u64 = 0x09;
    pub const PROD: u64 = 0x0A;
    pub const POW: u64 = 0x0B;
    pub const INT_DIV: u64 = 0x0C;
    pub const MOD: u64 = 0x0D;
    pub const LOG: u64 = 0x0E;
    pub const FLOOR: u64 = 0x0F;
    pub const CEIL: u64 = 0x10;
    pub const ABS: u64 = 0x11;
    pub const IF_THEN_ELSE: u64 = 0x12;
    pub const BIG_SUM: u64 = 0x13;
}

/// SplitMix64 finalizer, used to avalanche a raw value before mixing it
/// into an accumulator.
#[inline]
pub(crate) fn avalanche(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Combine two digests where order matters (numerator vs. denominator,
/// base vs. exponent, dividend vs. divisor): complement the right-hand
/// side before folding it in so the two positions never agree by chance.
#[inline]
pub(crate) fn mix_ordered(seed: u64, left: u64, right: u64) -> u64 {
    seed ^ avalanche(left) ^ !avalanche(right)
}

/// Combine a sequence of digests where order does not matter (`Sum`
/// terms, `Prod` factors): plain XOR is commutative and associative, so
/// re-sorting the children never changes the result.
#[inline]
pub(crate) fn mix_commutative(seed: u64, children: impl Iterator<Item = u64>) -> u64 {
    children.fold(seed, |acc, h| acc ^ avalanche(h))
}

/// Combine a sequence of digests where order *does* matter (a literal
/// `Lookup` table): roll the accumulator so position contributes to the
/// result, unlike [`mix_commutative`].
#[inline]
pub(crate) fn mix_positional(seed: u64, children: impl Iterator<Item = u64>) -> u64 {
    children.fold(seed, |acc, h| acc.rotate_left(1) ^ avalanche(h))
}

#[inline]
pub(crate) fn mix_unary(seed: u64, child: u64) -> u64 {
    seed ^ avalanche(child)
}

pub(crate) use seed::{
    ABS, BIG_SUM, CEIL, CONST, FLOOR, IF_THEN_ELSE, INT_DIV, LOG, LOOKUP, MOD, NAMED_FN, NEG_INF,
    OPAQUE_VAR, POS_INF, POW, PROD, SUM, UNKNOWN, VAR,
};

use super::{ExprKind, hash_str};

/// Compute the structural digest of a kind, recursing through child
/// digests (already memoized on each `Arc<Expr>`, so this is linear in
/// the size of the immediate node, not the whole subtree).
pub(crate) fn of_kind(kind: &ExprKind) -> u64 {
    match kind {
        ExprKind::Const(n) => mix_unary(CONST, *n as u64),
        ExprKind::PosInf => avalanche(POS_INF),
        ExprKind::NegInf => avalanche(NEG_INF),
        ExprKind::Unknown => avalanche(UNKNOWN),
        ExprKind::Var(v) => mix_unary(VAR, v.id),
        ExprKind::OpaqueVar(inner) => mix_unary(OPAQUE_VAR, inner.digest()),
        ExprKind::NamedFn(d) => mix_unary(NAMED_FN, hash_str(&d.name)),
        ExprKind::Lookup(d) => {
            let table_digest = mix_positional(LOOKUP, d.table.iter().map(|e| e.digest()));
            mix_ordered(table_digest, d.index.digest(), d.id)
        }
        ExprKind::Sum(terms) => mix_commutative(SUM, terms.iter().map(|e| e.digest())),
        ExprKind::Prod(factors) => mix_commutative(PROD, factors.iter().map(|e| e.digest())),
        ExprKind::Pow(base, exp) => mix_ordered(POW, base.digest(), exp.digest()),
        ExprKind::IntDiv(n, d) => mix_ordered(INT_DIV, n.digest(), d.digest()),
        ExprKind::Mod(n, d) => mix_ordered(MOD, n.digest(), d.digest()),
        ExprKind::Log(base, x) => mix_ordered(LOG, base.digest(), x.digest()),
        ExprKind::Floor(e) => mix_unary(FLOOR, e.digest()),
        ExprKind::Ceil(e) => mix_unary(CEIL, e.digest()),
        ExprKind::Abs(e) => mix_unary(ABS, e.digest()),
        ExprKind::IfThenElse(pred, t, e) => {
            mix_ordered(IF_THEN_ELSE, pred.digest(), mix_ordered(0, t.digest(), e.digest()))
        }
        ExprKind::BigSum(d) => {
            let bounds = mix_ordered(BIG_SUM, d.from.digest(), d.up_to.digest());
            mix_ordered(bounds, d.var_id, d.body.digest())
        }
    }
}

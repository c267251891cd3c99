//! Comparison atoms used by `IfThenElse` conditions.

use std::sync::Arc;

use crate::expr::Expr;
use crate::expr::digest::{avalanche, mix_ordered};

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl CmpOp {
    /// Apply this operator to two already-evaluated integers.
    #[must_use]
    pub fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }

    /// The per-variant seed contribution used by [`Predicate::digest`].
    fn seed(self) -> u64 {
        match self {
            Self::Lt => 0x101,
            Self::Le => 0x102,
            Self::Gt => 0x103,
            Self::Ge => 0x104,
            Self::Eq => 0x105,
            Self::Ne => 0x106,
        }
    }
}

/// An immutable comparison `(lhs, rhs, op)`.
///
/// Predicates carry no evaluation logic of their own; they only become
/// decidable inside the `IfThenElse` simplifier, which evaluates both
/// sides when they are constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    lhs: Arc<Expr>,
    rhs: Arc<Expr>,
    op: CmpOp,
}

impl Predicate {
    /// Build a predicate from its parts.
    #[must_use]
    pub fn new(lhs: Arc<Expr>, rhs: Arc<Expr>, op: CmpOp) -> Self {
        Self { lhs, rhs, op }
    }

    /// The left-hand side.
    #[must_use]
    pub fn lhs(&self) -> &Arc<Expr> {
        &self.lhs
    }

    /// The right-hand side.
    #[must_use]
    pub fn rhs(&self) -> &Arc<Expr> {
        &self.rhs
    }

    /// The comparison operator.
    #[must_use]
    pub fn op(&self) -> CmpOp {
        self.op
    }

    /// Evaluate the predicate when both sides are closed constants.
    #[must_use]
    pub fn eval_const(&self) -> Option<bool> {
        let l = self.lhs.as_const()?;
        let r = self.rhs.as_const()?;
        Some(self.op.apply(l, r))
    }

    /// This predicate's structural digest, mixed with the same
    /// ordered-pair scheme `Expr` uses for asymmetric children.
    #[must_use]
    pub fn digest(&self) -> u64 {
        mix_ordered(self.op.seed(), self.lhs.digest(), self.rhs.digest()) ^ avalanche(self.op.seed())
    }
}

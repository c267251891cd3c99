//! Top-level fixpoint driver: re-applies every smart constructor
//! bottom-up until the tree stops changing or fuel runs out.
//!
//! Most callers never need this: the public operator/constructor API
//! builds already-simplified trees bottom-up through the smart
//! constructors in this module. `simplify` exists for a client that
//! hand-assembles a tree out of raw nodes (or receives one across an
//! API boundary) and needs it re-normalized.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::error::{ArithError, Result};
use crate::expr::{Expr, ExprKind};
use crate::predicate::Predicate;

const DEFAULT_FUEL: usize = 1000;

fn trace_enabled() -> bool {
    std::env::var("LOOP_ARITH_TRACE")
        .is_ok_and(|v| v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true"))
}

/// Re-normalize `e` using the default fuel budget.
pub fn simplify(e: Arc<Expr>) -> Result<Arc<Expr>> {
    Driver::default().simplify(e)
}

/// A configurable fixpoint driver. Embedding clients that need a
/// different fuel budget than the default can build one with
/// [`Driver::with_fuel`].
pub struct Driver {
    fuel: usize,
}

impl Default for Driver {
    fn default() -> Self {
        Self { fuel: DEFAULT_FUEL }
    }
}

impl Driver {
    /// Override the fuel budget (default 1000).
    #[must_use]
    pub fn with_fuel(mut self, fuel: usize) -> Self {
        self.fuel = fuel;
        self
    }

    /// Dispatch on `e`'s root constructor, iterating to a fixpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ArithError::FixpointExhausted`] if the fuel budget
    /// reaches zero without converging or a cycle being detected.
    pub fn simplify(&self, e: Arc<Expr>) -> Result<Arc<Expr>> {
        let mut current = self.rebuild_one_level(e)?;
        let mut visited: FxHashSet<u64> = FxHashSet::default();
        let mut fuel = self.fuel;

        loop {
            if !visited.insert(current.digest()) {
                if trace_enabled() {
                    eprintln!("cycle detected during simplification, returning last expression");
                }
                return Ok(current);
            }
            if fuel == 0 {
                return Err(ArithError::FixpointExhausted { fuel: self.fuel });
            }
            fuel -= 1;

            let next = self.rebuild_one_level(Arc::clone(&current))?;
            if next == current {
                return Ok(current);
            }
            if trace_enabled() {
                eprintln!(
                    "simplify: {:#x} -> {:#x}",
                    current.digest(),
                    next.digest()
                );
            }
            current = next;
        }
    }

    /// Recursively simplify `e`'s children then re-apply the smart
    /// constructor matching its root kind. Already-simplified nodes are
    /// a no-op (smart constructors never produce further-reducible
    /// shapes on their own output).
    fn rebuild_one_level(&self, e: Arc<Expr>) -> Result<Arc<Expr>> {
        if e.is_simplified() {
            return Ok(e);
        }
        match e.kind() {
            ExprKind::Const(_) | ExprKind::PosInf | ExprKind::NegInf | ExprKind::Unknown => Ok(e),
            ExprKind::Var(v) => Ok(crate::simplify::var::rebuild(
                v.id,
                Arc::clone(&v.name),
                v.range.clone(),
            )),
            ExprKind::OpaqueVar(inner) => {
                let s = self.simplify(Arc::clone(inner))?;
                Ok(Arc::new(Expr::opaque_var(s)))
            }
            ExprKind::NamedFn(_) => Ok(e),
            ExprKind::Lookup(d) => {
                let table = d
                    .table
                    .iter()
                    .map(|t| self.simplify(Arc::clone(t)))
                    .collect::<Result<Vec<_>>>()?;
                let index = self.simplify(Arc::clone(&d.index))?;
                Ok(crate::simplify::lookup::lookup(table, index))
            }
            ExprKind::Sum(terms) => {
                let ts = terms
                    .iter()
                    .map(|t| self.simplify(Arc::clone(t)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(crate::simplify::sum::sum(ts))
            }
            ExprKind::Prod(factors) => {
                let fs = factors
                    .iter()
                    .map(|f| self.simplify(Arc::clone(f)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(crate::simplify::product::product(fs))
            }
            ExprKind::Pow(b, ex) => {
                let b = self.simplify(Arc::clone(b))?;
                let ex = self.simplify(Arc::clone(ex))?;
                Ok(crate::simplify::pow::pow(b, ex))
            }
            ExprKind::IntDiv(n, d) => {
                let n = self.simplify(Arc::clone(n))?;
                let d = self.simplify(Arc::clone(d))?;
                crate::simplify::int_div::int_div(n, d)
            }
            ExprKind::Mod(n, d) => {
                let n = self.simplify(Arc::clone(n))?;
                let d = self.simplify(Arc::clone(d))?;
                crate::simplify::modulo::modulo(n, d)
            }
            ExprKind::Log(b, x) => {
                let b = self.simplify(Arc::clone(b))?;
                let x = self.simplify(Arc::clone(x))?;
                Ok(crate::expr::raw::log(b, x))
            }
            ExprKind::Floor(inner) => Ok(crate::simplify::unary::floor(self.simplify(Arc::clone(inner))?)),
            ExprKind::Ceil(inner) => Ok(crate::simplify::unary::ceil(self.simplify(Arc::clone(inner))?)),
            ExprKind::Abs(inner) => Ok(crate::simplify::unary::abs(self.simplify(Arc::clone(inner))?)),
            ExprKind::IfThenElse(pred, t, el) => {
                let lhs = self.simplify(Arc::clone(pred.lhs()))?;
                let rhs = self.simplify(Arc::clone(pred.rhs()))?;
                let then_branch = self.simplify(Arc::clone(t))?;
                let else_branch = self.simplify(Arc::clone(el))?;
                Ok(crate::simplify::cond::if_then_else(
                    Predicate::new(lhs, rhs, pred.op()),
                    then_branch,
                    else_branch,
                ))
            }
            ExprKind::BigSum(d) => {
                let from = self.simplify(Arc::clone(&d.from))?;
                let up_to = self.simplify(Arc::clone(&d.up_to))?;
                let body = self.simplify(Arc::clone(&d.body))?;
                Ok(crate::simplify::big_sum::rebuild(
                    d.var_id,
                    Arc::clone(&d.var_name),
                    from,
                    up_to,
                    body,
                ))
            }
        }
    }
}

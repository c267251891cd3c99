//! Smart constructors and the fixpoint driver.
//!
//! One module per term kind, each enforcing the normal-form invariants
//! plus its own kind-specific rewrites. Every public function here
//! returns an already-simplified `Arc<Expr>` (or `Err` for the two
//! kinds that can fail: `IntDiv`/`Mod` by a provably-zero divisor).

pub mod big_sum;
pub mod cond;
pub mod driver;
pub mod int_div;
pub mod lookup;
pub mod modulo;
pub mod pow;
pub mod product;
pub mod sum;
pub mod unary;
pub mod var;

pub use driver::simplify;

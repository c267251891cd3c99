//! Decision procedures: `gcd`, `multipleOf`, `isSmaller`, and the
//! traversal family `contains`/`visit`/`visitUntil`/`substitute`.
//!
//! Every procedure here is intentionally partial: a `None` or `false`
//! result means "not provable", never "provably false of the
//! opposite". Callers — especially the simplifiers in
//! [`crate::simplify`] — must never treat an unproven negative as a
//! proven one.

pub mod gcd;
pub mod is_smaller;
pub mod multiple_of;
pub mod traverse;

pub use gcd::gcd;
pub use is_smaller::is_smaller;
pub use multiple_of::multiple_of;
pub use traverse::{contains, substitute, visit, visit_until};

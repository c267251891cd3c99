//! The expression term model, digest-based equality, and canonical
//! ordering.
//!
//! `Expr` wraps an `ExprKind` together with a precomputed structural
//! digest and a `simplified` tag: every expression returned from a
//! smart constructor has `simplified == true`. Smart constructors live
//! in [`crate::simplify`]; this module only builds the data and the
//! digest/equality/ordering machinery that the rest of the kernel is
//! built on.

pub mod digest;
pub mod ordering;
pub(crate) mod raw;
pub mod sign;

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::predicate::Predicate;
use crate::range::Range;
use crate::symbol::next_var_id;

/// A `Var`'s identity-bearing data. Equality and hashing of the
/// surrounding `ExprKind::Var` consult `id` only; `name` and `range`
/// are decorative.
#[derive(Debug, Clone)]
pub struct VarData {
    /// Process-unique identity.
    pub id: u64,
    /// Human-readable, non-identifying label.
    pub name: Arc<str>,
    /// Attached value range, if any.
    pub range: Option<Arc<Range>>,
}

/// Data for `NamedFn`: a symbolic uninterpreted function value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedFnData {
    /// The function's name.
    pub name: Arc<str>,
    /// Attached value range, if any.
    pub range: Option<Arc<Range>>,
}

/// Data for `Lookup`: an indexed read into a literal table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupData {
    /// The literal table, in table order (positional, not commutative).
    pub table: Vec<Arc<Expr>>,
    /// The index expression.
    pub index: Arc<Expr>,
    /// A disambiguating id (two lookups into textually-identical tables
    /// at different program points are not the same expression).
    pub id: u64,
}

/// Data for `BigSum(from, upTo, body(i))`: the bound variable is
/// encoded explicitly (an `id`/`name` pair) rather than as a closure,
/// since closures cannot satisfy `Eq`/`Hash`/digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigSumData {
    /// Identity of the bound summation variable.
    pub var_id: u64,
    /// Its display name.
    pub var_name: Arc<str>,
    /// Inclusive lower bound.
    pub from: Arc<Expr>,
    /// Inclusive upper bound.
    pub up_to: Arc<Expr>,
    /// Body, referencing the bound variable by `var_id`.
    pub body: Arc<Expr>,
}

/// The expression tagged union.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// A machine-integer literal.
    Const(i64),
    /// `+infinity`.
    PosInf,
    /// `-infinity`.
    NegInf,
    /// A value about which nothing is known.
    Unknown,
    /// A symbolic unknown; see [`VarData`].
    Var(VarData),
    /// Wraps a `Var`; its `min`/`max` are itself, used to freeze shared
    /// variables during `isSmaller` analysis.
    OpaqueVar(Arc<Expr>),
    /// A symbolic uninterpreted function value.
    NamedFn(NamedFnData),
    /// An indexed read into a literal table.
    Lookup(LookupData),
    /// Commutative, associative sum; invariant: `terms.len() >= 2`.
    Sum(Vec<Arc<Expr>>),
    /// Commutative, associative product; invariant: `factors.len() >= 2`.
    Prod(Vec<Arc<Expr>>),
    /// `base ^ exponent`.
    Pow(Arc<Expr>, Arc<Expr>),
    /// Floor division `num / den`.
    IntDiv(Arc<Expr>, Arc<Expr>),
    /// C remainder: `sign(result) == sign(dividend)`.
    Mod(Arc<Expr>, Arc<Expr>),
    /// `log_base(x)`.
    Log(Arc<Expr>, Arc<Expr>),
    /// `floor(e)`.
    Floor(Arc<Expr>),
    /// `ceil(e)`.
    Ceil(Arc<Expr>),
    /// `abs(e)`.
    Abs(Arc<Expr>),
    /// `if pred then t else e`.
    IfThenElse(Predicate, Arc<Expr>, Arc<Expr>),
    /// Symbolic closed-form of `sum_{i=from}^{upTo} body(i)`, inclusive.
    BigSum(BigSumData),
}

/// An immutable, reference-shared expression node.
///
/// Sharing is semantic, never observable: two `Expr`s compare equal iff
/// they are structurally identical, regardless of whether they share an
/// `Arc` allocation.
pub struct Expr {
    digest: u64,
    simplified: bool,
    kind: ExprKind,
}

impl Expr {
    /// Build a node from its kind, computing the digest and marking it
    /// `simplified` or not as requested. Used by [`raw`] and by
    /// [`crate::simplify`]'s smart constructors.
    #[must_use]
    pub(crate) fn new(kind: ExprKind, simplified: bool) -> Self {
        let digest = digest::of_kind(&kind);
        Self {
            digest,
            simplified,
            kind,
        }
    }

    /// A constant literal. Constants are always considered simplified.
    #[must_use]
    pub fn constant(n: i64) -> Self {
        Self::new(ExprKind::Const(n), true)
    }

    /// `+infinity`.
    #[must_use]
    pub fn pos_inf() -> Self {
        Self::new(ExprKind::PosInf, true)
    }

    /// `-infinity`.
    #[must_use]
    pub fn neg_inf() -> Self {
        Self::new(ExprKind::NegInf, true)
    }

    /// The distinguished `Unknown` singleton.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(ExprKind::Unknown, true)
    }

    /// A fresh symbolic variable with a process-unique id.
    #[must_use]
    pub fn var(name: impl Into<Arc<str>>, range: Option<Arc<Range>>) -> Self {
        Self::new(
            ExprKind::Var(VarData {
                id: next_var_id(),
                name: name.into(),
                range,
            }),
            true,
        )
    }

    /// Rebuild a `Var` with a preserved `id` but a (possibly) new range,
    /// as `substitute` must when rewriting inside a range.
    #[must_use]
    pub(crate) fn var_with_id(id: u64, name: Arc<str>, range: Option<Arc<Range>>) -> Self {
        Self::new(ExprKind::Var(VarData { id, name, range }), true)
    }

    /// A variable whose range starts at 0 (`PosVar`).
    #[must_use]
    pub fn pos_var(name: impl Into<Arc<str>>) -> Self {
        Self::var(
            name,
            Some(Arc::new(Range::StartFrom(Arc::new(Self::constant(0))))),
        )
    }

    /// A variable whose range starts at 1 (`SizeVar`).
    #[must_use]
    pub fn size_var(name: impl Into<Arc<str>>) -> Self {
        Self::var(
            name,
            Some(Arc::new(Range::StartFrom(Arc::new(Self::constant(1))))),
        )
    }

    /// Wrap a `Var` so its `min`/`max` are itself.
    #[must_use]
    pub fn opaque_var(var: Arc<Self>) -> Self {
        Self::new(ExprKind::OpaqueVar(var), true)
    }

    /// A symbolic uninterpreted function value.
    #[must_use]
    pub fn named_fn(name: impl Into<Arc<str>>, range: Option<Arc<Range>>) -> Self {
        Self::new(
            ExprKind::NamedFn(NamedFnData {
                name: name.into(),
                range,
            }),
            true,
        )
    }

    /// An indexed read into a literal table.
    #[must_use]
    pub fn lookup(table: Vec<Arc<Self>>, index: Arc<Self>) -> Self {
        Self::new(
            ExprKind::Lookup(LookupData {
                table,
                index,
                id: next_var_id(),
            }),
            true,
        )
    }

    /// This node's kind.
    #[must_use]
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Whether this node was produced by a smart constructor.
    #[must_use]
    pub fn is_simplified(&self) -> bool {
        self.simplified
    }

    /// This node's structural digest. A fast-reject filter, not a
    /// witness: always confirm with `==` before acting on a match.
    #[must_use]
    pub fn digest(&self) -> u64 {
        self.digest
    }

    /// The integer value, if this node is a `Const`.
    #[must_use]
    pub fn as_const(&self) -> Option<i64> {
        match &self.kind {
            ExprKind::Const(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this node is `Const(0)`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.as_const() == Some(0)
    }

    /// Whether this node is `Const(1)`.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.as_const() == Some(1)
    }
}

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl fmt::Debug for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(n) => write!(f, "Const({n})"),
            Self::PosInf => write!(f, "PosInf"),
            Self::NegInf => write!(f, "NegInf"),
            Self::Unknown => write!(f, "Unknown"),
            Self::Var(v) => write!(f, "Var({}, id={})", v.name, v.id),
            Self::OpaqueVar(v) => write!(f, "OpaqueVar({v:?})"),
            Self::NamedFn(d) => write!(f, "NamedFn({})", d.name),
            Self::Lookup(d) => write!(f, "Lookup(id={})", d.id),
            Self::Sum(ts) => write!(f, "Sum({ts:?})"),
            Self::Prod(ts) => write!(f, "Prod({ts:?})"),
            Self::Pow(b, e) => write!(f, "Pow({b:?}, {e:?})"),
            Self::IntDiv(n, d) => write!(f, "IntDiv({n:?}, {d:?})"),
            Self::Mod(n, d) => write!(f, "Mod({n:?}, {d:?})"),
            Self::Log(b, x) => write!(f, "Log({b:?}, {x:?})"),
            Self::Floor(e) => write!(f, "Floor({e:?})"),
            Self::Ceil(e) => write!(f, "Ceil({e:?})"),
            Self::Abs(e) => write!(f, "Abs({e:?})"),
            Self::IfThenElse(p, t, e) => write!(f, "IfThenElse({p:?}, {t:?}, {e:?})"),
            Self::BigSum(d) => write!(f, "BigSum({}, {:?}, {:?})", d.var_name, d.from, d.up_to),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Structural equality: `Var`s compare `id` only; every other variant
/// compares its children recursively. Hand-written rather than derived
/// so the `Var` special case can be expressed.
impl PartialEq for ExprKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Const(a), Self::Const(b)) => a == b,
            (Self::PosInf, Self::PosInf)
            | (Self::NegInf, Self::NegInf)
            | (Self::Unknown, Self::Unknown) => true,
            (Self::Var(a), Self::Var(b)) => a.id == b.id,
            (Self::OpaqueVar(a), Self::OpaqueVar(b)) => a == b,
            (Self::NamedFn(a), Self::NamedFn(b)) => a == b,
            (Self::Lookup(a), Self::Lookup(b)) => a == b,
            (Self::Sum(a), Self::Prod(b)) | (Self::Prod(b), Self::Sum(a)) => {
                let _ = (a, b);
                false
            }
            (Self::Sum(a), Self::Sum(b)) | (Self::Prod(a), Self::Prod(b)) => a == b,
            (Self::Pow(ab, ae), Self::Pow(bb, be)) => ab == bb && ae == be,
            (Self::IntDiv(an, ad), Self::IntDiv(bn, bd)) => an == bn && ad == bd,
            (Self::Mod(an, ad), Self::Mod(bn, bd)) => an == bn && ad == bd,
            (Self::Log(ab, ax), Self::Log(bb, bx)) => ab == bb && ax == bx,
            (Self::Floor(a), Self::Floor(b))
            | (Self::Ceil(a), Self::Ceil(b))
            | (Self::Abs(a), Self::Abs(b)) => a == b,
            (Self::IfThenElse(ap, at, ae), Self::IfThenElse(bp, bt, be)) => {
                ap == bp && at == bt && ae == be
            }
            (Self::BigSum(a), Self::BigSum(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ExprKind {}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.kind == other.kind
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.hash(state);
    }
}

impl PartialEq for VarData {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for VarData {}
impl Hash for VarData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Hash an arbitrary string to a `u64` using the standard library's
/// default hasher. Determinism is only required within one process —
/// expressions are never persisted or compared across processes — so
/// `DefaultHasher` is sufficient.
#[must_use]
pub(crate) fn hash_str(s: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}

//! Error types for the arithmetic kernel.
//!
//! Three kinds, per the kernel's error handling design: `ArithmeticDomain`
//! for malformed constructions, `NotEvaluable` for evaluation of open or
//! infinite terms, and `FixpointExhausted` for a rewrite-engine bug
//! surfacing through the driver's fuel counter.

use std::fmt;

/// Errors produced by the arithmetic kernel.
///
/// `ArithmeticDomain` and `FixpointExhausted` indicate either a misuse of
/// the API (dividing by a provably-zero denominator) or an engine defect
/// (the fixpoint driver ran out of fuel without converging or cycling).
/// `NotEvaluable` is an expected, recoverable outcome of evaluating an
/// open expression and is handled internally by the engine whenever it
/// probes for constant folding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArithError {
    /// Division or modulo by a provably-zero denominator, or an attempt
    /// to build a structurally malformed expression.
    ArithmeticDomain {
        /// Human-readable description of the violated domain constraint.
        msg: String,
    },
    /// `eval`/`eval_double` was invoked on a tree containing a variable,
    /// named function, lookup, conditional, or infinity.
    NotEvaluable {
        /// Description of what prevented evaluation.
        msg: String,
    },
    /// The fixpoint driver's fuel counter reached zero without the
    /// rewrite sequence converging or a cycle being detected.
    FixpointExhausted {
        /// The fuel budget that was exhausted.
        fuel: usize,
    },
}

impl ArithError {
    /// Build an `ArithmeticDomain` error.
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::ArithmeticDomain { msg: msg.into() }
    }

    /// Build a `NotEvaluable` error.
    pub fn not_evaluable(msg: impl Into<String>) -> Self {
        Self::NotEvaluable { msg: msg.into() }
    }
}

impl fmt::Display for ArithError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArithmeticDomain { msg } => write!(f, "arithmetic domain error: {msg}"),
            Self::NotEvaluable { msg } => write!(f, "expression not evaluable: {msg}"),
            Self::FixpointExhausted { fuel } => {
                write!(f, "fixpoint iteration exhausted its fuel budget ({fuel})")
            }
        }
    }
}

impl std::error::Error for ArithError {}

/// Convenience alias for fallible kernel operations.
pub type Result<T> = std::result::Result<T, ArithError>;

//! Value ranges attached to variables, and the three-valued sign lattice.
//!
//! Bounds are themselves expressions rather than raw integers: a loop
//! bound is frequently symbolic (`n - 1`, `N/2`), so `Range` is defined
//! in terms of [`Expr`] and lives in the same crate as it despite the
//! resulting mutual dependency (`Var` holds an `Arc<Range>`, `Range`
//! holds `Arc<Expr>` bounds).

use std::sync::Arc;

use crate::expr::Expr;

/// The three-valued sign lattice, with `Unknown` as top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Strictly greater than zero, or zero in the `Abs`/`Mod` sense:
    /// "positive or zero".
    Positive,
    /// Strictly less than zero.
    Negative,
    /// Not decidable from available range information.
    Unknown,
}

impl Sign {
    /// XOR of two non-zero signs, per `Prod`'s sign rule: same sign
    /// multiplies to positive, differing signs to negative, either
    /// `Unknown` propagates.
    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (a, b) if a == b => Self::Positive,
            _ => Self::Negative,
        }
    }

    /// Sign of a sum of terms that all share a sign; `Unknown` otherwise.
    #[must_use]
    pub fn sum_of(signs: impl IntoIterator<Item = Self>) -> Self {
        let mut signs = signs.into_iter();
        let Some(first) = signs.next() else {
            return Self::Unknown;
        };
        if first == Self::Unknown {
            return Self::Unknown;
        }
        if signs.all(|s| s == first) {
            first
        } else {
            Self::Unknown
        }
    }
}

/// A value range attached to a `Var`/`NamedFn`, or `Unknown` when no
/// bound information is available.
///
/// Bounds are symbolic expressions. `min`/`max`/`substitute`/`num_vals`
/// are computed on demand rather than cached: a range's bound
/// expressions can themselves be rewritten, so a cached numeric value
/// would go stale the moment a bound changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Range {
    /// `[start, +inf)`.
    StartFrom(Arc<Expr>),
    /// `(-inf, end]`.
    GoesTo(Arc<Expr>),
    /// An arithmetic progression `start, start+step, ..., <= stop`.
    RangeAdd {
        /// Inclusive lower bound of the progression.
        start: Arc<Expr>,
        /// Inclusive upper bound of the progression.
        stop: Arc<Expr>,
        /// Step between successive values; sign determines orientation.
        step: Arc<Expr>,
    },
    /// A geometric progression `start, start*mul, ..., <= stop`.
    RangeMul {
        /// Inclusive lower bound of the progression.
        start: Arc<Expr>,
        /// Inclusive upper bound of the progression.
        stop: Arc<Expr>,
        /// Multiplier between successive values.
        mul: Arc<Expr>,
    },
    /// No range information at all.
    Unknown,
}

impl Range {
    /// The range's minimum value, or `None` when it cannot be
    /// determined symbolically without further evaluation.
    #[must_use]
    pub fn min(&self) -> Option<Arc<Expr>> {
        match self {
            Self::StartFrom(start) => Some(Arc::clone(start)),
            Self::RangeAdd { start, .. } => Some(Arc::clone(start)),
            Self::RangeMul { start, .. } => Some(Arc::clone(start)),
            Self::GoesTo(_) | Self::Unknown => None,
        }
    }

    /// The range's maximum value. For `RangeAdd`, this is a *sound
    /// upper bound*, not necessarily the tightest one reachable by the
    /// progression (see DESIGN.md's Open Question decision).
    #[must_use]
    pub fn max(&self) -> Option<Arc<Expr>> {
        match self {
            Self::GoesTo(end) => Some(Arc::clone(end)),
            Self::RangeAdd { stop, .. } | Self::RangeMul { stop, .. } => Some(Arc::clone(stop)),
            Self::StartFrom(_) | Self::Unknown => None,
        }
    }

    /// Substitute every bound expression through `f`.
    #[must_use]
    pub fn substitute(&self, f: &mut impl FnMut(&Arc<Expr>) -> Arc<Expr>) -> Self {
        match self {
            Self::StartFrom(start) => Self::StartFrom(f(start)),
            Self::GoesTo(end) => Self::GoesTo(f(end)),
            Self::RangeAdd { start, stop, step } => Self::RangeAdd {
                start: f(start),
                stop: f(stop),
                step: f(step),
            },
            Self::RangeMul { start, stop, mul } => Self::RangeMul {
                start: f(start),
                stop: f(stop),
                mul: f(mul),
            },
            Self::Unknown => Self::Unknown,
        }
    }

    /// Cardinality of the reachable values, when both bounds and the
    /// step/multiplier are constants.
    ///
    /// `RangeAdd` uses `ceil((stop - start) / step)` with sign-aware
    /// orientation: a positive step counts up from `start` toward
    /// `stop`; a negative step counts down. A step whose sign points
    /// away from `stop` yields zero reachable values.
    #[must_use]
    pub fn num_vals(&self) -> Option<i64> {
        match self {
            Self::RangeAdd { start, stop, step } => {
                let (start, stop, step) = (start.as_const()?, stop.as_const()?, step.as_const()?);
                if step == 0 {
                    return None;
                }
                if step > 0 {
                    if stop < start {
                        return Some(0);
                    }
                    Some((stop - start + step) / step)
                } else {
                    if stop > start {
                        return Some(0);
                    }
                    Some((start - stop - step) / -step)
                }
            }
            Self::RangeMul { start, stop, mul } => {
                let (start, stop, mul) = (start.as_const()?, stop.as_const()?, mul.as_const()?);
                if mul <= 1 || start <= 0 {
                    return None;
                }
                let mut count = 0_i64;
                let mut value = start;
                while value <= stop {
                    count += 1;
                    value = value.checked_mul(mul)?;
                }
                Some(count)
            }
            Self::StartFrom(_) | Self::GoesTo(_) | Self::Unknown => None,
        }
    }

    /// Sign derived from this range alone (used by `Var`'s sign rule):
    /// `Positive` when `min >= 0` and the range cannot reach exactly
    /// zero from below, `Negative` when `max <= 0`.
    #[must_use]
    pub fn sign(&self) -> Sign {
        if let Some(min) = self.min() {
            if let Some(m) = min.as_const() {
                if m >= 0 {
                    return Sign::Positive;
                }
            }
        }
        if let Some(max) = self.max() {
            if let Some(m) = max.as_const() {
                if m <= 0 {
                    return Sign::Negative;
                }
            }
        }
        Sign::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    fn c(n: i64) -> Arc<Expr> {
        Arc::new(Expr::constant(n))
    }

    #[test]
    fn range_add_num_vals_counts_inclusive_steps() {
        let r = Range::RangeAdd {
            start: c(0),
            stop: c(9),
            step: c(1),
        };
        assert_eq!(r.num_vals(), Some(10));
    }

    #[test]
    fn range_add_descending_step_counts_down() {
        let r = Range::RangeAdd {
            start: c(9),
            stop: c(0),
            step: c(-3),
        };
        assert_eq!(r.num_vals(), Some(4));
    }

    #[test]
    fn start_from_zero_is_positive() {
        let r = Range::StartFrom(c(0));
        assert_eq!(r.sign(), Sign::Positive);
    }

    #[test]
    fn sign_mul_unknown_propagates() {
        assert_eq!(Sign::Positive.mul(Sign::Unknown), Sign::Unknown);
        assert_eq!(Sign::Negative.mul(Sign::Negative), Sign::Positive);
        assert_eq!(Sign::Positive.mul(Sign::Negative), Sign::Negative);
    }
}

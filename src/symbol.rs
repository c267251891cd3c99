//! Process-wide `Var` identity allocation.
//!
//! A `Var`'s `id` is the sole criterion for equality; `name` is
//! decorative. IDs come from a single atomic monotone counter, hidden
//! behind [`next_var_id`] so no caller can observe or reset it directly.
//! `AtomicU64::fetch_add` wraps on overflow: after `u64::MAX`
//! allocations the next id is `0`.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(0);

/// Allocate the next process-wide `Var` id.
///
/// Thread-safe: the only shared mutable state in the kernel.
#[inline]
pub(crate) fn next_var_id() -> u64 {
    NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::next_var_id;

    #[test]
    fn ids_are_monotone_and_unique() {
        let a = next_var_id();
        let b = next_var_id();
        let c = next_var_id();
        assert!(a < b);
        assert!(b < c);
    }
}

//! Driver loop: pivot until the support is affinely independent.

use super::nullspace::{find_affine_relation, is_affinely_independent};
use super::pivot::pivot;
use super::types::{ReduceCfg, ReduceError, WeightedSet};

/// Reduce `set` to a minimal support whose points are affinely independent.
///
/// Each pivot removes exactly one support point, so at most
/// `support_len - (dim + 1)` iterations run; any family larger than
/// `dim + 1` is automatically dependent, and an already independent input
/// returns unchanged after zero iterations. The loop is explicit (no
/// recursion) so large inputs cannot exhaust the stack.
pub fn reduce(set: WeightedSet, cfg: ReduceCfg) -> Result<WeightedSet, ReduceError> {
    // Re-check the unit-sum invariant cheaply; the certificate may have
    // been constructed long before this call.
    let sum: f64 = set.weights().iter().sum();
    if (sum - 1.0).abs() > cfg.eps_sum {
        return Err(ReduceError::WeightSumMismatch { sum });
    }

    let budget = set.support_len();
    let mut cur = set;
    let mut steps = 0usize;
    while !is_affinely_independent(cur.points(), cur.support(), cfg) {
        // Cannot bind unless the independence test is defective: the
        // support shrinks by one on every pass.
        if steps >= budget {
            return Err(ReduceError::ReductionStalled { steps });
        }
        let rel = find_affine_relation(cur.points(), cur.support(), cfg)?;
        cur = pivot(cur, &rel, cfg)?;
        steps += 1;
    }
    Ok(cur)
}

/// Convenience: reduce with default tolerances.
pub fn reduce_with_defaults(set: WeightedSet) -> Result<WeightedSet, ReduceError> {
    reduce(set, ReduceCfg::default())
}

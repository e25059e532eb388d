//! Minimum-ratio pivot: retire one support point along an affine relation.

use super::types::{AffineRelation, ReduceCfg, ReduceError, WeightedSet};

/// Eliminate one support point of `set` along the relation `rel`.
///
/// The ratio test picks `k0` minimizing `w[k] / g[k]` over `g[k] > 0`
/// (ties go to the lowest support position). Shifting every weight by
/// `t · g[k]` with `t = w[k0] / g[k0]` zeroes `w[k0]` exactly, keeps the
/// other weights nonnegative by minimality of `t`, and leaves the weight
/// sum and the represented target unchanged since the relation has zero
/// coefficient sum and zero weighted point sum.
pub fn pivot(
    set: WeightedSet,
    rel: &AffineRelation,
    cfg: ReduceCfg,
) -> Result<WeightedSet, ReduceError> {
    let g = rel.coeffs();
    let w = set.weights();
    debug_assert_eq!(g.len(), w.len(), "relation must be parallel to support");

    let mut best: Option<(usize, f64)> = None;
    for (k, (&gk, &wk)) in g.iter().zip(w).enumerate() {
        if gk > 0.0 {
            let ratio = wk / gk;
            // Strict improvement only, so the lowest position wins ties.
            if best.is_none_or(|(_, r)| ratio < r) {
                best = Some((k, ratio));
            }
        }
    }
    let (k0, t) = best.ok_or(ReduceError::NoPositiveCoefficient)?;
    debug_assert!(g[k0] > 0.0);

    let m = w.len();
    let mut support = Vec::with_capacity(m - 1);
    let mut weights = Vec::with_capacity(m - 1);
    for k in 0..m {
        if k == k0 {
            continue;
        }
        let mut wk = w[k] - t * g[k];
        if wk < 0.0 {
            if wk < -cfg.eps_weight {
                return Err(ReduceError::ExcessWeightLoss {
                    index: set.support()[k],
                    weight: wk,
                });
            }
            wk = 0.0; // rounding noise
        }
        support.push(set.support()[k]);
        weights.push(wk);
    }
    Ok(WeightedSet::from_reduced(set, support, weights))
}

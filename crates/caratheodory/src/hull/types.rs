//! Core types and tolerances for support reduction.
//!
//! - `ReduceCfg`: centralizes epsilons for rank, weight-clamp, and sum checks.
//! - `WeightedSet`: point arena + weighted support, the convex certificate.
//! - `AffineRelation`: ephemeral dependency certificate consumed by the pivot.
//! - `ReduceError`: one error enum for the whole module.

use std::fmt;

use nalgebra::DVector;

/// Reduction configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct ReduceCfg {
    /// Magnitude below which an elimination pivot candidate counts as zero.
    pub eps_pivot: f64,
    /// Clamp window for post-pivot weights: values in `[-eps_weight, 0)` are
    /// rounding noise and clamp to zero; anything below is a logic error.
    pub eps_weight: f64,
    /// Entry tolerance on `sum(weights) = 1`.
    pub eps_sum: f64,
}

impl Default for ReduceCfg {
    fn default() -> Self {
        Self {
            eps_pivot: 1e-12,
            eps_weight: 1e-9,
            eps_sum: 1e-9,
        }
    }
}

/// Errors surfaced by validation and the reduction pipeline.
#[derive(Debug)]
pub enum ReduceError {
    /// No points were given.
    EmptyInput,
    /// Arena and weight vectors have different lengths.
    WeightCountMismatch { points: usize, weights: usize },
    /// A point's dimension differs from the first point's.
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// A weight is NaN or infinite.
    NonFiniteWeight { index: usize },
    /// A weight is negative.
    NegativeWeight { index: usize, weight: f64 },
    /// Weights do not sum to one within tolerance.
    WeightSumMismatch { sum: f64 },
    /// Dependency finder invoked on an affinely independent family.
    /// Unreachable from `reduce`; surfacing it indicates a caller bug.
    AlreadyIndependent,
    /// A relation with no strictly positive coefficient reached the pivot.
    /// Sign normalization makes this unreachable; fatal if seen.
    NoPositiveCoefficient,
    /// A post-pivot weight fell below the clamp window. Minimality of the
    /// ratio test forbids this beyond rounding noise; fatal if seen.
    ExcessWeightLoss { index: usize, weight: f64 },
    /// The driver loop ran past its pivot budget without reaching an
    /// affinely independent support.
    ReductionStalled { steps: usize },
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceError::EmptyInput => write!(f, "no points given"),
            ReduceError::WeightCountMismatch { points, weights } => {
                write!(f, "{points} points but {weights} weights")
            }
            ReduceError::DimensionMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "point {index} has dimension {found}, expected {expected}"
            ),
            ReduceError::NonFiniteWeight { index } => {
                write!(f, "weight {index} is not finite")
            }
            ReduceError::NegativeWeight { index, weight } => {
                write!(f, "weight {index} is negative ({weight})")
            }
            ReduceError::WeightSumMismatch { sum } => {
                write!(f, "weights sum to {sum}, expected 1")
            }
            ReduceError::AlreadyIndependent => {
                write!(f, "family is affinely independent; no dependency exists")
            }
            ReduceError::NoPositiveCoefficient => {
                write!(f, "affine relation has no strictly positive coefficient")
            }
            ReduceError::ExcessWeightLoss { index, weight } => {
                write!(f, "weight {index} dropped to {weight} after pivot")
            }
            ReduceError::ReductionStalled { steps } => {
                write!(f, "support still dependent after {steps} pivots")
            }
        }
    }
}

impl std::error::Error for ReduceError {}

/// A target point expressed as a convex combination over a fixed point arena.
///
/// Invariants:
/// - All arena points share one dimension; the arena is never mutated.
/// - `support` holds strictly increasing arena indices; `weights` is parallel.
/// - Weights are nonnegative and sum to one (within `ReduceCfg::eps_sum` at
///   entry, preserved up to rounding by every pivot).
#[derive(Clone, Debug)]
pub struct WeightedSet {
    points: Vec<DVector<f64>>,
    support: Vec<usize>,
    weights: Vec<f64>,
}

impl WeightedSet {
    /// Validate a certificate and take ownership of the arena.
    ///
    /// `weights` carries one entry per arena point; every index enters the
    /// initial support, zero-weight points included (the ratio test retires
    /// them for free on the first dependency that touches them).
    pub fn new(
        points: Vec<DVector<f64>>,
        weights: Vec<f64>,
        cfg: ReduceCfg,
    ) -> Result<Self, ReduceError> {
        if points.is_empty() {
            return Err(ReduceError::EmptyInput);
        }
        if points.len() != weights.len() {
            return Err(ReduceError::WeightCountMismatch {
                points: points.len(),
                weights: weights.len(),
            });
        }
        let expected = points[0].len();
        for (index, p) in points.iter().enumerate() {
            if p.len() != expected {
                return Err(ReduceError::DimensionMismatch {
                    index,
                    expected,
                    found: p.len(),
                });
            }
        }
        let mut sum = 0.0;
        for (index, &w) in weights.iter().enumerate() {
            if !w.is_finite() {
                return Err(ReduceError::NonFiniteWeight { index });
            }
            if w < 0.0 {
                return Err(ReduceError::NegativeWeight { index, weight: w });
            }
            sum += w;
        }
        if (sum - 1.0).abs() > cfg.eps_sum {
            return Err(ReduceError::WeightSumMismatch { sum });
        }
        let support = (0..points.len()).collect();
        Ok(Self {
            points,
            support,
            weights,
        })
    }

    /// Successor certificate after a pivot: same arena, reduced support.
    pub(crate) fn from_reduced(prev: WeightedSet, support: Vec<usize>, weights: Vec<f64>) -> Self {
        debug_assert_eq!(support.len(), weights.len());
        debug_assert_eq!(support.len() + 1, prev.support.len());
        Self {
            points: prev.points,
            support,
            weights,
        }
    }

    /// Coordinate dimension shared by all arena points.
    #[inline]
    pub fn dim(&self) -> usize {
        self.points[0].len()
    }

    /// Number of points currently carrying weight.
    #[inline]
    pub fn support_len(&self) -> usize {
        self.support.len()
    }

    /// Arena indices in the current support (strictly increasing).
    #[inline]
    pub fn support(&self) -> &[usize] {
        &self.support
    }

    /// Weights parallel to `support`.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The full point arena (supported and retired points alike).
    #[inline]
    pub fn points(&self) -> &[DVector<f64>] {
        &self.points
    }

    /// Weight of an arena index, or `None` if it left the support.
    pub fn weight_of(&self, index: usize) -> Option<f64> {
        self.support
            .binary_search(&index)
            .ok()
            .map(|k| self.weights[k])
    }

    /// The represented point: `Σ weights[k] · points[support[k]]`.
    pub fn target(&self) -> DVector<f64> {
        let mut acc = DVector::zeros(self.dim());
        for (k, &idx) in self.support.iter().enumerate() {
            acc.axpy(self.weights[k], &self.points[idx], 1.0);
        }
        acc
    }
}

/// A nontrivial affine dependency among the supported points: coefficients
/// parallel to the support with zero sum, vanishing weighted point sum, and
/// (after sign normalization) at least one strictly positive entry.
///
/// Produced by `find_affine_relation`, consumed immediately by `pivot`.
#[derive(Clone, Debug)]
pub struct AffineRelation {
    coeffs: Vec<f64>,
}

impl AffineRelation {
    pub(crate) fn new(coeffs: Vec<f64>) -> Self {
        debug_assert!(coeffs.iter().any(|&c| c > 0.0));
        Self { coeffs }
    }

    /// Coefficients parallel to the consuming set's support.
    #[inline]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }
}

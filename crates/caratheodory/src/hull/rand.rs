//! Random weighted point sets (box-uniform points + simplex weights).
//!
//! Purpose
//! - Provide a small, deterministic sampler for convex-combination
//!   certificates used by property tests, benches, and demos. Every draw is
//!   reproducible from a replay token `(seed, index)` mixed into one RNG.
//!
//! Model
//! - Points are uniform in the box `[-coord_range, coord_range]^dim`.
//! - Weights are normalized exponential draws, i.e. uniform on the open
//!   probability simplex, so every point starts with strictly positive
//!   weight.

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use super::types::{ReduceCfg, WeightedSet};

/// Errors surfaced by the instance sampler.
#[derive(Debug)]
pub enum GeneratorError {
    InvalidParams { reason: String },
    DegenerateSample { reason: String },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid sampler params: {reason}"),
            Self::DegenerateSample { reason } => write!(f, "degenerate sample: {reason}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct InstanceCfg {
    /// Number of arena points (≥ 1).
    pub point_count: usize,
    /// Coordinate dimension (≥ 1).
    pub dim: usize,
    /// Half-width of the sampling box. Must be finite and positive.
    pub coord_range: f64,
}

impl Default for InstanceCfg {
    fn default() -> Self {
        Self {
            point_count: 12,
            dim: 3,
            coord_range: 1.0,
        }
    }
}

impl InstanceCfg {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.point_count == 0 {
            return Err(GeneratorError::invalid("need at least one point"));
        }
        if self.dim == 0 {
            return Err(GeneratorError::invalid("dimension must be at least 1"));
        }
        if !self.coord_range.is_finite() || self.coord_range <= 0.0 {
            return Err(GeneratorError::invalid("coord_range must be finite and > 0"));
        }
        Ok(())
    }
}

/// Draw a random certificate: box-uniform points, simplex-uniform weights.
pub fn draw_weighted_set(cfg: InstanceCfg, tok: ReplayToken) -> Result<WeightedSet, GeneratorError> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let r = cfg.coord_range;
    let points: Vec<DVector<f64>> = (0..cfg.point_count)
        .map(|_| DVector::from_fn(cfg.dim, |_, _| rng.gen_range(-r..=r)))
        .collect();
    let mut weights: Vec<f64> = (0..cfg.point_count)
        .map(|_| {
            let u: f64 = rng.gen();
            (-(1.0 - u).ln()).max(1e-12)
        })
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    WeightedSet::new(points, weights, ReduceCfg::default()).map_err(|e| {
        GeneratorError::DegenerateSample {
            reason: e.to_string(),
        }
    })
}

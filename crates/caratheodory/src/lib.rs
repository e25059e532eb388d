//! Carathéodory support reduction for convex combinations.
//!
//! Purpose
//! - Given a finite point family in R^D and a convex-combination certificate
//!   for a target point, shrink the support one pivot at a time until the
//!   remaining points are affinely independent (so at most D+1 survive),
//!   preserving the target and the certificate invariants throughout.
//!
//! Layout
//! - `hull`: the reduction core (types, dependency finder, ratio-test pivot,
//!   driver loop) plus a reproducible random-instance sampler.

pub mod hull;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-exports: all coordinates and matrices are dynamic-size f64.
pub use nalgebra::{DMatrix, DVector};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::hull::rand::{draw_weighted_set, GeneratorError, InstanceCfg, ReplayToken};
    pub use crate::hull::{
        find_affine_relation, is_affinely_independent, pivot, reduce, reduce_with_defaults,
        AffineRelation, ReduceCfg, ReduceError, WeightedSet,
    };
    pub use nalgebra::{DMatrix, DVector};
}

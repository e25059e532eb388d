//! Support-reduction timing probe for one reproducible instance.
//!
//! Purpose
//! - Provide a code-backed data point for "how long does it take to reduce a
//!   40-point certificate in R^3, and how far does the target drift?".
//!
//! Why this shape
//! - One seeded draw keeps the run reproducible; the sampler guarantees a
//!   valid certificate so the reducer can run unmodified.

use std::time::Instant;

use caratheodory::hull::rand::{draw_weighted_set, InstanceCfg, ReplayToken};
use caratheodory::hull::{is_affinely_independent, reduce_with_defaults, ReduceCfg};

fn main() {
    let cfg = InstanceCfg {
        point_count: 40,
        dim: 3,
        coord_range: 1.0,
    };
    let set = draw_weighted_set(cfg, ReplayToken { seed: 7, index: 0 }).expect("valid instance");
    let target = set.target();
    let before = set.support_len();

    let start = Instant::now();
    let out = reduce_with_defaults(set).expect("reduction succeeds");
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    let drift = (out.target() - &target).norm();
    assert!(
        is_affinely_independent(out.points(), out.support(), ReduceCfg::default()),
        "reduced support must be affinely independent"
    );

    println!("dim={} points={} reduced_support={}", cfg.dim, before, out.support_len());
    println!("pivots={} target_drift={drift:.3e}", before - out.support_len());
    println!("reduce_time_ms={elapsed_ms:.3}");
}
